//! Simulation statistics collection and reporting.

/// Counters accumulated over the run, surfaced in the driver's completion
/// summary.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    pub instructions_retired: u64,
    pub data_hazard_stalls: u64,
    pub branches_taken: u64,
    pub branches_not_taken: u64,
}

impl SimStats {
    /// Prints a short summary of the run.
    pub fn print(&self, cycles: u64) {
        let ipc = if cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / cycles as f64
        };
        println!("----------------------------------------");
        println!("APEX SIMULATION STATISTICS");
        println!("----------------------------------------");
        println!("cycles                 {}", cycles);
        println!("instructions_retired   {}", self.instructions_retired);
        println!("ipc                    {:.4}", ipc);
        println!("data_hazard_stalls     {}", self.data_hazard_stalls);
        println!("branches_taken         {}", self.branches_taken);
        println!("branches_not_taken     {}", self.branches_not_taken);
        println!("----------------------------------------");
    }
}

use std::time::Duration;

use clap::Args;
use taskdeck_core::{BreakdownSimulator, Config};

use super::{print_json, runtime, CmdResult};

#[derive(Args)]
pub struct BreakdownArgs {
    /// Task description to break down
    task: String,
    /// Simulated processing delay in milliseconds; overrides config
    #[arg(long)]
    delay_ms: Option<u64>,
}

pub fn run(args: BreakdownArgs) -> CmdResult {
    let delay = match args.delay_ms {
        Some(ms) => Duration::from_millis(ms),
        None => Config::load_or_default().breakdown_delay(),
    };
    let simulator = BreakdownSimulator::new(delay);

    eprintln!("Generating breakdown...");
    let breakdown = runtime()?.block_on(simulator.generate(&args.task))?;
    let notice = breakdown.generated_notice();
    eprintln!("{}: {}", notice.title, notice.description);
    print_json(&breakdown)
}

use std::process::ExitCode;

use aclock::cli::Args;
use aclock::{ClockRenderer, FixedClock, LocalClock};
use aclock_engine::device::GpuInit;
use aclock_engine::logging::init_logging;
use aclock_engine::window::Runtime;
use anyhow::Result;
use clap::Parser;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.logging());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let runtime = args.runtime();
    let clock = args.clock();

    match args.at {
        Some(time) => {
            log::info!("showing fixed time {time}");
            Runtime::run(runtime, GpuInit::default(), ClockRenderer::new(clock, FixedClock(time)))
        }
        None => Runtime::run(runtime, GpuInit::default(), ClockRenderer::new(clock, LocalClock)),
    }
}

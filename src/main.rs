use anyhow::Result;
use std::process::ExitCode;

mod app;

fn main() -> Result<ExitCode> {
    let args = sweep_into::cli::parse();
    app::run(args)
}

use clap::Parser;
use trendlens::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}

use clap::Parser;
use quantbt::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

use self::{default_config::DefaultConfigArg, simulate::SimulateArg};

mod default_config;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play games with a random input policy and report the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print the default game configuration
    DefaultConfig(#[clap(flatten)] DefaultConfigArg),
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(verbose: u8) {
    // Reports go to stdout, so logs stay on stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(LevelFilter::from_level(log_level(verbose)))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::DefaultConfig(arg) => default_config::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate() {
        let args = CommandArgs::try_parse_from([
            "tetromino",
            "-vv",
            "simulate",
            "--seed",
            "0123456789abcdeffedcba9876543210",
            "--games",
            "3",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::Simulate(_)));
    }

    #[test]
    fn test_parse_rejects_bad_seed() {
        let result = CommandArgs::try_parse_from(["tetromino", "simulate", "--seed", "xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_after_subcommand() {
        let args = CommandArgs::try_parse_from(["tetromino", "default-config", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);
        assert!(matches!(args.mode, Mode::DefaultConfig(_)));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), Level::INFO);
        assert_eq!(log_level(1), Level::DEBUG);
        assert_eq!(log_level(5), Level::TRACE);
    }
}

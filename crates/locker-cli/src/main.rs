//! # lockerctl entry point
//!
//! Parses command-line arguments, opens a facility session, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use locker_cli::bom::{run_bom, BomArgs};
use locker_cli::lockers::{run_lockers, LockersArgs};
use locker_cli::open_facility;
use locker_cli::parcels::{run_parcels, ParcelsArgs};
use locker_cli::plans::{run_plans, PlansArgs};
use locker_cli::replay::{run_replay, ReplayArgs};

/// Smart locker facility console.
///
/// Inspects the locker bank, parcels, and subscription plans of a facility
/// seed; computes bills of materials for tower build orders; and replays
/// intent scripts against a session.
#[derive(Parser, Debug)]
#[command(name = "lockerctl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a facility configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed file to load instead of the configured or built-in one.
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the locker bank.
    Lockers(LockersArgs),

    /// List subscription plans.
    Plans(PlansArgs),

    /// List parcels, sorted or grouped into buckets.
    Parcels(ParcelsArgs),

    /// Show the blueprint catalog, or the bill of materials for a build order.
    Bom(BomArgs),

    /// Dispatch a YAML script of intents against a fresh session.
    Replay(ReplayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    tracing::debug!("lockerctl v{} starting", env!("CARGO_PKG_VERSION"));

    let result = open_facility(cli.config.as_deref(), cli.seed.as_deref()).and_then(
        |mut facility| match &cli.command {
            Commands::Lockers(args) => run_lockers(args, &facility),
            Commands::Plans(args) => run_plans(args, &facility),
            Commands::Parcels(args) => run_parcels(args, &mut facility),
            Commands::Bom(args) => run_bom(args, &mut facility),
            Commands::Replay(args) => run_replay(args, &mut facility),
        },
    );

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_lockers() {
        let cli = Cli::try_parse_from(["lockerctl", "lockers"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.log_json);
        if let Commands::Lockers(args) = cli.command {
            assert!(!args.json);
        } else {
            panic!("expected lockers");
        }
    }

    #[test]
    fn cli_parse_verbosity_levels() {
        let cli = Cli::try_parse_from(["lockerctl", "-vv", "plans"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["lockerctl", "plans", "-v", "-v", "-v"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn cli_parse_global_config_and_seed() {
        let cli = Cli::try_parse_from([
            "lockerctl",
            "lockers",
            "--config",
            "facility.yaml",
            "--seed",
            "site.yaml",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("facility.yaml")));
        assert_eq!(cli.seed, Some(PathBuf::from("site.yaml")));
        assert!(cli.log_json);
    }

    #[test]
    fn cli_parse_parcels_flags() {
        let cli = Cli::try_parse_from([
            "lockerctl", "parcels", "--view", "admin", "--sort", "sender", "--desc",
        ])
        .unwrap();
        if let Commands::Parcels(args) = cli.command {
            assert!(args.desc);
            assert!(args.sort.is_some());
            assert!(!args.buckets);
        } else {
            panic!("expected parcels");
        }
    }

    #[test]
    fn cli_parse_desc_requires_sort() {
        assert!(Cli::try_parse_from(["lockerctl", "parcels", "--desc"]).is_err());
    }

    #[test]
    fn cli_parse_bom_orders() {
        let cli = Cli::try_parse_from([
            "lockerctl",
            "bom",
            "--order",
            "7-Locker Tower=2",
            "--order",
            "Kiosk Tower=1",
        ])
        .unwrap();
        if let Commands::Bom(args) = cli.command {
            assert_eq!(args.orders.len(), 2);
            assert_eq!(args.orders[0].blueprint, "7-Locker Tower");
            assert_eq!(args.orders[0].quantity, 2);
        } else {
            panic!("expected bom");
        }
    }

    #[test]
    fn cli_parse_bom_rejects_malformed_order() {
        assert!(Cli::try_parse_from(["lockerctl", "bom", "--order", "Kiosk Tower"]).is_err());
    }

    #[test]
    fn cli_parse_replay() {
        let cli = Cli::try_parse_from(["lockerctl", "replay", "morning.yaml", "--json"]).unwrap();
        if let Commands::Replay(args) = cli.command {
            assert_eq!(args.script, PathBuf::from("morning.yaml"));
            assert!(args.json);
        } else {
            panic!("expected replay");
        }
    }

    #[test]
    fn cli_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["lockerctl"]).is_err());
    }
}

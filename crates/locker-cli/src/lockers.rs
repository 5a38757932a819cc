//! # Lockers Subcommand
//!
//! Lists the locker bank in id order.

use anyhow::Result;
use clap::Args;

use locker_app::Facility;
use locker_state::Locker;

/// Arguments for `lockerctl lockers`.
#[derive(Args, Debug)]
pub struct LockersArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the lockers subcommand.
pub fn run_lockers(args: &LockersArgs, facility: &Facility) -> Result<u8> {
    let bank = facility.lockers();
    if args.json {
        let lockers: Vec<&Locker> = bank.iter().collect();
        let out = serde_json::json!({
            "lockers": lockers,
            "summary": bank.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(0);
    }

    println!("Lockers ({}):", bank.len());
    for locker in bank.iter() {
        println!("  {}", format_locker(locker));
    }
    let summary = bank.summary();
    println!(
        "Available: {}  Yours: {}  In use: {}  Sanitizing: {}",
        summary.available, summary.occupied_by_user, summary.occupied_by_other, summary.sanitizing
    );
    Ok(0)
}

fn format_locker(locker: &Locker) -> String {
    let mut line = format!("#{:<3} {:<12}", locker.id(), locker.status().label());
    if let Some(label) = locker.parcel_info() {
        line.push_str(&format!(" {label}"));
    }
    if !locker.features().is_empty() {
        let features: Vec<&str> = locker.features().iter().map(|f| f.label()).collect();
        line.push_str(&format!(" [{}]", features.join(", ")));
    }
    line.trim_end().to_string()
}

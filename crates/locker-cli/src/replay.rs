//! # Replay Subcommand
//!
//! Reads a YAML list of intents and dispatches them, in order, against a
//! fresh session. Refused intents are reported and skipped; the rest of
//! the script still runs.
//!
//! ```yaml
//! - type: set_nearby
//!   nearby: true
//! - type: open_locker
//!   locker_id: 1
//! - type: add_member
//!   name: Grandma
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use locker_app::{Facility, Intent, ParcelView};
use locker_state::LockerSummary;

/// Exit code when at least one intent was refused.
pub const EXIT_REFUSED: u8 = 2;

/// Arguments for `lockerctl replay`.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to the intent script (YAML list).
    pub script: PathBuf,
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Result of one dispatched intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    /// Zero-based position in the script.
    pub index: usize,
    /// Intent kind, e.g. `open_locker`.
    pub intent: &'static str,
    /// Whether session state changed.
    pub applied: bool,
    /// Notice text raised by the intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Refusal message, when the intent was refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Session state after the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Locker counts per status.
    pub lockers: LockerSummary,
    /// Credit balance.
    pub credits: u32,
    /// Family member count.
    pub members: usize,
    /// Proximity flag.
    pub nearby: bool,
    /// Parcels in the resident's collection.
    pub user_parcels: usize,
    /// Parcels in the hub's collection.
    pub admin_parcels: usize,
}

/// Parse an intent script.
pub fn load_script(path: &Path) -> Result<Vec<Intent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse script {}", path.display()))
}

/// Dispatch every intent, collecting one step per intent.
pub fn replay(facility: &mut Facility, intents: Vec<Intent>) -> Vec<ReplayStep> {
    intents
        .into_iter()
        .enumerate()
        .map(|(index, intent)| {
            let kind = intent.kind();
            match facility.dispatch(intent) {
                Ok(outcome) => ReplayStep {
                    index,
                    intent: kind,
                    applied: outcome.applied,
                    notice: outcome.notice.map(|n| n.message()),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(index, intent = kind, "intent refused: {e}");
                    ReplayStep {
                        index,
                        intent: kind,
                        applied: false,
                        notice: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}

/// Snapshot counts after a replay.
pub fn summarize(facility: &Facility) -> ReplaySummary {
    ReplaySummary {
        lockers: facility.lockers().summary(),
        credits: facility.credits(),
        members: facility.family().members().len(),
        nearby: facility.is_nearby(),
        user_parcels: facility.parcels(ParcelView::User).parcels().len(),
        admin_parcels: facility.parcels(ParcelView::Admin).parcels().len(),
    }
}

/// Execute the replay subcommand.
pub fn run_replay(args: &ReplayArgs, facility: &mut Facility) -> Result<u8> {
    let intents = load_script(&args.script)?;
    tracing::info!(script = %args.script.display(), intents = intents.len(), "replaying");

    let steps = replay(facility, intents);
    let summary = summarize(facility);
    let refused = steps.iter().filter(|s| s.error.is_some()).count();

    if args.json {
        let out = serde_json::json!({ "steps": steps, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for step in &steps {
            println!("{}", format_step(step));
        }
        println!(
            "Lockers: {} available, {} yours, {} in use, {} sanitizing",
            summary.lockers.available,
            summary.lockers.occupied_by_user,
            summary.lockers.occupied_by_other,
            summary.lockers.sanitizing
        );
        println!(
            "Credits: {}  Members: {}  Nearby: {}",
            summary.credits, summary.members, summary.nearby
        );
    }

    Ok(if refused > 0 { EXIT_REFUSED } else { 0 })
}

fn format_step(step: &ReplayStep) -> String {
    let n = step.index + 1;
    match (&step.error, &step.notice) {
        (Some(err), _) => format!("REFUSED [{n}] {}: {err}", step.intent),
        (None, Some(notice)) => format!("OK [{n}] {}: {notice}", step.intent),
        (None, None) if step.applied => format!("OK [{n}] {}", step.intent),
        (None, None) => format!("UNCHANGED [{n}] {}", step.intent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("script.yaml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn replay_reports_refusals_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(
            dir.path(),
            "- type: open_locker\n  locker_id: 1\n- type: set_nearby\n  nearby: true\n- type: open_locker\n  locker_id: 1\n",
        );
        let mut facility = crate::open_facility(None, None).unwrap();
        let steps = replay(&mut facility, load_script(&path).unwrap());

        assert_eq!(steps.len(), 3);
        assert!(steps[0].error.is_some());
        assert!(steps[1].applied);
        assert!(steps[2].applied);
        assert!(format_step(&steps[0]).starts_with("REFUSED [1] open_locker"));
        assert_eq!(format_step(&steps[2]), "OK [3] open_locker");
    }

    #[test]
    fn replay_exit_code_reflects_refusals() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "- type: add_member\n  name: '  '\n");
        let mut facility = crate::open_facility(None, None).unwrap();
        let args = ReplayArgs {
            script: path,
            json: true,
        };
        assert_eq!(run_replay(&args, &mut facility).unwrap(), EXIT_REFUSED);
    }

    #[test]
    fn replay_summary_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(
            dir.path(),
            "- type: add_member\n  name: Grandma\n- type: receive_delivery\n",
        );
        let mut facility = crate::open_facility(None, None).unwrap();
        let steps = replay(&mut facility, load_script(&path).unwrap());
        assert_eq!(
            steps[0].notice.as_deref(),
            Some("Added Grandma to your plan! You received 5 bonus credits.")
        );
        let summary = summarize(&facility);
        assert_eq!(summary.credits, 17);
        assert_eq!(summary.members, 3);
        assert_eq!(summary.lockers.available, 3);
    }

    #[test]
    fn load_script_rejects_unknown_intent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "- type: teleport\n");
        let err = load_script(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse script"));
    }
}

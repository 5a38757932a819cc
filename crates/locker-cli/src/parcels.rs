//! # Parcels Subcommand
//!
//! Lists one parcel collection, either as a single sorted list or grouped
//! into the four display buckets.

use anyhow::Result;
use clap::{Args, ValueEnum};

use locker_app::{Facility, ParcelView};
use locker_state::{Parcel, ParcelBucket, SortDirection, SortKey};

/// Arguments for `lockerctl parcels`.
#[derive(Args, Debug)]
pub struct ParcelsArgs {
    /// Which collection to list.
    #[arg(long, value_enum, default_value = "user")]
    pub view: ViewArg,
    /// Sort column. Defaults to newest first.
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    /// Sort descending (with `--sort`).
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Group into awaiting approval / upcoming / ready / history.
    #[arg(long)]
    pub buckets: bool,
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Admin,
    User,
}

impl From<ViewArg> for ParcelView {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Admin => ParcelView::Admin,
            ViewArg::User => ParcelView::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Sender,
    LastUpdate,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Sender => SortKey::Sender,
            SortArg::LastUpdate => SortKey::LastUpdate,
        }
    }
}

/// Execute the parcels subcommand.
pub fn run_parcels(args: &ParcelsArgs, facility: &mut Facility) -> Result<u8> {
    if let Some(sort) = args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        facility.sort_parcels(sort.into(), Some(direction));
    }
    let view = ParcelView::from(args.view);

    if args.buckets {
        let buckets = facility.parcel_buckets(view);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&buckets)?);
            return Ok(0);
        }
        for bucket in ParcelBucket::all() {
            let parcels = buckets.bucket(*bucket);
            println!("{} ({}):", bucket.title(), parcels.len());
            for parcel in parcels {
                println!("  {}", format_parcel(parcel));
            }
        }
        return Ok(0);
    }

    let parcels = facility.sorted_parcels(view);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&parcels)?);
        return Ok(0);
    }
    println!("Parcels ({view}, {}):", parcels.len());
    for parcel in &parcels {
        println!("  {}", format_parcel(parcel));
    }
    Ok(0)
}

fn format_parcel(parcel: &Parcel) -> String {
    let mut line = format!(
        "{:<10} {:<16} {:<22} {}",
        parcel.id,
        parcel.sender,
        parcel.status.label(),
        parcel.last_update
    );
    if parcel.status.has_details() {
        line.push_str(&format!(
            " (to {}, locker {})",
            parcel.recipient,
            parcel.locker_display()
        ));
    }
    line
}

//! # BOM Subcommand
//!
//! Without `--order`, prints the blueprint catalog and stock on hand.
//! With one or more `--order NAME=QTY`, prints the bill of materials for
//! that build order and any inventory shortfall. Stock is never changed.

use anyhow::Result;
use clap::Args;

use locker_app::Facility;
use locker_bom::{Blueprint, OrderLine, RequiredBom, Shortfall};

/// Arguments for `lockerctl bom`.
#[derive(Args, Debug)]
pub struct BomArgs {
    /// Build order line, `NAME=QTY`. Repeatable; later lines win.
    #[arg(long = "order", value_name = "NAME=QTY")]
    pub orders: Vec<OrderLine>,
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the bom subcommand.
pub fn run_bom(args: &BomArgs, facility: &mut Facility) -> Result<u8> {
    if args.orders.is_empty() {
        return print_catalog(args.json, facility);
    }

    for line in &args.orders {
        facility.update_build_order_quantity(&line.blueprint, line.quantity);
    }
    let bom = facility.required_bom();
    let shortfalls = facility.shortfalls();

    if args.json {
        let out = serde_json::json!({
            "order": facility.build_order(),
            "required": bom,
            "shortfalls": shortfalls,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(0);
    }

    print_bom(&bom);
    print_shortfalls(&shortfalls);
    Ok(0)
}

fn print_catalog(json: bool, facility: &Facility) -> Result<u8> {
    if json {
        let out = serde_json::json!({
            "blueprints": facility.blueprints(),
            "inventory": facility.inventory(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(0);
    }
    println!("Blueprints ({}):", facility.blueprints().len());
    for blueprint in facility.blueprints().iter() {
        println!("  {}", blueprint_line(blueprint));
    }
    println!("Inventory:");
    for (item, amount) in facility.inventory().iter() {
        println!("  {item}: {amount}");
    }
    Ok(0)
}

fn blueprint_line(blueprint: &Blueprint) -> String {
    format!(
        "{}: {} (requires {} sheets)",
        blueprint.name, blueprint.specs, blueprint.sheet_metal_per_unit
    )
}

fn print_bom(bom: &RequiredBom) {
    if bom.is_empty() {
        println!("Nothing to build.");
        return;
    }
    println!("Required components:");
    for (item, amount) in bom.iter() {
        println!("  - {item}: {amount}");
    }
}

fn print_shortfalls(shortfalls: &[Shortfall]) {
    if shortfalls.is_empty() {
        println!("OK: inventory covers this order");
        return;
    }
    println!("Shortfall ({}):", shortfalls.len());
    for s in shortfalls {
        println!(
            "  - {}: need {}, have {}, missing {}",
            s.item, s.required, s.available, s.missing
        );
    }
}

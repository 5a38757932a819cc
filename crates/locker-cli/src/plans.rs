//! # Plans Subcommand
//!
//! Prints the subscription catalog.

use anyhow::Result;
use clap::Args;

use locker_app::Facility;
use locker_core::Plan;

/// Arguments for `lockerctl plans`.
#[derive(Args, Debug)]
pub struct PlansArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the plans subcommand.
pub fn run_plans(args: &PlansArgs, facility: &Facility) -> Result<u8> {
    let plans = facility.plans();
    if args.json {
        println!("{}", serde_json::to_string_pretty(plans)?);
        return Ok(0);
    }
    if plans.is_empty() {
        println!("No plans in catalog.");
        return Ok(0);
    }
    for plan in plans {
        println!("{}", plan_heading(plan));
        for feature in &plan.features {
            println!("    - {feature}");
        }
    }
    println!("Credits: {}", facility.credits());
    Ok(0)
}

fn plan_heading(plan: &Plan) -> String {
    let marker = if plan.highlighted { " *" } else { "" };
    format!(
        "{} ({}): {} for {} credits{marker}",
        plan.name, plan.billing_period, plan.price, plan.credits_granted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use locker_core::BillingPeriod;

    #[test]
    fn plan_heading_marks_highlight() {
        let plan = Plan {
            name: "Monthly".to_string(),
            billing_period: BillingPeriod::Monthly,
            price: 500,
            credits_granted: 30,
            features: Vec::new(),
            highlighted: true,
        };
        assert_eq!(plan_heading(&plan), "Monthly (Monthly): 500 for 30 credits *");
    }
}

//! Summary tables printed after a command finishes.

use clv_deploy::{Action, ItemStatus, StepOutcome, StepReport};
use comfy_table::{Table, presets::UTF8_FULL};

pub fn deployments(reports: &[StepReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Step", "Contract", "Outcome", "Address"]);

    for report in reports {
        let outcome = match report.outcome {
            StepOutcome::AlreadyDeployed(_) => "already deployed",
            StepOutcome::Deployed(_) => "deployed",
            StepOutcome::NotRequired => "not required",
        };
        let address = report
            .outcome
            .address()
            .map_or_else(|| "-".to_string(), |address| address.to_string());

        table.add_row(vec![
            report.step.to_string(),
            report.step.contract_name().to_string(),
            outcome.to_string(),
            address,
        ]);
    }

    table
}

/// Per-item table for the administrative tasks; `item` names the first column.
pub fn items(item: &str, statuses: &[ItemStatus]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![item, "Action", "Confirmed"]);

    for status in statuses {
        let action = match status.action {
            Action::Unchanged => "unchanged".to_string(),
            Action::Sent(tx_hash) => format!("sent {tx_hash}"),
        };
        table.add_row(vec![
            status.item.clone(),
            action,
            status.confirmed.to_string(),
        ]);
    }

    table
}

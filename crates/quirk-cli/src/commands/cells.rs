//! Cells command implementation.

use console::style;
use quirk_url::{ArgKind, CellMaker, registry};

/// Execute the cells command.
pub fn execute(filter: Option<&str>) {
    let cells = matching_cells(filter);

    for cell in &cells {
        let arg = match cell.arg {
            ArgKind::None => String::new(),
            ArgKind::Formula { default } => format!("  (formula, default {default})"),
        };
        println!(
            "  {:<24} {}{}",
            style(&cell.identifier).green(),
            cell.size,
            style(arg).dim()
        );
    }
    println!();
    println!(
        "{} of {} cells",
        style(cells.len()).cyan().bold(),
        registry().len()
    );
}

/// Registered cells whose identifier contains `filter`, in registration order.
fn matching_cells(filter: Option<&str>) -> Vec<&'static CellMaker> {
    registry()
        .iter()
        .filter(|cell| filter.is_none_or(|f| cell.identifier.contains(f)))
        .collect()
}

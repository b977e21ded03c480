//! Compile command implementation.

use anyhow::{Context, Result, bail};
use console::style;
use quirk_ir::Circuit;
use quirk_url::{TIME_SYMBOL, quirk_url_to_circuit};
use tracing::debug;

/// Execute the compile command.
pub fn execute(url: &str, format: &str, time: Option<f64>) -> Result<()> {
    let circuit = compile(url, time)?;
    debug!(operations = circuit.len(), "compiled");

    match format {
        "json" => println!("{}", render_json(&circuit)?),
        "text" => {
            println!(
                "{} {} operations on {} qubits",
                style("✓").green().bold(),
                circuit.len(),
                circuit.num_qubits()
            );
            if circuit.is_parameterized() {
                println!(
                    "  {}",
                    style("symbolic in t; pass --time to bind it").yellow()
                );
            }
            print!("{circuit}");
        }
        other => bail!("Unknown format: '{other}' (expected text or json)"),
    }
    Ok(())
}

/// Compile a URL, binding the time variable when given.
fn compile(url: &str, time: Option<f64>) -> Result<Circuit> {
    let circuit = quirk_url_to_circuit(url).context("Failed to compile Quirk URL")?;
    Ok(match time {
        Some(t) => circuit.bind_parameter(TIME_SYMBOL, t),
        None => circuit,
    })
}

fn render_json(circuit: &Circuit) -> Result<String> {
    serde_json::to_string_pretty(circuit.operations()).context("Failed to serialize operations")
}

//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Quirk URL to quantum circuit compiler",
        style("Quirk").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  quirk-ir   Operations, gates and circuits");
    println!("  quirk-url  URL decoding, cell registry and column compiler");
    println!("  quirk-cli  Command-line interface");
    println!();
    println!("License: {}", style(env!("CARGO_PKG_LICENSE")).dim());
}

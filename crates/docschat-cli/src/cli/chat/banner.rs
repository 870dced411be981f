//! Welcome banner display for chat sessions.
//!
//! Prints which API document was loaded and which model will answer,
//! followed by the usage hint.

use console::style;

use docschat_types::spec::SpecContext;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(spec: &SpecContext, model: &str) {
    println!();
    println!(
        "  {} {} {}",
        style("Successfully loaded OpenAPI spec:").green(),
        style(&spec.title).cyan().bold(),
        style(&spec.version).dim()
    );
    println!(
        "  {}",
        style(format!(
            "{} paths, {} operations",
            spec.path_count, spec.operation_count
        ))
        .dim()
    );
    println!();
    println!("  {}  {}", style("Using model:").bold(), style(model).dim());
    println!();
    println!(
        "  {}",
        style("OpenAPI Assistant ready! Ask questions about the API (type 'exit' to quit):")
            .bold()
    );
    println!("  {}", style("---").dim());
}

use colored::*;

pub fn success(msg: &str) {
    tracing::info!("{} {}", "✓".green(), msg.green());
}

/// Written straight to stderr so `RUST_LOG` can never hide a failure.
pub fn error(msg: &str) {
    eprintln!("{} {}", "Error:".red(), msg.red());
}

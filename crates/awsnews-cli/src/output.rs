//! Output formatting for CLI responses.

use awsnews_types::DiagnosticError;

/// Prints an informational message to stderr.
pub fn print_info(message: &str) {
    eprintln!("[INFO] {message}");
}

/// Prints the cause and suggested fix of a diagnosable error, if any.
pub fn print_diagnostics(err: &dyn DiagnosticError) {
    if let Some(hint) = err.hint() {
        eprintln!("\n  Cause: {hint}");
    }
    if let Some(fix) = err.fix() {
        eprintln!("  Fix:   {fix}\n");
    }
}

//! Turns a failed command into the message and exit status the user sees.
//!
//! The first tracker error found in the chain decides both: its severity picks
//! the hint and the exit code, and its error code is printed for scripts.

use std::path::Path;
use std::process::ExitCode;

use console::style;
use stats_core::{ErrorSeverity, StateError, StatsError};
use stats_runtime::RepositoryError;

/// Severity and error code of the first tracker error in the chain.
fn classify(err: &anyhow::Error) -> Option<(ErrorSeverity, &'static str)> {
    err.chain().find_map(|cause| {
        if let Some(err) = cause.downcast_ref::<RepositoryError>() {
            return Some((err.severity(), err.error_code()));
        }
        cause
            .downcast_ref::<StateError>()
            .map(|err| (err.severity(), err.error_code()))
    })
}

fn hint(severity: ErrorSeverity) -> &'static str {
    match severity {
        ErrorSeverity::Recoverable => "check the store path and permissions, then retry",
        ErrorSeverity::Validation => "the request was rejected; nothing was changed",
        ErrorSeverity::Internal => "a counter or id limit was reached; nothing was changed",
        ErrorSeverity::Fatal => "the stored data is unusable; repair or move the file first",
    }
}

fn exit_code(severity: Option<ErrorSeverity>) -> u8 {
    match severity {
        None => 1,
        Some(ErrorSeverity::Validation) => 2,
        Some(ErrorSeverity::Recoverable) => 3,
        Some(ErrorSeverity::Fatal) => 4,
        Some(ErrorSeverity::Internal) => 5,
    }
}

/// Prints `err` to stderr, logs it, and returns the matching exit status.
///
/// Stderr already carries the message, so the log entry stays below the
/// stderr threshold and only lands in the log file.
pub fn report(err: &anyhow::Error, log_file: Option<&Path>) -> ExitCode {
    let class = classify(err);

    eprintln!("{} {:#}", style("error:").red().bold(), err);
    if let Some((severity, code)) = class {
        eprintln!("  {} [{}] {}", style(severity).dim(), code, hint(severity));
        tracing::info!(code, severity = %severity, "{err:#}");

        if severity.is_internal()
            && let Some(path) = log_file
        {
            eprintln!("  details: {}", path.display());
        }
    }

    ExitCode::from(exit_code(class.map(|(severity, _)| severity)))
}

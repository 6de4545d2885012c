//! Shared helpers for command handlers.

use tokio::sync::broadcast::{self, error::TryRecvError};

use realty_core::Notice;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        reason: e.to_string(),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Print the success notices a command produced.
///
/// Error notices are skipped: the failure itself is returned and
/// rendered by miette.
pub fn flush_notices(rx: &mut broadcast::Receiver<Notice>, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    loop {
        match rx.try_recv() {
            Ok(notice) if notice.is_success() => {
                if !global.quiet {
                    output::print_notice(&notice, color);
                }
            }
            Ok(notice) => tracing::debug!(%notice, "error notice"),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "notice receiver lagged");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

/// Non-empty id or a validation error.
pub fn require_id<'a>(id: &'a str, field: &str) -> Result<&'a str, CliError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(id)
}

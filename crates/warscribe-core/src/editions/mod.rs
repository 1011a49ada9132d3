//! Built-in editions.
//!
//! - [`TenthEdition`]: Warhammer 40,000 10th Edition (six phases, no psychic phase)
//! - [`NinthEdition`]: Warhammer 40,000 9th Edition (seven phases, psychic phase)
//!
//! Both judge actions with the shared phase gate and type cascade from
//! [`validate_standard`](crate::edition::validate_standard), differing in
//! their phase sequences.
//!
//! # Registration
//!
//! Use [`EditionRegistry::with_builtin_editions()`](crate::edition::EditionRegistry::with_builtin_editions)
//! to get a registry with both installed and 10th as default.

mod ninth;
mod tenth;

pub use ninth::{NinthEdition, NINTH_EDITION_CODE};
pub use tenth::{TenthEdition, TENTH_EDITION_CODE};

use crate::action::Action;
use crate::edition::ValidationResult;

fn log_outcome(edition: &str, action: &Action, result: &ValidationResult) {
    if result.is_valid() {
        tracing::trace!(
            edition,
            action_id = %action.id(),
            action_type = %action.action_type(),
            warnings = result.warnings().len(),
            "action accepted"
        );
    } else {
        tracing::debug!(
            edition,
            action_id = %action.id(),
            action_type = %action.action_type(),
            errors = ?result.errors(),
            "action rejected"
        );
    }
}

//! # Warscribe Core
//!
//! Action notation and rule validation for tabletop wargame transcripts.
//!
//! This crate records what happened in a game as a structured, serializable
//! transcript, and judges after the fact whether each recorded action is
//! internally consistent and legal in its phase under a given edition's
//! rules. It does not roll dice, measure the table, or track live game
//! state.
//!
//! ## Architecture
//!
//! - **Units**: [`UnitReference`](unit::UnitReference) snapshots identify the
//!   units that act and are acted upon
//! - **Actions**: a closed set of tagged records ([`Action`](action::Action))
//!   whose structural invariants are checked at construction
//! - **Transcripts**: [`GameTranscript`](transcript::GameTranscript), the
//!   append-only action log of one game
//! - **Editions**: rule sets implementing
//!   [`EditionRules`](edition::EditionRules), each with its own phase
//!   sequence and validation cascade, looked up through an
//!   [`EditionRegistry`](edition::EditionRegistry)
//!
//! ## Usage
//!
//! ```
//! use warscribe_core::action::{ActionCommon, ChargeAction, ChargeRoll, MoveAction};
//! use warscribe_core::edition::{EditionRegistry, EditionRules};
//! use warscribe_core::transcript::{GameTranscript, Player};
//! use warscribe_core::unit::UnitReference;
//!
//! let marines = UnitReference::new("Assault Marines", "Space Marines");
//! let orks = UnitReference::new("Boyz", "Orks");
//!
//! let mut transcript = GameTranscript::new(
//!     Player::new("Alice", "Space Marines"),
//!     Player::new("Bob", "Orks"),
//! );
//! transcript.add_action(MoveAction::new(ActionCommon::new(1, "movement", marines.clone()), 6.0)?);
//! transcript.add_action(
//!     ChargeAction::builder(
//!         ActionCommon::new(1, "charge", marines),
//!         vec![orks],
//!         ChargeRoll::new(2, 3)?,
//!         8.0,
//!     )
//!     .made_charge(true)
//!     .build()?,
//! );
//!
//! let registry = EditionRegistry::with_builtin_editions();
//! let rules = registry.get_default().expect("built-in editions present");
//! let results = rules.validate_transcript(&transcript);
//!
//! assert!(results.iter().all(|result| result.is_valid()));
//! assert!(results[1].has_warnings());
//! # Ok::<(), warscribe_core::error::SchemaError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod edition;
pub mod editions;
pub mod error;
mod ids;
pub mod transcript;
pub mod unit;

pub use action::{Action, ActionType};
pub use edition::{EditionRegistry, EditionRules, ValidationResult};
pub use transcript::GameTranscript;

#[cfg(test)]
mod tests;

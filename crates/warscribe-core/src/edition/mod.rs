//! Edition rule sets.
//!
//! An edition is a versioned ruleset. It supplies its own
//! [`PhaseSequence`] and judges recorded actions against it, producing a
//! [`ValidationResult`]. Editions implement the [`EditionRules`] trait and
//! are looked up by code through an [`EditionRegistry`].
//!
//! # Architecture
//!
//! - Editions are stateless after construction: phases and thresholds never
//!   change once built.
//! - Validation is a pure function of the action and the edition. It never
//!   returns `Err`; rule outcomes are data.
//! - The registry is an ordinary value owned by the caller, not global
//!   state. Pass it by reference to whatever needs lookup.
//!
//! # Example
//!
//! ```
//! use warscribe_core::action::{Action, ActionCommon, MoveAction};
//! use warscribe_core::edition::EditionRegistry;
//! use warscribe_core::unit::UnitReference;
//!
//! let registry = EditionRegistry::with_builtin_editions();
//! let rules = registry.get_default().expect("built-in editions present");
//! assert_eq!(rules.code(), "10th");
//!
//! let actor = UnitReference::new("Intercessors", "Space Marines");
//! let action: Action = MoveAction::new(ActionCommon::new(1, "movement", actor), 6.0)?.into();
//!
//! let result = rules.validate(&action);
//! assert!(result.is_valid());
//! assert!(!result.has_warnings());
//! # Ok::<(), warscribe_core::error::SchemaError>(())
//! ```

mod config;
mod phase;
mod registry;
mod validation;

use std::fmt;

use rayon::prelude::*;

use crate::action::{Action, ActionType};
use crate::transcript::GameTranscript;

pub use config::{RulesConfig, DEFAULT_MAX_MOVE_INCHES};
pub use phase::{GamePhase, PhaseDefinition, PhaseSequence};
pub use registry::EditionRegistry;
pub use validation::{
    check_cascade, check_charge, check_move, check_phase_gate, check_strikes, validate_standard,
    RuleViolation, RuleWarning, StrikeKind, ValidationResult,
};

// =============================================================================
// Edition Rules Trait
// =============================================================================

/// A ruleset that judges recorded actions.
///
/// Implementors supply an identity, a phase sequence and a
/// [`validate`](Self::validate) operation. Phase lookups and transcript
/// validation are provided on top of those.
///
/// # Thread Safety
///
/// Editions must be `Send + Sync`. Registries share them behind `Arc` and
/// [`validate_transcript`](Self::validate_transcript) judges actions in
/// parallel.
///
/// # Example
///
/// ```
/// use warscribe_core::action::{Action, ActionType};
/// use warscribe_core::edition::{
///     validate_standard, EditionRules, PhaseDefinition, PhaseSequence, RulesConfig,
///     ValidationResult,
/// };
///
/// struct Skirmish {
///     phases: PhaseSequence,
/// }
///
/// impl EditionRules for Skirmish {
///     fn code(&self) -> &str {
///         "skirmish"
///     }
///
///     fn name(&self) -> &str {
///         "Skirmish Rules"
///     }
///
///     fn phases(&self) -> &PhaseSequence {
///         &self.phases
///     }
///
///     fn validate(&self, action: &Action) -> ValidationResult {
///         validate_standard(&self.phases, &RulesConfig::default(), action)
///     }
/// }
///
/// let rules = Skirmish {
///     phases: PhaseSequence::new(vec![
///         PhaseDefinition::new("action", "Action Phase", 0, [ActionType::Move, ActionType::Shoot]),
///         PhaseDefinition::new("melee", "Melee Phase", 1, [ActionType::Fight]),
///     ])?,
/// };
///
/// assert_eq!(rules.next_phase("action").map(|p| p.name.as_str()), Some("melee"));
/// assert!(rules.is_action_allowed_in_phase(ActionType::Shoot, "action"));
/// assert!(!rules.is_action_allowed_in_phase(ActionType::Shoot, "melee"));
/// # Ok::<(), warscribe_core::error::EditionError>(())
/// ```
pub trait EditionRules: Send + Sync {
    /// Short identifier, e.g. `"10th"`. Registry key.
    fn code(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// The edition's turn phases.
    fn phases(&self) -> &PhaseSequence;

    /// Judges one action.
    ///
    /// Runs the phase gate first; if it fails, that is the only error. Then
    /// runs the per-variant checks in a fixed order, so identical inputs
    /// always yield identical findings.
    fn validate(&self, action: &Action) -> ValidationResult;

    /// Looks up a phase by name.
    fn phase(&self, name: &str) -> Option<&PhaseDefinition> {
        self.phases().get(name)
    }

    /// Order of the named phase, `None` if unknown.
    fn phase_order(&self, name: &str) -> Option<u32> {
        self.phases().order_of(name)
    }

    /// The phase that follows `current`, `None` if it is last or unknown.
    fn next_phase(&self, current: &str) -> Option<&PhaseDefinition> {
        self.phases().next(current)
    }

    /// Whether `action_type` is legal in the named phase.
    fn is_action_allowed_in_phase(&self, action_type: ActionType, phase: &str) -> bool {
        self.phases().allows(action_type, phase)
    }

    /// Judges every action of a transcript.
    ///
    /// Actions are judged in parallel; results come back in recording order.
    fn validate_transcript(&self, transcript: &GameTranscript) -> Vec<ValidationResult> {
        let results: Vec<ValidationResult> = transcript
            .actions()
            .par_iter()
            .map(|action| self.validate(action))
            .collect();

        let rejected = results.iter().filter(|result| !result.is_valid()).count();
        tracing::debug!(
            edition = self.code(),
            actions = results.len(),
            rejected,
            "validated transcript"
        );
        results
    }
}

impl fmt::Display for dyn EditionRules + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl fmt::Debug for dyn EditionRules + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditionRules")
            .field("code", &self.code())
            .field("phases", &self.phases().names())
            .finish()
    }
}

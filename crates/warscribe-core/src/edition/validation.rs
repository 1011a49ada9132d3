//! Judging recorded actions.
//!
//! Validation runs in two stages:
//!
//! 1. **Phase gate**: the action's type must be whitelisted by the phase its
//!    `phase` field names. If not, the result carries that one error and
//!    nothing else is checked.
//! 2. **Type cascade**: per-variant checks that either fire a hard
//!    [`RuleViolation`] (a state no rule allows) or record a
//!    [`RuleWarning`] (legal under some ability or re-roll, but unusual).
//!
//! A result is invalid exactly when a violation fired. Warnings accumulate
//! in check order and never change validity. The first violation inside a
//! cascade ends that cascade; warnings already raised are kept.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PhaseSequence, RulesConfig};
use crate::action::{Action, ActionType, ChargeAction, MoveAction, StrikeResults};

// =============================================================================
// Validation Result
// =============================================================================

/// Outcome of judging one action.
///
/// Invalid exactly when `errors` is non-empty. A stored `is_valid` flag is
/// ignored on read and recomputed from the errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ResultDocument")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Read shape of a [`ValidationResult`].
#[derive(Deserialize)]
struct ResultDocument {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
}

impl From<ResultDocument> for ValidationResult {
    fn from(document: ResultDocument) -> Self {
        Self {
            is_valid: document.errors.is_empty(),
            errors: document.errors,
            warnings: document.warnings,
        }
    }
}

impl ValidationResult {
    /// A valid result with no findings.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// An invalid result carrying a single violation.
    #[must_use]
    pub fn rejected(violation: &RuleViolation) -> Self {
        let mut result = Self::success();
        result.add_error(violation);
        result
    }

    /// Records a hard error. The result becomes invalid.
    pub fn add_error(&mut self, violation: &RuleViolation) {
        self.is_valid = false;
        self.errors.push(violation.to_string());
    }

    /// Records a warning. Validity is unchanged.
    pub fn add_warning(&mut self, warning: &RuleWarning) {
        self.warnings.push(warning.to_string());
    }

    /// Folds another result into this one, keeping finding order.
    pub fn merge(&mut self, other: Self) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// True if no hard error fired.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Hard error messages, in check order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Warning messages, in check order.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True if any warning was recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

// =============================================================================
// Findings
// =============================================================================

/// Which count starts a strike cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrikeKind {
    /// Ranged: the cascade starts from shots.
    Shots,
    /// Melee: the cascade starts from attacks.
    Attacks,
}

impl fmt::Display for StrikeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shots => write!(f, "shots"),
            Self::Attacks => write!(f, "attacks"),
        }
    }
}

/// A hard rule error. Any one of these makes an action invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleViolation {
    /// The action type is not whitelisted in the named phase, or the phase
    /// does not exist in this edition.
    #[error("Action type '{action_type}' not allowed in '{phase}' phase.")]
    PhaseNotAllowed {
        /// The offending action type.
        action_type: ActionType,
        /// The phase key the action claimed.
        phase: String,
    },

    /// A move with negative distance.
    #[error("Movement distance cannot be negative.")]
    NegativeMove,

    /// Advance and fall back flagged on the same move.
    #[error("A unit cannot both Advance and Fall Back in the same move.")]
    AdvanceAndFallBack,

    /// A charge die outside 1-6.
    #[error("Dice values must be between 1 and 6, got {value}.")]
    DieOutOfRange {
        /// The bad face.
        value: u8,
    },

    /// A strike with no shots or attacks.
    #[error("Number of {kind} must be at least 1.")]
    NoStrikes {
        /// Shots or attacks.
        kind: StrikeKind,
    },

    /// More hits than shots or attacks.
    #[error("Hits ({hits}) cannot exceed {kind} ({count}).")]
    HitsExceedStrikes {
        /// Reported hits.
        hits: u32,
        /// Shots or attacks.
        kind: StrikeKind,
        /// Number of shots or attacks.
        count: u32,
    },
}

/// A legal but unusual finding, surfaced for human review.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleWarning {
    /// A move longer than the edition's soft ceiling.
    LongMove {
        /// Distance moved.
        distance: f64,
        /// The ceiling.
        limit: f64,
    },
    /// A charge reported as made although the roll falls short.
    ChargeRollShort {
        /// 2D6 total.
        total: u32,
        /// Distance to the nearest target.
        needed: f64,
    },
    /// More wounds than hits.
    WoundsExceedHits {
        /// Reported wounds.
        wounds: u32,
        /// Reported hits.
        hits: u32,
    },
    /// More failed saves than wounds.
    SavesFailedExceedWounds {
        /// Reported failed saves.
        saves_failed: u32,
        /// Reported wounds.
        wounds: u32,
    },
    /// More casualties than failed saves.
    KillsExceedSavesFailed {
        /// Reported casualties.
        models_killed: u32,
        /// Reported failed saves.
        saves_failed: u32,
    },
}

impl fmt::Display for RuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongMove { distance, limit } => write!(
                f,
                "Movement of {distance}\" is unusually high (over {limit}\")."
            ),
            Self::ChargeRollShort { total, needed } => write!(
                f,
                "Charge marked as successful but roll ({total}) is less than distance needed ({needed})."
            ),
            Self::WoundsExceedHits { wounds, hits } => write!(
                f,
                "Wounds ({wounds}) exceed hits ({hits}). Verify re-rolls or abilities."
            ),
            Self::SavesFailedExceedWounds {
                saves_failed,
                wounds,
            } => write!(f, "Saves failed ({saves_failed}) exceed wounds ({wounds})."),
            Self::KillsExceedSavesFailed {
                models_killed,
                saves_failed,
            } => write!(
                f,
                "Models killed ({models_killed}) exceeds saves failed ({saves_failed}). Multi-damage weapon?"
            ),
        }
    }
}

// =============================================================================
// Checks
// =============================================================================

/// Stage 1: is the action's type legal in its declared phase?
///
/// # Errors
///
/// Returns [`RuleViolation::PhaseNotAllowed`] if the phase is unknown or does
/// not whitelist the action's type.
pub fn check_phase_gate(phases: &PhaseSequence, action: &Action) -> Result<(), RuleViolation> {
    let action_type = action.action_type();
    if phases.allows(action_type, action.phase()) {
        Ok(())
    } else {
        Err(RuleViolation::PhaseNotAllowed {
            action_type,
            phase: action.phase().to_string(),
        })
    }
}

/// Movement checks: ceiling warning, advance/fall-back exclusivity.
///
/// # Errors
///
/// Returns a [`RuleViolation`] for a negative distance or for advancing and
/// falling back at once.
pub fn check_move(
    action: &MoveAction,
    config: &RulesConfig,
    result: &mut ValidationResult,
) -> Result<(), RuleViolation> {
    let distance = action.distance_inches();
    if distance < 0.0 {
        return Err(RuleViolation::NegativeMove);
    }
    if distance > config.max_move_inches {
        result.add_warning(&RuleWarning::LongMove {
            distance,
            limit: config.max_move_inches,
        });
    }
    if action.is_advance() && action.is_fall_back() {
        return Err(RuleViolation::AdvanceAndFallBack);
    }
    Ok(())
}

/// Charge checks: die faces, and a reported success the roll cannot cover.
///
/// The reported outcome is never overridden; an arithmetically short
/// success is only flagged.
///
/// # Errors
///
/// Returns [`RuleViolation::DieOutOfRange`] for a face outside 1-6.
pub fn check_charge(action: &ChargeAction, result: &mut ValidationResult) -> Result<(), RuleViolation> {
    let roll = action.charge_roll();
    if let Some(value) = roll.dice().into_iter().find(|die| !(1..=6).contains(die)) {
        return Err(RuleViolation::DieOutOfRange { value });
    }

    let total = roll.total();
    if action.made_charge() && f64::from(total) < action.distance_needed() {
        result.add_warning(&RuleWarning::ChargeRollShort {
            total,
            needed: action.distance_needed(),
        });
    }
    Ok(())
}

/// Strike cascade checks shared by shooting and melee.
///
/// `hits > count` is impossible; every later break in the chain is only
/// unusual.
///
/// # Errors
///
/// Returns a [`RuleViolation`] for zero strikes or more hits than strikes.
pub fn check_strikes(
    kind: StrikeKind,
    count: u32,
    results: &StrikeResults,
    result: &mut ValidationResult,
) -> Result<(), RuleViolation> {
    if count == 0 {
        return Err(RuleViolation::NoStrikes { kind });
    }
    if results.hits > count {
        return Err(RuleViolation::HitsExceedStrikes {
            hits: results.hits,
            kind,
            count,
        });
    }
    if results.wounds > results.hits {
        result.add_warning(&RuleWarning::WoundsExceedHits {
            wounds: results.wounds,
            hits: results.hits,
        });
    }
    if results.saves_failed > results.wounds {
        result.add_warning(&RuleWarning::SavesFailedExceedWounds {
            saves_failed: results.saves_failed,
            wounds: results.wounds,
        });
    }
    if results.models_killed > results.saves_failed {
        result.add_warning(&RuleWarning::KillsExceedSavesFailed {
            models_killed: results.models_killed,
            saves_failed: results.saves_failed,
        });
    }
    Ok(())
}

/// Stage 2 for the core record variants.
///
/// # Errors
///
/// Returns the first [`RuleViolation`] raised by the variant's checks.
pub fn check_cascade(
    action: &Action,
    config: &RulesConfig,
    result: &mut ValidationResult,
) -> Result<(), RuleViolation> {
    match action {
        Action::Move(action) => check_move(action, config, result),
        Action::Charge(action) => check_charge(action, result),
        Action::Shoot(action) => {
            check_strikes(StrikeKind::Shots, action.shots(), action.results(), result)
        }
        Action::Fight(action) => {
            check_strikes(StrikeKind::Attacks, action.attacks(), action.results(), result)
        }
    }
}

/// Runs the phase gate followed by the type cascade.
#[must_use]
pub fn validate_standard(
    phases: &PhaseSequence,
    config: &RulesConfig,
    action: &Action,
) -> ValidationResult {
    if let Err(violation) = check_phase_gate(phases, action) {
        return ValidationResult::rejected(&violation);
    }

    let mut result = ValidationResult::success();
    if let Err(violation) = check_cascade(action, config, &mut result) {
        result.add_error(&violation);
    }
    result
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod result_tests {
        use super::*;

        #[test]
        fn success_is_clean() {
            let result = ValidationResult::success();
            assert!(result.is_valid());
            assert!(result.errors().is_empty());
            assert!(!result.has_warnings());
        }

        #[test]
        fn rejected_is_invalid() {
            let result = ValidationResult::rejected(&RuleViolation::AdvanceAndFallBack);
            assert!(!result.is_valid());
            assert_eq!(result.errors().len(), 1);
        }

        #[test]
        fn warnings_keep_validity() {
            let mut result = ValidationResult::success();
            result.add_warning(&RuleWarning::WoundsExceedHits { wounds: 3, hits: 2 });
            result.add_warning(&RuleWarning::SavesFailedExceedWounds {
                saves_failed: 4,
                wounds: 3,
            });
            assert!(result.is_valid());
            assert_eq!(result.warnings().len(), 2);
        }

        #[test]
        fn merge_combines_findings() {
            let mut first = ValidationResult::success();
            first.add_warning(&RuleWarning::WoundsExceedHits { wounds: 3, hits: 2 });
            let second = ValidationResult::rejected(&RuleViolation::NegativeMove);

            first.merge(second);
            assert!(!first.is_valid());
            assert_eq!(first.errors().len(), 1);
            assert_eq!(first.warnings().len(), 1);
        }

        #[test]
        fn validity_is_recomputed_on_read() {
            let result: ValidationResult =
                serde_json::from_str(r#"{"is_valid":true,"errors":["x"],"warnings":[]}"#).unwrap();
            assert!(!result.is_valid());

            let result: ValidationResult =
                serde_json::from_str(r#"{"is_valid":false,"errors":[],"warnings":["w"]}"#).unwrap();
            assert!(result.is_valid());
            assert!(result.has_warnings());
        }

        #[test]
        fn document_round_trip() {
            let mut result = ValidationResult::rejected(&RuleViolation::AdvanceAndFallBack);
            result.add_warning(&RuleWarning::WoundsExceedHits { wounds: 3, hits: 2 });

            let json = serde_json::to_value(&result).unwrap();
            assert_eq!(json["is_valid"], false);
            let restored: ValidationResult = serde_json::from_value(json).unwrap();
            assert_eq!(restored, result);
        }
    }

    mod message_tests {
        use super::*;

        #[test]
        fn phase_message_names_type_and_phase() {
            let violation = RuleViolation::PhaseNotAllowed {
                action_type: ActionType::Move,
                phase: "shooting".into(),
            };
            assert_eq!(
                violation.to_string(),
                "Action type 'move' not allowed in 'shooting' phase."
            );
        }

        #[test]
        fn hits_message_says_cannot_exceed() {
            let violation = RuleViolation::HitsExceedStrikes {
                hits: 7,
                kind: StrikeKind::Shots,
                count: 5,
            };
            assert_eq!(violation.to_string(), "Hits (7) cannot exceed shots (5).");
        }

        #[test]
        fn charge_message_shows_totals() {
            let warning = RuleWarning::ChargeRollShort {
                total: 5,
                needed: 8.0,
            };
            let text = warning.to_string();
            assert!(text.contains("(5)"));
            assert!(text.contains("(8)"));
        }

        #[test]
        fn long_move_message_shows_distance() {
            let warning = RuleWarning::LongMove {
                distance: 30.5,
                limit: 24.0,
            };
            assert_eq!(
                warning.to_string(),
                "Movement of 30.5\" is unusually high (over 24\")."
            );
        }
    }

    mod strike_tests {
        use super::*;

        fn run(count: u32, results: StrikeResults) -> (Result<(), RuleViolation>, ValidationResult) {
            let mut result = ValidationResult::success();
            let outcome = check_strikes(StrikeKind::Attacks, count, &results, &mut result);
            (outcome, result)
        }

        #[test]
        fn clean_cascade_passes() {
            let (outcome, result) = run(10, StrikeResults::new(7, 5, 3, 3, 3));
            assert!(outcome.is_ok());
            assert!(!result.has_warnings());
        }

        #[test]
        fn hits_over_count_is_an_error() {
            let (outcome, _) = run(3, StrikeResults::new(5, 0, 0, 0, 0));
            assert_eq!(
                outcome,
                Err(RuleViolation::HitsExceedStrikes {
                    hits: 5,
                    kind: StrikeKind::Attacks,
                    count: 3
                })
            );
        }

        #[test]
        fn later_breaks_are_warnings_in_order() {
            let (outcome, result) = run(10, StrikeResults::new(2, 3, 4, 6, 5));
            assert!(outcome.is_ok());
            assert_eq!(result.warnings().len(), 3);
            assert!(result.warnings()[0].starts_with("Wounds (3)"));
            assert!(result.warnings()[1].starts_with("Saves failed (4)"));
            assert!(result.warnings()[2].starts_with("Models killed (5)"));
        }

        #[test]
        fn zero_count_is_an_error() {
            let (outcome, _) = run(0, StrikeResults::default());
            assert_eq!(
                outcome,
                Err(RuleViolation::NoStrikes {
                    kind: StrikeKind::Attacks
                })
            );
        }
    }
}

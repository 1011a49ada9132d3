//! Warhammer 40,000 10th Edition.
//!
//! Six phases per turn. There is no psychic phase: psychic abilities are
//! resolved inside the other phases.
//!
//! | Order | Phase    | Allowed actions                            |
//! |-------|----------|--------------------------------------------|
//! | 0     | command  | stratagem, ability                         |
//! | 1     | movement | move, advance, fall back                   |
//! | 2     | shooting | shoot, stratagem                           |
//! | 3     | charge   | charge, heroic intervention, stratagem     |
//! | 4     | fight    | fight, pile in, consolidate, stratagem     |
//! | 5     | morale   | ability (optional phase)                   |

use crate::action::{Action, ActionType};
use crate::edition::{
    validate_standard, EditionRules, GamePhase, PhaseDefinition, PhaseSequence, RulesConfig,
    ValidationResult,
};

/// Edition code.
pub const TENTH_EDITION_CODE: &str = "10th";

/// 10th Edition rules.
///
/// # Example
///
/// ```
/// use warscribe_core::edition::EditionRules;
/// use warscribe_core::editions::TenthEdition;
///
/// let rules = TenthEdition::new();
/// assert_eq!(rules.code(), "10th");
/// assert_eq!(rules.phases().len(), 6);
/// assert!(rules.phase("psychic").is_none());
/// assert_eq!(rules.next_phase("fight").map(|p| p.name.as_str()), Some("morale"));
/// ```
#[derive(Debug, Clone)]
pub struct TenthEdition {
    phases: PhaseSequence,
    config: RulesConfig,
}

impl TenthEdition {
    /// Creates the edition with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Creates the edition with custom thresholds.
    #[must_use]
    pub fn with_config(config: RulesConfig) -> Self {
        Self {
            phases: PhaseSequence::from_trusted(tenth_phases()),
            config,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &RulesConfig {
        &self.config
    }
}

impl Default for TenthEdition {
    fn default() -> Self {
        Self::new()
    }
}

impl EditionRules for TenthEdition {
    fn code(&self) -> &str {
        TENTH_EDITION_CODE
    }

    fn name(&self) -> &str {
        "Warhammer 40,000 10th Edition"
    }

    fn phases(&self) -> &PhaseSequence {
        &self.phases
    }

    fn validate(&self, action: &Action) -> ValidationResult {
        let result = validate_standard(&self.phases, &self.config, action);
        super::log_outcome(TENTH_EDITION_CODE, action, &result);
        result
    }
}

fn tenth_phases() -> Vec<PhaseDefinition> {
    use ActionType::{
        Ability, Advance, Charge, Consolidate, FallBack, Fight, HeroicIntervention, Move, PileIn,
        Shoot, Stratagem,
    };

    vec![
        PhaseDefinition::new(GamePhase::Command, "Command Phase", 0, [Stratagem, Ability])
            .with_description("Use abilities and generate Command Points."),
        PhaseDefinition::new(GamePhase::Movement, "Movement Phase", 1, [Move, Advance, FallBack])
            .with_description("Move your units across the battlefield."),
        PhaseDefinition::new(GamePhase::Shooting, "Shooting Phase", 2, [Shoot, Stratagem])
            .with_description("Shoot with ranged weapons."),
        PhaseDefinition::new(
            GamePhase::Charge,
            "Charge Phase",
            3,
            [Charge, HeroicIntervention, Stratagem],
        )
        .with_description("Charge into close combat."),
        PhaseDefinition::new(
            GamePhase::Fight,
            "Fight Phase",
            4,
            [Fight, PileIn, Consolidate, Stratagem],
        )
        .with_description("Fight in close combat."),
        PhaseDefinition::new(GamePhase::Morale, "Morale Phase", 5, [Ability])
            .with_description("Test unit morale.")
            .optional(),
    ]
}

// =============================================================================
// Tests
// =============================================================================

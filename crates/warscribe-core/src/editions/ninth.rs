//! Warhammer 40,000 9th Edition.
//!
//! Seven phases per turn, with a dedicated psychic phase between movement
//! and shooting. Morale is mandatory.

use crate::action::{Action, ActionType};
use crate::edition::{
    validate_standard, EditionRules, GamePhase, PhaseDefinition, PhaseSequence, RulesConfig,
    ValidationResult,
};

/// Edition code.
pub const NINTH_EDITION_CODE: &str = "9th";

/// 9th Edition rules.
///
/// # Example
///
/// ```
/// use warscribe_core::action::ActionType;
/// use warscribe_core::edition::EditionRules;
/// use warscribe_core::editions::NinthEdition;
///
/// let rules = NinthEdition::new();
/// assert_eq!(rules.next_phase("movement").map(|p| p.name.as_str()), Some("psychic"));
/// assert!(rules.is_action_allowed_in_phase(ActionType::Ability, "psychic"));
/// ```
#[derive(Debug, Clone)]
pub struct NinthEdition {
    phases: PhaseSequence,
    config: RulesConfig,
}

impl NinthEdition {
    /// Creates the edition with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Creates the edition with custom thresholds.
    #[must_use]
    pub fn with_config(config: RulesConfig) -> Self {
        Self {
            phases: PhaseSequence::from_trusted(ninth_phases()),
            config,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &RulesConfig {
        &self.config
    }
}

impl Default for NinthEdition {
    fn default() -> Self {
        Self::new()
    }
}

impl EditionRules for NinthEdition {
    fn code(&self) -> &str {
        NINTH_EDITION_CODE
    }

    fn name(&self) -> &str {
        "Warhammer 40,000 9th Edition"
    }

    fn phases(&self) -> &PhaseSequence {
        &self.phases
    }

    fn validate(&self, action: &Action) -> ValidationResult {
        let result = validate_standard(&self.phases, &self.config, action);
        super::log_outcome(NINTH_EDITION_CODE, action, &result);
        result
    }
}

fn ninth_phases() -> Vec<PhaseDefinition> {
    use ActionType::{
        Ability, Advance, Charge, Consolidate, FallBack, Fight, HeroicIntervention, Move, PileIn,
        Shoot, Stratagem,
    };

    vec![
        PhaseDefinition::new(GamePhase::Command, "Command Phase", 0, [Stratagem, Ability])
            .with_description("Gain Command Points and resolve command abilities."),
        PhaseDefinition::new(
            GamePhase::Movement,
            "Movement Phase",
            1,
            [Move, Advance, FallBack, Stratagem],
        )
        .with_description("Move units and set up reinforcements."),
        PhaseDefinition::new(GamePhase::Psychic, "Psychic Phase", 2, [Ability, Stratagem])
            .with_description("Manifest psychic powers and deny the witch."),
        PhaseDefinition::new(GamePhase::Shooting, "Shooting Phase", 3, [Shoot, Stratagem])
            .with_description("Shoot with ranged weapons."),
        PhaseDefinition::new(GamePhase::Charge, "Charge Phase", 4, [Charge, Stratagem])
            .with_description("Declare and resolve charges."),
        PhaseDefinition::new(
            GamePhase::Fight,
            "Fight Phase",
            5,
            [Fight, PileIn, Consolidate, HeroicIntervention, Stratagem],
        )
        .with_description("Heroic interventions, then fight in close combat."),
        PhaseDefinition::new(GamePhase::Morale, "Morale Phase", 6, [Ability, Stratagem])
            .with_description("Take morale and combat attrition tests."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionCommon, ChargeAction, ChargeRoll, ShootAction, StrikeResults};
    use crate::unit::UnitReference;

    #[test]
    fn psychic_phase_sits_after_movement() {
        let rules = NinthEdition::new();
        assert_eq!(rules.phases().len(), 7);
        assert_eq!(rules.phase_order("psychic"), Some(2));
        assert_eq!(
            rules.next_phase("psychic").map(|p| p.name.as_str()),
            Some("shooting")
        );
        assert!(!rules.phase("morale").unwrap().is_optional);
    }

    #[test]
    fn heroic_intervention_belongs_to_fight() {
        let rules = NinthEdition::new();
        assert!(rules.is_action_allowed_in_phase(ActionType::HeroicIntervention, "fight"));
        assert!(!rules.is_action_allowed_in_phase(ActionType::HeroicIntervention, "charge"));
    }

    #[test]
    fn shares_the_strike_cascade() {
        let actor = UnitReference::new("Devastators", "Space Marines");
        let action = ShootAction::builder(
            ActionCommon::new(2, "shooting", actor),
            UnitReference::new("Boyz", "Orks"),
            "Heavy bolter",
            3,
        )
        .results(StrikeResults::new(4, 0, 0, 0, 0))
        .build()
        .unwrap();

        let result = NinthEdition::new().validate(&action.into());
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0], "Hits (4) cannot exceed shots (3).");
    }

    #[test]
    fn charge_outside_charge_phase_is_rejected() {
        let actor = UnitReference::new("Assault Marines", "Space Marines");
        let action = ChargeAction::builder(
            ActionCommon::new(2, "psychic", actor),
            vec![UnitReference::new("Boyz", "Orks")],
            ChargeRoll::new(6, 6).unwrap(),
            7.0,
        )
        .made_charge(true)
        .build()
        .unwrap();

        let result = NinthEdition::new().validate(&action.into());
        assert_eq!(
            result.errors(),
            ["Action type 'charge' not allowed in 'psychic' phase."]
        );
    }
}

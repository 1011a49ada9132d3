//! Shooting records.

use serde::{Deserialize, Serialize};

use super::{check_count, ActionCommon, StrikeResults, WeaponUse};
use crate::error::SchemaError;
use crate::unit::UnitReference;

/// A unit fired a ranged weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShootBuilder")]
pub struct ShootAction {
    #[serde(flatten)]
    common: ActionCommon,
    #[serde(flatten)]
    weapon: WeaponUse,
    shots: u32,
    #[serde(flatten)]
    results: StrikeResults,
}

impl ShootAction {
    /// Starts building a shooting record of `shots` shots.
    #[must_use]
    pub fn builder(
        common: ActionCommon,
        target: UnitReference,
        weapon_name: impl Into<String>,
        shots: u32,
    ) -> ShootBuilder {
        ShootBuilder {
            common,
            weapon: WeaponUse::new(target, weapon_name),
            shots,
            results: StrikeResults::default(),
        }
    }

    /// Shared action fields.
    #[must_use]
    pub const fn common(&self) -> &ActionCommon {
        &self.common
    }

    /// Target, weapon and dice detail.
    #[must_use]
    pub const fn weapon(&self) -> &WeaponUse {
        &self.weapon
    }

    /// The unit shot at.
    #[must_use]
    pub const fn target(&self) -> &UnitReference {
        &self.weapon.target
    }

    /// Number of shots fired. Always at least 1.
    #[must_use]
    pub const fn shots(&self) -> u32 {
        self.shots
    }

    /// Hit, wound, save, damage and casualty counts.
    #[must_use]
    pub const fn results(&self) -> &StrikeResults {
        &self.results
    }
}

/// Builder for [`ShootAction`]; also the shape shoot documents are read into.
#[derive(Debug, Clone, Deserialize)]
pub struct ShootBuilder {
    #[serde(flatten)]
    common: ActionCommon,
    #[serde(flatten)]
    weapon: WeaponUse,
    shots: u32,
    #[serde(flatten)]
    results: StrikeResults,
}

impl ShootBuilder {
    /// Adds a weapon stat, e.g. `("AP", "-1")`.
    #[must_use]
    pub fn profile(mut self, stat: impl Into<String>, value: impl Into<String>) -> Self {
        self.weapon.weapon_profile.insert(stat.into(), value.into());
        self
    }

    /// Appends an active modifier.
    #[must_use]
    pub fn modifier(mut self, label: impl Into<String>) -> Self {
        self.weapon.modifiers.push(label.into());
        self
    }

    /// Records the raw dice for one step, replacing any earlier dice for it.
    #[must_use]
    pub fn dice(mut self, step: impl Into<String>, rolls: Vec<u8>) -> Self {
        self.weapon.dice_rolls.insert(step.into(), rolls);
        self
    }

    /// Sets the cascade counts.
    #[must_use]
    pub fn results(mut self, results: StrikeResults) -> Self {
        self.results = results;
        self
    }

    /// Checks the structural invariants and produces the action.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for a zero turn, zero shots, or a unit
    /// snapshot with a non-finite position.
    pub fn build(self) -> Result<ShootAction, SchemaError> {
        self.common.check()?;
        check_count("shots", self.shots)?;
        self.weapon.target.check()?;

        Ok(ShootAction {
            common: self.common,
            weapon: self.weapon,
            shots: self.shots,
            results: self.results,
        })
    }
}

impl TryFrom<ShootBuilder> for ShootAction {
    type Error = SchemaError;

    fn try_from(builder: ShootBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(shots: u32) -> ShootBuilder {
        ShootAction::builder(
            ActionCommon::new(1, "shooting", UnitReference::new("Space Marine", "Imperium")),
            UnitReference::new("Ork Boy", "Orks"),
            "Bolt Rifle",
            shots,
        )
    }

    #[test]
    fn zero_shots_is_rejected() {
        assert_eq!(
            builder(0).build().unwrap_err(),
            SchemaError::ZeroCount { field: "shots" }
        );
    }

    #[test]
    fn zero_hits_records_a_whiff() {
        let action = builder(10).build().unwrap();
        assert_eq!(action.results().hits, 0);
        assert_eq!(action.results().damage_dealt, 0);
    }

    #[test]
    fn profile_modifiers_and_dice_are_kept() {
        let action = builder(2)
            .profile("S", "4")
            .profile("AP", "-1")
            .profile("D", "1")
            .modifier("heavy")
            .dice("hit", vec![4, 6])
            .dice("wound", vec![3, 5])
            .dice("save", vec![2])
            .results(StrikeResults::new(2, 2, 1, 1, 0))
            .build()
            .unwrap();

        assert_eq!(action.weapon().weapon_profile["S"], "4");
        assert!(action.weapon().modifiers.contains(&"heavy".to_string()));
        assert_eq!(action.weapon().dice_rolls["hit"], vec![4, 6]);
        assert_eq!(action.target().name, "Ork Boy");
    }

    #[test]
    fn document_is_flat() {
        let action = builder(4)
            .results(StrikeResults::new(3, 2, 2, 12, 2))
            .build()
            .unwrap();
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(json["weapon_name"], "Bolt Rifle");
        assert_eq!(json["shots"], 4);
        assert_eq!(json["damage_dealt"], 12);
        assert_eq!(json["turn"], 1);
        assert!(json.get("weapon").is_none());
        assert!(json.get("results").is_none());
    }
}

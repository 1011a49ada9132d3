//! Movement records.
//!
//! `distance_inches` is the scalar distance a unit travelled and is never
//! negative, even for a fall back. Whether the unit closed on or opened
//! distance to a particular enemy is a separate fact, recorded per target in
//! [`RelativeDistance`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{check_distance, check_finite, ActionCommon};
use crate::error::SchemaError;
use crate::unit::UnitId;

/// Change in distance to one reference unit caused by a move.
///
/// A unit may move 5" and end 3" closer to an enemy: `distance_inches` is
/// 5.0 and `delta_inches` is -3.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeDistance {
    /// The reference unit.
    pub target_unit_id: UnitId,
    /// Name of the reference unit, for readability.
    #[serde(default)]
    pub target_unit_name: Option<String>,
    /// Signed change in distance. Negative means closer.
    pub delta_inches: f64,
    /// Distance to the reference unit after the move.
    #[serde(default)]
    pub final_distance: Option<f64>,
}

impl RelativeDistance {
    /// Records a distance change to a reference unit.
    #[must_use]
    pub fn new(target_unit_id: UnitId, delta_inches: f64) -> Self {
        Self {
            target_unit_id,
            target_unit_name: None,
            delta_inches,
            final_distance: None,
        }
    }

    /// Sets the reference unit's name.
    #[must_use]
    pub fn with_target_name(mut self, name: impl Into<String>) -> Self {
        self.target_unit_name = Some(name.into());
        self
    }

    /// Sets the distance remaining after the move.
    #[must_use]
    pub fn with_final_distance(mut self, inches: f64) -> Self {
        self.final_distance = Some(inches);
        self
    }

    fn check(&self) -> Result<(), SchemaError> {
        check_finite("delta_inches", self.delta_inches)?;
        if let Some(final_distance) = self.final_distance {
            check_distance("final_distance", final_distance)?;
        }
        Ok(())
    }
}

/// A unit moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoveBuilder")]
pub struct MoveAction {
    #[serde(flatten)]
    common: ActionCommon,
    distance_inches: f64,
    start_position: Option<DVec2>,
    end_position: Option<DVec2>,
    is_advance: bool,
    is_fall_back: bool,
    terrain_crossed: Vec<String>,
    relative_distances: Vec<RelativeDistance>,
}

impl MoveAction {
    /// Starts building a move of `distance_inches`.
    #[must_use]
    pub fn builder(common: ActionCommon, distance_inches: f64) -> MoveBuilder {
        MoveBuilder {
            common,
            distance_inches,
            start_position: None,
            end_position: None,
            is_advance: false,
            is_fall_back: false,
            terrain_crossed: Vec::new(),
            relative_distances: Vec::new(),
        }
    }

    /// Builds a plain move with no optional detail.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the turn is 0 or the distance is negative
    /// or not finite.
    pub fn new(common: ActionCommon, distance_inches: f64) -> Result<Self, SchemaError> {
        Self::builder(common, distance_inches).build()
    }

    /// Shared action fields.
    #[must_use]
    pub const fn common(&self) -> &ActionCommon {
        &self.common
    }

    /// Distance travelled, in inches.
    #[must_use]
    pub const fn distance_inches(&self) -> f64 {
        self.distance_inches
    }

    /// Where the move started, if recorded.
    #[must_use]
    pub const fn start_position(&self) -> Option<DVec2> {
        self.start_position
    }

    /// Where the move ended, if recorded.
    #[must_use]
    pub const fn end_position(&self) -> Option<DVec2> {
        self.end_position
    }

    /// True if the unit advanced.
    #[must_use]
    pub const fn is_advance(&self) -> bool {
        self.is_advance
    }

    /// True if the unit fell back.
    #[must_use]
    pub const fn is_fall_back(&self) -> bool {
        self.is_fall_back
    }

    /// Terrain crossed, in the order it was crossed.
    #[must_use]
    pub fn terrain_crossed(&self) -> &[String] {
        &self.terrain_crossed
    }

    /// Per-target distance changes.
    #[must_use]
    pub fn relative_distances(&self) -> &[RelativeDistance] {
        &self.relative_distances
    }
}

/// Builder for [`MoveAction`]; also the shape move documents are read into.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveBuilder {
    #[serde(flatten)]
    common: ActionCommon,
    distance_inches: f64,
    #[serde(default)]
    start_position: Option<DVec2>,
    #[serde(default)]
    end_position: Option<DVec2>,
    #[serde(default)]
    is_advance: bool,
    #[serde(default)]
    is_fall_back: bool,
    #[serde(default)]
    terrain_crossed: Vec<String>,
    #[serde(default)]
    relative_distances: Vec<RelativeDistance>,
}

impl MoveBuilder {
    /// Records the start and end points of the move.
    #[must_use]
    pub fn path(mut self, start: DVec2, end: DVec2) -> Self {
        self.start_position = Some(start);
        self.end_position = Some(end);
        self
    }

    /// Marks the move as an advance.
    #[must_use]
    pub fn advance(mut self) -> Self {
        self.is_advance = true;
        self
    }

    /// Marks the move as a fall back.
    #[must_use]
    pub fn fall_back(mut self) -> Self {
        self.is_fall_back = true;
        self
    }

    /// Appends a crossed terrain feature.
    #[must_use]
    pub fn terrain(mut self, label: impl Into<String>) -> Self {
        self.terrain_crossed.push(label.into());
        self
    }

    /// Appends a per-target distance change.
    #[must_use]
    pub fn relative_distance(mut self, relative: RelativeDistance) -> Self {
        self.relative_distances.push(relative);
        self
    }

    /// Checks the structural invariants and produces the action.
    ///
    /// Advancing and falling back together is structurally representable;
    /// editions reject it during validation.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for a zero turn, a negative or non-finite
    /// distance, or a malformed relative distance.
    pub fn build(self) -> Result<MoveAction, SchemaError> {
        self.common.check()?;
        check_distance("distance_inches", self.distance_inches)?;
        for position in self.start_position.iter().chain(self.end_position.iter()) {
            check_finite("position", position.x)?;
            check_finite("position", position.y)?;
        }
        for relative in &self.relative_distances {
            relative.check()?;
        }

        Ok(MoveAction {
            common: self.common,
            distance_inches: self.distance_inches,
            start_position: self.start_position,
            end_position: self.end_position,
            is_advance: self.is_advance,
            is_fall_back: self.is_fall_back,
            terrain_crossed: self.terrain_crossed,
            relative_distances: self.relative_distances,
        })
    }
}

impl TryFrom<MoveBuilder> for MoveAction {
    type Error = SchemaError;

    fn try_from(builder: MoveBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitReference;

    fn common() -> ActionCommon {
        ActionCommon::new(1, "movement", UnitReference::new("Squad A", "Marines"))
    }

    #[test]
    fn zero_distance_is_stationary() {
        let action = MoveAction::new(common(), 0.0).unwrap();
        assert_eq!(action.distance_inches(), 0.0);
    }

    #[test]
    fn fractional_distance_is_preserved() {
        let action = MoveAction::new(common(), 6.283).unwrap();
        assert_eq!(action.distance_inches(), 6.283);
    }

    #[test]
    fn negative_distance_is_rejected() {
        let err = MoveAction::new(common(), -1.0).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NegativeDistance {
                field: "distance_inches",
                value: -1.0
            }
        );
    }

    #[test]
    fn infinite_distance_is_rejected() {
        assert!(MoveAction::new(common(), f64::INFINITY).is_err());
    }

    #[test]
    fn relative_distance_may_be_negative() {
        let target = UnitId::new();
        let action = MoveAction::builder(common(), 6.0)
            .relative_distance(
                RelativeDistance::new(target, -4.0)
                    .with_target_name("Enemy Squad")
                    .with_final_distance(8.0),
            )
            .build()
            .unwrap();

        assert_eq!(action.relative_distances().len(), 1);
        assert_eq!(action.relative_distances()[0].delta_inches, -4.0);
        assert_eq!(action.relative_distances()[0].target_unit_id, target);
    }

    #[test]
    fn negative_final_distance_is_rejected() {
        let err = MoveAction::builder(common(), 6.0)
            .relative_distance(RelativeDistance::new(UnitId::new(), -4.0).with_final_distance(-1.0))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::NegativeDistance {
                field: "final_distance",
                ..
            }
        ));
    }

    #[test]
    fn both_flags_build() {
        let action = MoveAction::builder(common(), 6.0)
            .advance()
            .fall_back()
            .build()
            .unwrap();
        assert!(action.is_advance());
        assert!(action.is_fall_back());
    }

    #[test]
    fn terrain_keeps_order() {
        let action = MoveAction::builder(common(), 6.5)
            .terrain("ruins")
            .terrain("crater")
            .build()
            .unwrap();
        assert_eq!(action.terrain_crossed(), ["ruins", "crater"]);
    }

    #[test]
    fn path_serializes_as_pairs() {
        let action = MoveAction::builder(common(), 5.0)
            .path(DVec2::new(1.0, 2.0), DVec2::new(4.0, 6.0))
            .build()
            .unwrap();
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["start_position"], serde_json::json!([1.0, 2.0]));
        assert_eq!(json["end_position"], serde_json::json!([4.0, 6.0]));
    }
}

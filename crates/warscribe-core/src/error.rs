//! Error types for warscribe-core.
//!
//! Construction and document loading fail with typed errors rather than
//! producing partially valid values:
//!
//! - [`SchemaError`]: a structural field invariant was broken while building
//!   an action (negative distance, zero shots, malformed charge roll, ...).
//! - [`TranscriptError`]: a transcript document could not be read or written.
//! - [`EditionError`]: an edition's phase sequence or rules config is malformed.
//!
//! Rule judgments are *not* errors. Validation always produces a
//! [`ValidationResult`](crate::edition::ValidationResult).

/// A structural invariant of an action was violated.
///
/// Raised by every action builder and, through serde `try_from`, by
/// deserialization of action documents.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Turn numbers start at 1.
    #[error("turn must be at least 1, got {0}")]
    TurnOutOfRange(u32),

    /// A distance field was below zero.
    #[error("{field} cannot be negative, got {value}")]
    NegativeDistance {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A numeric field held NaN or infinity.
    #[error("{field} must be a finite number")]
    NonFiniteValue {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A count that must be at least one was zero.
    #[error("{field} must be at least 1")]
    ZeroCount {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A charge roll did not consist of exactly two dice.
    #[error("charge roll must be exactly 2 dice, got {count}")]
    ChargeRollArity {
        /// Number of dice supplied.
        count: usize,
    },

    /// A die result outside 1-6.
    #[error("die value {value} is outside 1-6")]
    DieOutOfRange {
        /// The rejected die value.
        value: u8,
    },

    /// A charge declared no targets.
    #[error("a charge needs at least one target")]
    NoChargeTargets,
}

/// Errors raised while reading or writing a transcript document.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// The document was not valid JSON, did not match the transcript shape,
    /// or contained an action that failed its schema checks.
    #[error("transcript document error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while assembling an edition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditionError {
    /// An edition must define at least one phase.
    #[error("phase sequence is empty")]
    EmptyPhaseSequence,

    /// Two phases share a name.
    #[error("duplicate phase name '{0}'")]
    DuplicatePhaseName(String),

    /// Two phases share an order value.
    #[error("phases '{first}' and '{second}' share order {order}")]
    DuplicatePhaseOrder {
        /// Phase that claimed the order first.
        first: String,
        /// Phase that collided with it.
        second: String,
        /// The contested order value.
        order: u32,
    },

    /// A rules config could not be parsed or held out-of-range values.
    #[error("invalid rules config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_messages_name_the_field() {
        let err = SchemaError::NegativeDistance {
            field: "distance_inches",
            value: -1.5,
        };
        assert_eq!(err.to_string(), "distance_inches cannot be negative, got -1.5");

        let err = SchemaError::ZeroCount { field: "shots" };
        assert_eq!(err.to_string(), "shots must be at least 1");
    }

    #[test]
    fn charge_roll_errors() {
        assert_eq!(
            SchemaError::ChargeRollArity { count: 3 }.to_string(),
            "charge roll must be exactly 2 dice, got 3"
        );
        assert_eq!(
            SchemaError::DieOutOfRange { value: 7 }.to_string(),
            "die value 7 is outside 1-6"
        );
    }

    #[test]
    fn transcript_error_wraps_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TranscriptError::from(json_err);
        assert!(err.to_string().starts_with("transcript document error"));
    }

    #[test]
    fn edition_error_duplicate_order() {
        let err = EditionError::DuplicatePhaseOrder {
            first: "movement".into(),
            second: "psychic".into(),
            order: 1,
        };
        assert_eq!(
            err.to_string(),
            "phases 'movement' and 'psychic' share order 1"
        );
    }
}

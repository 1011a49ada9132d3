//! Cross-module test suite.
//!
//! - `helpers.rs`: unit, action and transcript factories, tracing setup
//! - `integration.rs`: record-then-judge flows across transcripts, editions
//!   and the registry
//! - `properties.rs`: proptest properties for document round trips and the
//!   validation rules

mod helpers;

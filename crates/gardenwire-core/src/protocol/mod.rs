//! Garden telemetry payload decoding.
//!
//! The format follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe byte access and endianness conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors and warnings
//!
//! The parser is pure and contains no I/O; transports and presentation
//! live in the CLI crate. A payload is a fixed 9-byte header (sample
//! timestamp plus four sensor fields and the initial watering state)
//! followed by a run of 2-byte durations between watering state changes.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::decode_reading;

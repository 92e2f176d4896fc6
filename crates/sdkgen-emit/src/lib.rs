//! Content builders for every generated artifact shape.
//!
//! Builders are pure functions from the loaded model to a `String`; they
//! perform no I/O and make no placement decisions. The synthesizer alone
//! decides whether a proposed artifact is actually written, so each builder
//! here is unit-testable against expected text without touching a
//! filesystem.

pub mod menu;
pub mod project;
pub mod toolchain;

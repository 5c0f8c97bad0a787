//! End-to-end test support for the neurotempo engine.
//!
//! The journey tests under `tests/journeys/` drive the public API the way a
//! monitoring pipeline would. Shared scenario builders live in [`fixtures`].

pub mod fixtures;

//! Staffing and scheduling engine for academic course sections.
//!
//! The `scheduling` module is the framework-agnostic core: an in-memory
//! entity store, the assignment validator, the conflict detector, the
//! classification engine, and read-only filtered views. `roster` is the
//! batch-import glue feeding it, and `config`/`telemetry`/`error` carry
//! the application plumbing shared with the API service.

pub mod config;
pub mod error;
pub mod roster;
pub mod scheduling;
pub mod telemetry;

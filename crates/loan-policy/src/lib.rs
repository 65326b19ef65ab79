//! Loan underwriting policy engine and the ambient plumbing (configuration,
//! telemetry, application errors) used by its front ends.

pub mod config;
pub mod error;
pub mod policy;
pub mod telemetry;

pub use policy::{Application, BureauReport, Decision, PolicyConfig, PolicyEngine, PolicyResult};

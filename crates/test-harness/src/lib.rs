//! Test harness for intersection geometry.
//!
//! Provides fixture builders, verification oracles and diagnostic assertions
//! for scripting end-to-end intersection scenarios.
//!
//! # Key Components
//!
//! - [`helpers`]: Error type, mesh and polyline fixtures, point-on-triangle math
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`assertions`]: Rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;

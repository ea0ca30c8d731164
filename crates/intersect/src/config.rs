//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GeomError, Result};
use crate::Tolerance;

/// Settings consumed by [`DefaultIntersectionEngine`](crate::DefaultIntersectionEngine).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Coincidence tolerance shared by every operation.
    pub tolerance: Tolerance,
    /// Line intersections must fall within both segments, not on their infinite extensions.
    pub segment_only: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            segment_only: true,
        }
    }
}

impl EngineConfig {
    /// Tight tolerance for exact, well-conditioned input.
    pub fn precise() -> Self {
        Self {
            tolerance: Tolerance::new(1e-9),
            ..Self::default()
        }
    }

    /// Loose tolerance for tessellated or noisy input.
    pub fn coarse() -> Self {
        Self {
            tolerance: Tolerance::new(1e-4),
            ..Self::default()
        }
    }

    /// Parse from JSON. Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GeomError::Config(e.to_string()))?;
        config.tolerance.validate()?;
        Ok(config)
    }

    pub fn tol(&self) -> f64 {
        self.tolerance.coincidence
    }
}

use thiserror::Error;

/// Malformed-input failures.
///
/// Geometric degeneracies are not errors; they are reported as `None` or an
/// empty collection by the operation itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    #[error("expected a {expected}D point, got {found} coordinates")]
    Dimension { expected: usize, found: usize },

    #[error("missing {which} endpoint")]
    MissingEndpoint { which: &'static str },

    #[error("vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: usize, vertex_count: usize },

    #[error("tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    #[error("invalid engine configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GeomError>;

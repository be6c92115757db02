use serde::Serialize;
use thiserror::Error;

/// Why a statistic has no value.
///
/// This is never fatal: it takes the place of the value in the result and
/// shows up as an empty cell, never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum NotComputable {
    #[error("no values")]
    NoValues,

    #[error("{found} qualifying positions, at least {required} needed")]
    InsufficientData { found: usize, required: usize },

    #[error("zero variance")]
    ZeroVariance,

    #[error("at least one bin is needed")]
    NoBins,
}

use thiserror::Error;

/// Invalid static configuration. Raised at construction, never mid-match.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("degenerate movement bounds on {axis} axis: min {min} > max {max}")]
    DegenerateBounds { axis: char, min: f32, max: f32 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },

    #[error("{what} must lie in {min}..={max}, got {value}")]
    OutOfRange {
        what: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("goal mouth {top}..{bottom} is not strictly inside the field side {field_top}..{field_bottom}")]
    GoalOutsideField {
        top: f32,
        bottom: f32,
        field_top: f32,
        field_bottom: f32,
    },
}

/// External position sensor failures. Always recoverable: the affected
/// paddle passes its raw deltas through instead.
#[derive(Error, Debug)]
pub enum SensorError {
    #[error("sensor unavailable: {0}")]
    Unavailable(String),

    #[error("sensor read failed: {0}")]
    ReadFailed(String),

    #[error("failed to spawn sensor worker")]
    WorkerSpawn(#[from] std::io::Error),
}

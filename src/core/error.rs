use thiserror::Error;

/// Setup-time faults.
///
/// Nothing in the per-tick path returns these: a missing ray hit is "no
/// collision", not an error. Everything here is raised while building the
/// world so malformed geometry never reaches the tick loop.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("body {width}x{height} is too small: both dimensions must exceed {min} (4x skin width)")]
    BodyTooSmall { width: f32, height: f32, min: f32 },

    #[error("{axis} ray count {count} is below 2 (dimension {dimension}, ray spacing {spacing})")]
    TooFewRays {
        axis: &'static str,
        count: i64,
        dimension: f32,
        spacing: f32,
    },

    #[error("{axis} ray count {count} exceeds {max} (dimension {dimension}, ray spacing {spacing})")]
    TooManyRays {
        axis: &'static str,
        count: f32,
        max: usize,
        dimension: f32,
        spacing: f32,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("invalid platform: {0}")]
    InvalidPlatform(String),

    #[error("unknown collision layer '{0}'")]
    UnknownLayer(String),

    #[error("unknown body id {0}")]
    UnknownBody(u32),

    #[error("unknown collider id {0}")]
    UnknownCollider(u32),

    #[error("level bundle: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Invalid viewport {width}x{height}: both duelists must fit between the margins")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Tuning parse error: {0}")]
    TuningParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;

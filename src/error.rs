use egui::ecolor::ParseHexColorError;
use thiserror::Error;

/// Errors raised while validating wheel configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Spin duration must be greater than zero")]
    ZeroSpinDuration,

    #[error("Wheel size must be a positive, finite number of pixels (got {0})")]
    InvalidWheelSize(f32),
}

/// Errors raised while parsing palette colours
#[derive(Debug, Error, PartialEq)]
pub enum PaletteError {
    #[error("Invalid colour '{value}': expected #RRGGBB ({reason:?})")]
    InvalidHex {
        value: String,
        reason: ParseHexColorError,
    },
}

/// Errors that can occur while exporting or importing a wheel
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize wheel: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access wheel file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid wheel data: {0}")]
    InvalidData(String),
}

/// Errors raised while opening the audio output
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No audio output device available")]
    NoDevice,

    #[error("Failed to query audio output config: {0}")]
    ConfigError(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to build audio stream: {0}")]
    StreamBuildError(String),

    #[error("Failed to start audio stream: {0}")]
    StreamPlayError(String),
}

/// Top-level error for the wheel crate
#[derive(Debug, Error)]
pub enum WheelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

pub type WheelResult<T> = Result<T, WheelError>;

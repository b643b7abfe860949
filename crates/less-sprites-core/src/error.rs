use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("Invalid spec {}: {reason}", .path.display())]
    InvalidSpec { path: PathBuf, reason: String },
    #[error("No valid source files were provided in {}", .dir.display())]
    NoSourceFiles { dir: PathBuf },
    #[error("Source file \"{}\" does not exist", .path.display())]
    MissingSourceFile { path: PathBuf },
    #[error("Image error for {}: {message}", .path.display())]
    Imaging { path: PathBuf, message: String },
    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpriteError {
    /// Process exit code for this failure, stable for scripts.
    pub fn exit_code(&self) -> u8 {
        match self {
            SpriteError::InvalidSpec { .. } => 1,
            SpriteError::NoSourceFiles { .. } => 2,
            SpriteError::MissingSourceFile { .. } => 3,
            SpriteError::Imaging { .. } => 4,
            SpriteError::OutputWrite { .. } => 5,
        }
    }

    pub(crate) fn invalid_spec(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SpriteError::InvalidSpec {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn imaging(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        SpriteError::Imaging {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// I/O failures while saving are write errors, everything else is imaging.
    pub(crate) fn from_encode(path: impl Into<PathBuf>, err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(source) => SpriteError::OutputWrite {
                path: path.into(),
                source,
            },
            other => SpriteError::Imaging {
                path: path.into(),
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, SpriteError>;

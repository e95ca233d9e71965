//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, image codec, PDF and JSON errors, and provides semantic
//! variants for the validation failures the tools report to the user.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Layout file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Could not load background template at {path:?}: {reason}")]
    TemplateUnavailable { path: PathBuf, reason: String },

    #[error("No images selected")]
    NoInputs,

    #[error("Please add at least one card")]
    NoCards,

    #[error("No copies selected")]
    NoCopies,

    #[error("None of the {failed} selected card file(s) could be decoded")]
    NoDecodableCards { failed: usize },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },
}

impl Error {
    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Error::Decode {
            path: path.into(),
            source,
        }
    }

    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }
}

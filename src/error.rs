//! Avatar-specific errors
//!
//! Every failure of a batch ends up as one of these and stops the run.
use std::path::PathBuf;

use thiserror::Error;

/// An error that generating avatars could end up producing.
///
/// There are a few families of errors:
/// - related to the _style schema_ and the synthesis of options
/// - related to the filesystem
/// - related to rendering and encoding the avatars
#[derive(Debug, Error)]
pub enum AvatarError {
    /// `{0}` is the name of the property, which does not have a list of candidates as default.
    #[error("Don't know how to handle property `{0}`")]
    UnsupportedProperty(String),
    /// `{0}` is the name of the property.
    #[error("Property `{0}` has no candidate values to pick from")]
    EmptyCandidates(String),
    #[error("Invalid style schema: {0}")]
    InvalidSchema(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not {action} `{path:?}`: {source}")]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not render avatar with seed {seed:?}: {reason}")]
    Render { seed: String, reason: String },
    #[error("invalid avatar markup: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("cannot rasterize an avatar of {0}x{0} pixels")]
    EmptyImage(u32),
    #[error("could not encode avatar: {0}")]
    Encode(#[from] image::ImageError),
}

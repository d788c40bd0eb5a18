//! Error types for the rendering core
//!
//! Every variant is fatal to the render attempt it occurred in; there is no
//! partial or degraded image output. Routine per-pixel out-of-bounds
//! conditions are not errors and never reach this type.

use std::path::PathBuf;

use thiserror::Error;

use crate::points::ProviderError;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Invalid canvas or field-of-view configuration, raised at construction.
    #[error("invalid map configuration: {0}")]
    Configuration(String),

    /// A point referenced a color tag the palette does not know.
    #[error("unrecognized marker color {0:?}")]
    InvalidColorKind(String),

    /// The upstream point-list query failed; the renderer is never
    /// constructed in this case.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The save step failed. Not retried.
    #[error("failed to save image {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

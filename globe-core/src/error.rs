/// Error types for globe setup and texture loading
use thiserror::Error;

/// Failures that prevent the 3D globe from being shown.
///
/// None of these surface to the user; they select the CSS fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlobeError {
    #[error("WebGL2 is not available on this canvas")]
    ContextUnavailable,

    #[error("Shader compilation failed: {0}")]
    Shader(String),

    #[error("Program link failed: {0}")]
    Program(String),

    #[error("Failed to allocate GPU resource: {0}")]
    Resource(&'static str),

    #[error("Texture upload failed: {0}")]
    TextureUpload(String),

    #[error("DOM access failed: {0}")]
    Dom(String),
}

/// Failure reported by the host while fetching the night texture.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextureError {
    #[error("Failed to load texture from {url}")]
    LoadFailed { url: String },

    #[error(transparent)]
    Upload(#[from] GlobeError),
}

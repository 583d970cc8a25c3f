use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid font data: {0}")]
    InvalidFont(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

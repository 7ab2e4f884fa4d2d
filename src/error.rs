use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeedViewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse font data from {source_name}")]
    FontLoad { source_name: String },

    #[error("no usable font found (tried {})", join_paths(.tried))]
    NoFont { tried: Vec<PathBuf> },

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SpeedViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ttf");
        let err: SpeedViewError = io.into();
        assert!(matches!(err, SpeedViewError::Io(_)));
        assert!(err.to_string().contains("missing.ttf"));
    }

    #[test]
    fn no_font_lists_candidates() {
        let err = SpeedViewError::NoFont {
            tried: vec![PathBuf::from("/a.ttf"), PathBuf::from("/b.ttf")],
        };
        assert_eq!(
            err.to_string(),
            "no usable font found (tried /a.ttf, /b.ttf)"
        );
    }
}

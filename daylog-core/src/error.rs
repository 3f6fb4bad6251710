use std::{io, path::PathBuf};

/// Errors raised by the file layer and by logger setup.
///
/// The dispatcher never hands these to a caller of a log function; they are
/// reported on the console sink instead.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("log directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),
    #[error("file system error on {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to resolve executable location: {0}")]
    PathResolution(#[source] io::Error),
    #[error("global logger is already initialized")]
    AlreadyInitialized,
}

impl LogError {
    pub(crate) fn file_system(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// True for failures of the file sink (missing directory, open or write errors).
    pub fn is_file_system(&self) -> bool {
        matches!(self, Self::MissingDirectory(_) | Self::FileSystem { .. })
    }
}

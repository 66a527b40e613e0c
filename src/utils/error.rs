// src/utils/error.rs
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error("{}: expected a mapping at the document root, found {}", .path.display(), .found)]
    InvalidShape { path: PathBuf, found: &'static str },
    #[error("{0}")]
    Msg(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[macro_export]
macro_rules! err {
    ($msg:literal $(,)?) => {
        $crate::utils::error::Error::Msg($msg.to_string())
    };
    ($err_expr:expr $(,)?) => {
        $crate::utils::error::Error::Msg($err_expr.into())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::error::Error::Msg(format!($fmt, $($arg)*))
    };
}

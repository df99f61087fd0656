use std::path::PathBuf;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the application
#[derive(Debug)]
pub enum Error {
    /// A declared type falls into a category that has no client-specification
    /// representation (function types, the never type, opaque types, ...)
    UnsupportedType {
        declaration: String,
        category: String,
    },
    /// A handler's routing decoration could not be reduced to a single HTTP
    /// method and path
    UnroutableHandler { handler: String, reason: String },
    /// Visiting logic was invoked on a declaration that is not class-shaped
    NotAController(String),
    Io(std::io::Error),
    Parse { file: PathBuf, message: String },
    Serialization(String),
}

impl Error {
    /// Attach the name of the declaration being processed to an error raised
    /// below it. Only fills the slot if nothing more specific was recorded.
    pub fn locate(self, declaration: &str) -> Self {
        match self {
            Error::UnsupportedType {
                declaration: d,
                category,
            } if d.is_empty() => Error::UnsupportedType {
                declaration: declaration.to_string(),
                category,
            },
            Error::UnroutableHandler { handler, reason } if handler.is_empty() => {
                Error::UnroutableHandler {
                    handler: declaration.to_string(),
                    reason,
                }
            }
            other => other,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::UnsupportedType {
                declaration,
                category,
            } => {
                if declaration.is_empty() {
                    write!(f, "cannot represent {} in a client specification", category)
                } else {
                    write!(
                        f,
                        "cannot represent {} in a client specification (while processing {})",
                        category, declaration
                    )
                }
            }
            Error::UnroutableHandler { handler, reason } => {
                write!(f, "handler {} cannot be routed: {}", handler, reason)
            }
            Error::NotAController(name) => write!(f, "{} is not a controller class", name),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Parse { file, message } => {
                write!(f, "parse error in {}: {}", file.display(), message)
            }
            Error::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON serialization failed: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(format!("YAML serialization failed: {}", err))
    }
}

impl From<syn::Error> for Error {
    fn from(err: syn::Error) -> Self {
        Error::Parse {
            file: PathBuf::from("<unknown>"),
            message: err.to_string(),
        }
    }
}

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pxedit operations
#[derive(Error, Diagnostic, Debug)]
pub enum EditError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pxedit::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pxedit::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pxedit::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Import rejected: {message}")]
    #[diagnostic(code(pxedit::import))]
    Import {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Store error for '{key}': {message}")]
    #[diagnostic(code(pxedit::store))]
    Store { key: String, message: String },

    #[error("Export error: {message}")]
    #[diagnostic(code(pxedit::export))]
    Export {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl EditError {
    /// Shorthand for an import rejection without help text.
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditError>;

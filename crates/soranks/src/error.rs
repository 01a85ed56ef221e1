/// Exit code shared by every fatal configuration or retrieval failure
pub const EXIT_FATAL: i32 = 5;

#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Publish requires mdrsp!!")]
    PublishRequiresMarkdown,

    #[error("{0}")]
    InvalidLocation(#[from] soranks_core::ranks::RankError),

    #[error("Can't decode json file {path}: {reason}")]
    SourceFile { path: String, reason: String },

    #[error("Max retry number reached after {0} failed requests")]
    RetriesExhausted(u32),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Can't write {path}: {reason}")]
    Write { path: String, reason: String },
}

impl Error {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::PublishRequiresMarkdown
            | Error::InvalidLocation(_)
            | Error::SourceFile { .. }
            | Error::RetriesExhausted(_) => EXIT_FATAL,
            Error::Network(_) | Error::Decode(_) | Error::Write { .. } => 1,
        }
    }
}

use std::{io, path::PathBuf, time::Duration};

/// A problem with the invocation's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing github token")]
    MissingToken,
    #[error("include or exclude must be set")]
    MissingPatterns,
    #[error("DRONE_OUTPUT is unset")]
    MissingOutput,
    #[error("DRONE_COMMIT_BEFORE is unset")]
    MissingCommitBefore,
    #[error("DRONE_COMMIT_AFTER is unset")]
    MissingCommitAfter,
    #[error("DRONE_REPO is unset")]
    MissingRepo,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}", join(.0))]
    Invalid(Vec<ValidationError>),

    #[error("github token contains invalid header characters")]
    InvalidToken,

    #[error("failed to build the github client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("github request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("github responded with {status}: {message}")]
    Provider {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("listing changed files timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to write to {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Every message carried by the error, one per line of output.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Error::Invalid(errors) => errors.iter().map(ToString::to_string).collect(),
            error => vec![error.to_string()],
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

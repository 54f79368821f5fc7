use std::io;

/// Errors produced while resolving or running a ReCpp build configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("invalid build option `{0}`, expected NAME=VALUE")]
    InvalidOption(String),

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The test process ran and exited unsuccessfully.
    #[error("test command `{command}` failed with exit code {code}")]
    TestFailed { command: String, code: i32 },
}

impl Error {
    /// Exit code of a failed test process, if this error carries one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::TestFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Errors surfaced by the packet client and its commands.
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can end a `packet` invocation early.
#[derive(Debug, Error)]
pub enum PacketError {
    /// `PACKET_TOKEN` is unset or empty.
    #[error("Please set the PACKET_TOKEN environment variable to your packet session cookie.")]
    MissingToken,

    /// `PACKET_ORDER` (or `--order`) holds an unknown value.
    #[error("Unknown packet order '{0}', expected 'listed' or 'newest'.")]
    InvalidOrder(String),

    /// `PACKET_SERVER` (or `--server`) is not a usable base URL.
    #[error("Invalid packet server address: {0}")]
    InvalidServer(String),

    /// The token cannot be sent as a cookie header.
    #[error(
        "The PACKET_TOKEN environment variable contains characters that cannot be sent in a cookie."
    )]
    InvalidToken,

    /// The server answered with a redirect, which it does for unauthenticated sessions.
    #[error("The server did not accept the token in the PACKET_TOKEN environment variable.")]
    AuthRejected,

    /// Any non-200 status that is not a redirect.
    #[error("The API call to the server failed.")]
    Api {
        status: StatusCode,
        /// The `description` field of the error body, when the server sent one.
        description: Option<String>,
    },

    /// A 200 response whose body did not match the expected shape.
    #[error("The server sent an unexpected response for {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl PacketError {
    /// Return the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingToken
            | Self::InvalidOrder(_)
            | Self::InvalidServer(_)
            | Self::InvalidToken => 2,
            Self::AuthRejected => 3,
            Self::Api { .. }
            | Self::MalformedResponse { .. }
            | Self::Transport(_)
            | Self::Output(_) => 1,
        }
    }

    /// Extra detail printed below the main message, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Api { description, .. } => description.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T, E = PacketError> = std::result::Result<T, E>;

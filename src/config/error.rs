use anyerror::AnyError;

/// Error variants related to configuration.
#[derive(Debug, thiserror::Error)]
#[derive(PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to parse configuration from command-line arguments.
    #[error("ParseError: {source} while parsing ({args:?})")]
    ParseError {
        /// The underlying parse error.
        source: AnyError,
        /// The arguments that failed to parse.
        args: Vec<String>,
    },

    /// The snapshot trigger channel must be able to hold at least one trigger.
    #[error("snapshot_channel_size must be > 0")]
    SnapshotChannelSizeIs0,

    /// Invalid index encoding string.
    #[error("index encoding string is invalid: '{invalid:?}' expect: '{syntax}'")]
    InvalidIndexEncoding {
        /// The invalid encoding string provided.
        invalid: String,
        /// The expected syntax format.
        syntax: String,
    },
}

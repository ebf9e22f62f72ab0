//! Runtime configuration of append-result handling.

use anyerror::AnyError;
use clap::Parser;

use crate::config::error::ConfigError;
use crate::IndexEncoding;

fn parse_index_encoding(src: &str) -> Result<IndexEncoding, ConfigError> {
    match src {
        "compact" => Ok(IndexEncoding::Compact),
        "fixed" => Ok(IndexEncoding::Fixed),
        _ => Err(ConfigError::InvalidIndexEncoding {
            syntax: "compact|fixed".to_string(),
            invalid: src.to_string(),
        }),
    }
}

/// The runtime configuration for the follower evaluator and the leader reconciler.
///
/// `index_encoding` must be the same on every node of a cluster: the encoding is not recorded in
/// the wire bytes.
#[derive(Clone, Debug, Parser)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Config {
    /// Whether a leader skips back over a follower's whole conflicting term in one round trip.
    ///
    /// If disabled, a leader retries one index before the reported conflict.
    #[clap(long, env = "RAFT_FAST_REWIND", default_value = "true", action = clap::ArgAction::Set)]
    pub fast_rewind: bool,

    /// The wire layout of the index of an append result: `compact` or `fixed`.
    ///
    /// The codec does not read it: the transport passes it to `AppendResult::encode` and
    /// `AppendResult::decode`.
    #[clap(
        long,
        env = "RAFT_INDEX_ENCODING",
        default_value = "compact",
        value_parser = parse_index_encoding
    )]
    pub index_encoding: IndexEncoding,

    /// The capacity of the channel that delivers snapshot triggers to the InstallSnapshot task.
    #[clap(long, env = "RAFT_SNAPSHOT_CHANNEL_SIZE", default_value = "1024")]
    pub snapshot_channel_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        <Self as Parser>::parse_from(Vec::<&'static str>::new())
    }
}

impl Config {
    /// Build a `Config` instance from a series of command line arguments.
    ///
    /// The first element in `args` must be the application name.
    pub fn build(args: &[&str]) -> Result<Config, ConfigError> {
        let config = <Self as Parser>::try_parse_from(args).map_err(|e| ConfigError::ParseError {
            source: AnyError::new(&e),
            args: args.iter().map(|x| x.to_string()).collect(),
        })?;
        config.validate()
    }

    /// Validate the state of this config.
    pub fn validate(self) -> Result<Config, ConfigError> {
        if self.snapshot_channel_size == 0 {
            return Err(ConfigError::SnapshotChannelSizeIs0);
        }

        Ok(self)
    }
}

#![doc = include_str!("../README.md")]
#![allow(clippy::bool_assert_comparison)]
#![deny(unused_qualifications)]

//! # Feature flags
//!
//! - `serde`: Add serde::Serialize and serde:Deserialize to data types. If you'd like to use
//!   `serde` to store or transfer them in a format other than the wire encoding of
//!   [`AppendResult`].

mod append_result;
mod config;
mod display_ext;
mod log_id;
mod progress;

pub mod engine;
pub mod errors;
pub mod storage;
pub mod testing;


pub use anyerror;
pub use anyerror::AnyError;

pub use crate::append_result::AppendResult;
pub use crate::append_result::IndexEncoding;
pub use crate::config::Config;
pub use crate::config::ConfigError;
pub use crate::engine::evaluate;
pub use crate::engine::reconcile;
pub use crate::engine::NextAction;
pub use crate::log_id::LogId;
pub use crate::log_id::LogIndex;
pub use crate::log_id::Term;
pub use crate::progress::ProgressEntry;
pub use crate::progress::ProgressTable;
pub use crate::progress::SnapshotTrigger;
pub use crate::storage::LogIdList;
pub use crate::storage::LogReader;

/// The id of a raft node.
pub type NodeId = u64;

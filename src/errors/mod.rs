//! Error types of the append-result protocol.
//!
//! Every outcome of AppendEntries processing is an [`AppendResult`](crate::AppendResult), not an
//! error. The errors here are about malformed bytes and peers that break the protocol.

mod decode_error;
mod encode_error;
mod protocol_violation;
mod reconcile_error;

pub use decode_error::DecodeError;
pub use encode_error::EncodeError;
pub use protocol_violation::ProtocolViolation;
pub use protocol_violation::ViolationKind;
pub use reconcile_error::ReconcileError;

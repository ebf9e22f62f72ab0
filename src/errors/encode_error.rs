use crate::LogIndex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The wire form carries a signed 64-bit index.
    #[error("log index {0} does not fit in a signed 64-bit integer")]
    IndexOverflow(LogIndex),
}

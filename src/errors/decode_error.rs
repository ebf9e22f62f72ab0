/// Malformed wire bytes of an [`AppendResult`](crate::AppendResult).
///
/// A decode error is never a failed append: it means the bytes can not be trusted at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated append result: need {needed} bytes, only {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("invalid success flag: {0}, expect 0 or 1")]
    InvalidBool(u8),

    #[error("invalid compact integer length: {0}, expect 0..=8")]
    InvalidIntLength(u8),

    #[error("negative log index: {0}")]
    NegativeIndex(i64),
}

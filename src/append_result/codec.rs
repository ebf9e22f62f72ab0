use bytes::Buf;
use bytes::BufMut;

use crate::errors::DecodeError;
use crate::errors::EncodeError;
use crate::AppendResult;
use crate::LogIndex;

/// How the index of an [`AppendResult`] is laid out on the wire.
///
/// Both ends of a connection have to agree on it; it is not recorded in the bytes.
#[derive(Debug, Clone, Copy, Default)]
#[derive(PartialEq, Eq)]
#[derive(derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum IndexEncoding {
    /// A length byte `n` in `0..=8`, followed by the `n` significant big-endian bytes.
    #[default]
    #[display(fmt = "compact")]
    Compact,

    /// 8 big-endian bytes.
    #[display(fmt = "fixed")]
    Fixed,
}

/// Size of the leading success flag.
const FLAG_LEN: usize = 1;

/// Size of the length prefix of a compact integer.
const COMPACT_PREFIX_LEN: usize = 1;

const FIXED_LEN: usize = 8;

/// Number of significant bytes of `v`, `0` for `0`.
fn compact_len(v: u64) -> usize {
    ((64 - v.leading_zeros()) as usize + 7) / 8
}

fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), DecodeError> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(DecodeError::Truncated { needed, remaining });
    }
    Ok(())
}

impl AppendResult {
    /// Number of bytes [`Self::encode`] writes.
    pub fn encoded_len(&self, encoding: IndexEncoding) -> usize {
        let index_len = match encoding {
            IndexEncoding::Compact => COMPACT_PREFIX_LEN + compact_len(self.index()),
            IndexEncoding::Fixed => FIXED_LEN,
        };
        FLAG_LEN + index_len
    }

    /// Write the success flag and the index to `buf`.
    ///
    /// `non_matching_term` is not written. Nothing is written if an error is returned.
    pub fn encode<B: BufMut>(&self, buf: &mut B, encoding: IndexEncoding) -> Result<(), EncodeError> {
        let index = self.index();
        let signed = i64::try_from(index).map_err(|_| EncodeError::IndexOverflow(index))?;

        buf.put_u8(self.is_success() as u8);

        match encoding {
            IndexEncoding::Compact => {
                let n = compact_len(index);
                buf.put_u8(n as u8);
                buf.put_uint(index, n);
            }
            IndexEncoding::Fixed => {
                buf.put_i64(signed);
            }
        }

        Ok(())
    }

    /// Read an `AppendResult` from the front of `buf`.
    ///
    /// Bytes following the result are left in `buf`. A decoded conflict never has a
    /// `non_matching_term`.
    pub fn decode<B: Buf>(buf: &mut B, encoding: IndexEncoding) -> Result<Self, DecodeError> {
        ensure_remaining(buf, FLAG_LEN)?;
        let success = match buf.get_u8() {
            0 => false,
            1 => true,
            x => return Err(DecodeError::InvalidBool(x)),
        };

        let raw = match encoding {
            IndexEncoding::Compact => {
                ensure_remaining(buf, COMPACT_PREFIX_LEN)?;
                let n = buf.get_u8();
                if n as usize > FIXED_LEN {
                    return Err(DecodeError::InvalidIntLength(n));
                }

                ensure_remaining(buf, n as usize)?;
                buf.get_uint(n as usize)
            }
            IndexEncoding::Fixed => {
                ensure_remaining(buf, FIXED_LEN)?;
                buf.get_u64()
            }
        };

        let signed = raw as i64;
        if signed < 0 {
            return Err(DecodeError::NegativeIndex(signed));
        }
        let index = signed as LogIndex;

        let res = match (success, index) {
            (true, index) => AppendResult::Matched { index },
            (false, 0) => AppendResult::NoLog,
            (false, index) => AppendResult::Conflict {
                index,
                non_matching_term: None,
            },
        };

        Ok(res)
    }
}

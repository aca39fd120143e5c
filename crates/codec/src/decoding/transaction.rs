use alloy_primitives::{bytes::Buf, Bytes};
use alloy_rlp::Header;

/// The EIP-2930 access list transaction type.
const ACCESS_LIST_TX_TYPE: u8 = 0x01;
/// The EIP-1559 dynamic fee transaction type.
const DYNAMIC_FEE_TX_TYPE: u8 = 0x02;

/// A RLP encoded transaction.
#[derive(Debug)]
pub struct Transaction(pub Bytes);

impl Transaction {
    /// Tries to read from the input buffer into the [`Transaction`]. Returns [`None`] if it can't
    /// read the RLP list header from the buffer or the buffer length does not cover all the
    /// expected payload data length.
    ///
    /// Typed transactions are prefixed with their type byte, which is kept in the returned bytes.
    /// Only access list and dynamic fee transactions can be carried by a batch.
    pub fn try_from_buf(buf: &mut &[u8]) -> Option<Self> {
        let mut decode = *buf;
        let first = *decode.first()?;
        let typed = first <= 0x7f;
        if typed {
            if !matches!(first, ACCESS_LIST_TX_TYPE | DYNAMIC_FEE_TX_TYPE) {
                return None
            }
            decode.advance(1);
        }

        let header = Header::decode(&mut decode).ok()?;
        if !header.list {
            return None
        }

        let offset = header.length_with_payload() + typed as usize;
        if buf.remaining() < offset {
            return None
        }

        // copy the transaction bytes and advance the buffer.
        let tx = Self(Bytes::copy_from_slice(&buf[..offset]));
        buf.advance(offset);
        Some(tx)
    }
}

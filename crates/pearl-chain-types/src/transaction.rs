//! Transactions and their consensus encoding.

use crate::encode::write_compact_size;
use crate::hash::{sha256d, Uint256};
use crate::script::Script;

/// The monetary base unit: one coin in its smallest denomination.
pub const COIN: i64 = 100_000_000;

/// A reference to a transaction output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutPoint {
    pub txid: Uint256,
    pub vout: u32,
}

impl OutPoint {
    /// The null reference carried by coinbase inputs.
    pub fn null() -> Self {
        OutPoint {
            txid: Uint256::ZERO,
            vout: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

/// A transaction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub previous_output: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

/// A transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub value: i64,
    pub script_pubkey: Script,
}

/// A transaction, encoded in the pre-segwit consensus format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Consensus serialization.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);
        buf.extend_from_slice(&self.version.to_le_bytes());
        write_compact_size(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(&input.previous_output.txid.to_le_bytes());
            buf.extend_from_slice(&input.previous_output.vout.to_le_bytes());
            write_compact_size(&mut buf, input.script_sig.len() as u64);
            buf.extend_from_slice(input.script_sig.as_bytes());
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }
        write_compact_size(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.to_le_bytes());
            write_compact_size(&mut buf, output.script_pubkey.len() as u64);
            buf.extend_from_slice(output.script_pubkey.as_bytes());
        }
        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }

    /// Transaction id: double SHA-256 of the serialization.
    pub fn txid(&self) -> Uint256 {
        Uint256::from_le_bytes(sha256d(&self.serialize()))
    }

    /// Whether this is a reward-creating transaction with a null prevout.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Builder;

    fn sample_coinbase() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: Builder::new().push_slice(b"test").into_script(),
                sequence: u32::MAX,
            }],
            outputs: vec![TxOut {
                value: 50 * COIN,
                script_pubkey: Script::new(),
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn test_null_outpoint() {
        assert!(OutPoint::null().is_null());
        assert!(!OutPoint {
            txid: Uint256::ZERO,
            vout: 0
        }
        .is_null());
    }

    #[test]
    fn test_is_coinbase() {
        let tx = sample_coinbase();
        assert!(tx.is_coinbase());

        let mut spend = tx.clone();
        spend.inputs[0].previous_output.vout = 0;
        assert!(!spend.is_coinbase());
    }

    #[test]
    fn test_serialization_layout() {
        let tx = sample_coinbase();
        let bytes = tx.serialize();
        // version + count + outpoint + script len + script + sequence
        // + count + value + script len + locktime
        assert_eq!(bytes.len(), 4 + 1 + 36 + 1 + 5 + 4 + 1 + 8 + 1 + 4);
        assert_eq!(&bytes[0..4], &[0x01, 0x00, 0x00, 0x00]);
        assert_eq!(bytes[4], 0x01);
        assert!(bytes[5..37].iter().all(|&b| b == 0));
        assert_eq!(&bytes[37..41], &[0xff, 0xff, 0xff, 0xff]);
        // 50 coins little-endian.
        assert_eq!(
            &bytes[52..60],
            &[0x00, 0xf2, 0x05, 0x2a, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_txid_is_deterministic() {
        let tx = sample_coinbase();
        assert_eq!(tx.txid(), tx.txid());
        assert_eq!(tx.txid(), Uint256::from_le_bytes(sha256d(&tx.serialize())));
    }
}

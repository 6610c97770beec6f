//! Block headers and blocks.

use crate::hash::{sha256d, Uint256};
use crate::merkle::merkle_root;
use crate::transaction::Transaction;

/// An 80-byte block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_blockhash: Uint256,
    pub merkle_root: Uint256,
    pub time: u32,
    /// Compact encoding of the proof-of-work target.
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// Consensus serialization, exactly 80 bytes.
    pub fn serialize(&self) -> [u8; 80] {
        let mut buf = [0u8; 80];
        buf[0..4].copy_from_slice(&self.version.to_le_bytes());
        buf[4..36].copy_from_slice(&self.prev_blockhash.to_le_bytes());
        buf[36..68].copy_from_slice(&self.merkle_root.to_le_bytes());
        buf[68..72].copy_from_slice(&self.time.to_le_bytes());
        buf[72..76].copy_from_slice(&self.bits.to_le_bytes());
        buf[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        buf
    }

    /// Block hash: double SHA-256 of the serialized header.
    pub fn hash(&self) -> Uint256 {
        Uint256::from_le_bytes(sha256d(&self.serialize()))
    }
}

/// A block: header plus transaction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub txdata: Vec<Transaction>,
}

impl Block {
    /// Recompute the merkle root over the transaction list.
    pub fn compute_merkle_root(&self) -> Uint256 {
        let txids: Vec<Uint256> = self.txdata.iter().map(Transaction::txid).collect();
        merkle_root(&txids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_blockhash: Uint256::ZERO,
            merkle_root: Uint256::from_hex("0f").unwrap(),
            time: 1_507_616_851,
            bits: 0x1e0ffff0,
            nonce: 42,
        }
    }

    #[test]
    fn test_header_serialization_layout() {
        let header = sample_header();
        let bytes = header.serialize();
        assert_eq!(bytes.len(), 80);
        assert_eq!(&bytes[0..4], &[0x01, 0x00, 0x00, 0x00]);
        assert!(bytes[4..36].iter().all(|&b| b == 0));
        assert_eq!(bytes[36], 0x0f);
        assert_eq!(&bytes[72..76], &[0xf0, 0xff, 0x0f, 0x1e]);
        assert_eq!(&bytes[76..80], &[42, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_header_hash_changes_with_nonce() {
        let header = sample_header();
        let mut other = header;
        other.nonce += 1;
        assert_eq!(header.hash(), header.hash());
        assert_ne!(header.hash(), other.hash());
    }
}

//! # pearl-chain-types
//!
//! Primitive chain types shared across the pearl node.
//!
//! This crate provides:
//! - Double-SHA256 hashing and the 256-bit [`Uint256`] type
//! - Consensus wire encoding (little-endian fields, CompactSize counts)
//! - Script container and builder
//! - Transactions, block headers and blocks
//! - Merkle-root computation over transaction id lists

pub mod block;
pub mod encode;
pub mod hash;
pub mod merkle;
pub mod script;
pub mod transaction;

pub use block::{Block, BlockHeader};
pub use hash::{sha256d, Uint256};
pub use merkle::merkle_root;
pub use script::{Builder, Script};
pub use transaction::{OutPoint, Transaction, TxIn, TxOut, COIN};

//! Merkle-root computation over transaction id lists.

use crate::hash::{sha256d, Uint256};

/// Compute the merkle root by pairwise double-SHA256 up a binary tree.
///
/// An odd node at any level is paired with itself. A single-element list
/// degenerates to that element; an empty list yields the zero hash.
pub fn merkle_root(hashes: &[Uint256]) -> Uint256 {
    if hashes.is_empty() {
        return Uint256::ZERO;
    }
    let mut layer: Vec<Uint256> = hashes.to_vec();
    while layer.len() > 1 {
        let mut next = Vec::with_capacity((layer.len() + 1) / 2);
        for pair in layer.chunks(2) {
            let left = pair[0];
            let right = if pair.len() == 2 { pair[1] } else { pair[0] };
            next.push(hash_pair(left, right));
        }
        layer = next;
    }
    layer[0]
}

fn hash_pair(left: Uint256, right: Uint256) -> Uint256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(&left.to_le_bytes());
    buf[32..].copy_from_slice(&right.to_le_bytes());
    Uint256::from_le_bytes(sha256d(&buf))
}

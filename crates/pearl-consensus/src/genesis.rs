//! Deterministic genesis-block construction.
//!
//! [`build_genesis_block`] is a pure mapping from literal inputs to a block:
//! it performs no proof-of-work search and does not check that the supplied
//! nonce satisfies the target encoded by `bits`. Callers (the parameter
//! tables in [`crate::params`]) immediately assert the header hash and
//! merkle root of the result against hardcoded expected values; a mismatch
//! there means the parameter table itself is corrupted and aborts startup.

use pearl_chain_types::script::opcodes;
use pearl_chain_types::{
    merkle_root, Block, BlockHeader, Builder, OutPoint, Script, Transaction, TxIn, TxOut, Uint256,
};

/// The message embedded in the pearl genesis coinbase.
pub const GENESIS_COINBASE_MESSAGE: &[u8] = b"10-10-2017 :: Materia";

/// The public key paid by the pearl genesis output.
const GENESIS_OUTPUT_PUBKEY: &str = "04259eb09c772926ede2bb053541e65aaba99d5b515091a2747d15cbe19c631379669a28ce0fb4b33e478386767eb598cbf73d7c8c6fa245c543f8df84f9968339";

/// Block-height placeholder pushed ahead of the coinbase message.
const HEIGHT_PLACEHOLDER: i64 = 486_604_799;

/// Difficulty-encoding marker pushed ahead of the coinbase message.
const DIFFICULTY_MARKER: i64 = 4;

/// Build a single-transaction genesis block from literal inputs.
///
/// The coinbase input script embeds `message` verbatim, preceded by two
/// fixed script integers (a height placeholder and a difficulty-encoding
/// marker) so the input can never be mistaken for a spendable signature
/// script. Header fields are taken exactly as supplied; identical inputs
/// always yield an identical block.
pub fn build_genesis_block(
    message: &[u8],
    output_script: Script,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: i64,
) -> Block {
    let script_sig = Builder::new()
        .push_scriptnum(HEIGHT_PLACEHOLDER)
        .push_scriptnum(DIFFICULTY_MARKER)
        .push_slice(message)
        .into_script();

    let coinbase = Transaction {
        version: 1,
        inputs: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig,
            sequence: u32::MAX,
        }],
        outputs: vec![TxOut {
            value: reward,
            script_pubkey: output_script,
        }],
        lock_time: 0,
    };

    let root = merkle_root(&[coinbase.txid()]);
    Block {
        header: BlockHeader {
            version,
            prev_blockhash: Uint256::ZERO,
            merkle_root: root,
            time,
            bits,
            nonce,
        },
        txdata: vec![coinbase],
    }
}

/// Build the pearl genesis block with the fixed coinbase message and
/// reward-claiming script.
pub fn pearl_genesis_block(time: u32, nonce: u32, bits: u32, version: i32, reward: i64) -> Block {
    let pubkey = hex::decode(GENESIS_OUTPUT_PUBKEY).expect("valid genesis pubkey hex");
    let output_script = Builder::new()
        .push_slice(&pubkey)
        .push_opcode(opcodes::OP_CHECKSIG)
        .into_script();
    build_genesis_block(
        GENESIS_COINBASE_MESSAGE,
        output_script,
        time,
        nonce,
        bits,
        version,
        reward,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pearl_chain_types::COIN;

    const MAIN_TIME: u32 = 1_507_616_851;
    const MAIN_NONCE: u32 = 2_084_782_440;
    const MAIN_BITS: u32 = 0x1e0ffff0;
    const MERKLE_ROOT: &str = "9277106797e2955b15f3bfb6f472ec9aa715773c8c352e46cfb5b2640d8b6433";

    #[test]
    fn test_construction_is_deterministic() {
        let a = pearl_genesis_block(MAIN_TIME, MAIN_NONCE, MAIN_BITS, 1, 50 * COIN);
        let b = pearl_genesis_block(MAIN_TIME, MAIN_NONCE, MAIN_BITS, 1, 50 * COIN);
        assert_eq!(a, b);
        assert_eq!(a.header.hash(), b.header.hash());
        assert_eq!(a.txdata[0].serialize(), b.txdata[0].serialize());
    }

    #[test]
    fn test_coinbase_shape() {
        let block = pearl_genesis_block(MAIN_TIME, MAIN_NONCE, MAIN_BITS, 1, 50 * COIN);
        assert_eq!(block.txdata.len(), 1);
        let coinbase = &block.txdata[0];
        assert!(coinbase.is_coinbase());
        assert_eq!(coinbase.version, 1);
        assert_eq!(coinbase.outputs[0].value, 50 * COIN);
        // Height placeholder, difficulty marker, then the message push.
        let script = coinbase.inputs[0].script_sig.as_bytes();
        assert_eq!(&script[..7], &[0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04]);
        assert_eq!(script[7] as usize, GENESIS_COINBASE_MESSAGE.len());
        assert_eq!(&script[8..], GENESIS_COINBASE_MESSAGE);
    }

    #[test]
    fn test_header_carries_degenerate_merkle_root() {
        let block = pearl_genesis_block(MAIN_TIME, MAIN_NONCE, MAIN_BITS, 1, 50 * COIN);
        assert!(block.header.prev_blockhash.is_zero());
        assert_eq!(block.header.merkle_root, block.txdata[0].txid());
        assert_eq!(block.header.merkle_root, block.compute_merkle_root());
    }

    #[test]
    fn test_main_network_fixture() {
        let block = pearl_genesis_block(MAIN_TIME, MAIN_NONCE, MAIN_BITS, 1, 50 * COIN);
        assert_eq!(
            block.header.hash().to_string(),
            "4056a74e055f76326bf08a841056239901d1090ba575daf01432d22abbbbe6d5"
        );
        assert_eq!(block.header.merkle_root.to_string(), MERKLE_ROOT);
    }

    #[test]
    fn test_test_network_fixture() {
        let block = pearl_genesis_block(1_507_619_228, 293_345, 0x1e0ffff0, 1, 50 * COIN);
        assert_eq!(
            block.header.hash().to_string(),
            "516e9daba169b368ac5b81e6215b4bed71c0a8864d8f12bbc45f87b457ea8099"
        );
        assert_eq!(block.header.merkle_root.to_string(), MERKLE_ROOT);
    }

    #[test]
    fn test_regtest_network_fixture() {
        let block = pearl_genesis_block(1_507_616_851, 0, 0x207fffff, 1, 50 * COIN);
        assert_eq!(
            block.header.hash().to_string(),
            "7acdaeddcf580e5ba646968e82ffee193ece898b6416238d304389cdd14b3a9a"
        );
        // The coinbase template is identical across networks, so the merkle
        // root matches main even though the header fields differ.
        assert_eq!(block.header.merkle_root.to_string(), MERKLE_ROOT);
    }
}

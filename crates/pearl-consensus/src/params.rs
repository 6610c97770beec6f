//! Per-network chain parameters.
//!
//! Three fixed parameter sets (main, test, regtest) are built by one
//! table-driven routine from per-network literal records. Every hash, bit
//! assignment, threshold and prefix byte in the tables below is a consensus
//! constant: it must match the deployed network exactly and is never derived
//! or adjusted. Construction runs a genesis self-check that aborts on any
//! mismatch, since all other consensus computation anchors to these values.

use crate::error::ParamsError;
use crate::genesis::pearl_genesis_block;
use parking_lot::RwLock;
use pearl_chain_types::{Block, Uint256, COIN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::debug;

/// Timeout value for deployment windows that never expire.
pub const NO_TIMEOUT: i64 = 999_999_999_999;

/// Highest version bit usable by a deployment.
pub const MAX_VERSION_BIT: u8 = 28;

// ============================================================================
// Network identification
// ============================================================================

/// The three supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network.
    Main,
    /// Public test network.
    Test,
    /// Local regression-test network.
    Regtest,
}

impl Network {
    /// Canonical network identifier, the form startup configuration supplies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParamsError;

    /// Case-sensitive: only the canonical identifiers are accepted.
    fn from_str(s: &str) -> Result<Self, ParamsError> {
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            other => Err(ParamsError::UnknownNetwork(other.to_string())),
        }
    }
}

// ============================================================================
// Soft-fork deployments
// ============================================================================

/// Soft-fork deployments tracked by version bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Dummy deployment reserved for exercising the activation machinery.
    TestDummy = 0,
    /// BIP68/BIP112/BIP113 relative lock-times.
    Csv = 1,
    /// BIP141/BIP143/BIP147 segregated witness.
    Segwit = 2,
}

/// Number of tracked deployments.
pub const DEPLOYMENT_COUNT: usize = 3;

/// Activation window for one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentWindow {
    /// Version bit signalled by miners, in `0..=28`.
    pub bit: u8,
    /// Start of the signalling window (unix time).
    pub start_time: i64,
    /// End of the signalling window (unix time).
    pub timeout: i64,
}

impl DeploymentWindow {
    /// A window whose start equals its timeout never activates.
    pub fn is_disabled(&self) -> bool {
        self.start_time == self.timeout
    }
}

// ============================================================================
// Consensus rules
// ============================================================================

/// Per-network consensus rules.
#[derive(Debug)]
pub struct ConsensusParams {
    /// Blocks between subsidy halvings.
    pub subsidy_halving_interval: u32,
    /// Blocks signalling an upgrade before it is enforced (legacy majority vote).
    pub majority_enforce_block_upgrade: u32,
    /// Blocks signalling an upgrade before outdated blocks are rejected.
    pub majority_reject_block_outdated: u32,
    /// Window size for the legacy majority vote.
    pub majority_window: u32,
    /// Height at which BIP34 activated; `None` where it never necessarily did.
    pub bip34_height: Option<u32>,
    /// Hash of the BIP34 activation block.
    pub bip34_hash: Uint256,
    /// Proof-of-work ceiling: the lowest difficulty a block may carry.
    pub pow_limit: Uint256,
    /// Difficulty retarget interval in seconds.
    pub pow_target_timespan: u64,
    /// Target block spacing in seconds.
    pub pow_target_spacing: u64,
    /// Whether minimum-difficulty blocks are permitted (test networks only).
    pub pow_allow_min_difficulty_blocks: bool,
    /// Whether retargeting is disabled entirely (regtest only).
    pub pow_no_retargeting: bool,
    /// Signalling blocks required within one window to lock a deployment in.
    pub rule_change_activation_threshold: u32,
    /// Deployment confirmation window in blocks.
    pub miner_confirmation_window: u32,
    /// Activation windows indexed by [`Deployment`]. Behind a lock solely to
    /// support the regtest-only window override; nothing else writes here.
    deployments: RwLock<[DeploymentWindow; DEPLOYMENT_COUNT]>,
    /// Hash of the genesis block.
    pub genesis_hash: Uint256,
    /// Minimum cumulative work an acceptable chain must carry.
    pub minimum_chain_work: Uint256,
}

impl ConsensusParams {
    /// Current activation window for a deployment.
    pub fn deployment(&self, d: Deployment) -> DeploymentWindow {
        self.deployments.read()[d as usize]
    }

    /// Number of blocks between difficulty retargets.
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.pow_target_timespan / self.pow_target_spacing
    }
}

// ============================================================================
// Network identity, seeds and checkpoints
// ============================================================================

/// Leading bytes for the address classes this network encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPrefixes {
    /// Pay-to-pubkey-hash addresses.
    pub pubkey_hash: [u8; 1],
    /// Pay-to-script-hash addresses.
    pub script_hash: [u8; 1],
    /// WIF-encoded private keys.
    pub secret_key: [u8; 1],
    /// BIP32 extended public keys.
    pub ext_public_key: [u8; 4],
    /// BIP32 extended secret keys.
    pub ext_secret_key: [u8; 4],
}

/// A DNS seed used to bootstrap peer discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsSeed {
    /// Operator label.
    pub name: &'static str,
    /// Hostname to resolve.
    pub host: &'static str,
    /// Whether the seed supports service-bit filtering.
    pub supports_service_filtering: bool,
}

/// Known-good chain history, used to reject contradicting forks and to
/// estimate sync progress.
#[derive(Debug, Clone)]
pub struct Checkpoints {
    /// Height to expected block hash, ascending by height.
    pub entries: Vec<(u64, Uint256)>,
    /// Unix timestamp of the last checkpoint block.
    pub last_checkpoint_time: i64,
    /// Transactions between genesis and the last checkpoint.
    pub total_transactions: u64,
    /// Estimated transactions per day after the last checkpoint.
    pub tx_rate: f64,
}

impl Checkpoints {
    /// Expected hash at a checkpointed height.
    pub fn hash_at(&self, height: u64) -> Option<Uint256> {
        self.entries
            .iter()
            .find(|(h, _)| *h == height)
            .map(|(_, hash)| *hash)
    }

    /// The highest checkpoint, if any.
    pub fn last(&self) -> Option<(u64, Uint256)> {
        self.entries.last().copied()
    }
}

// ============================================================================
// The per-network parameter bundle
// ============================================================================

/// The complete parameter bundle for one network.
///
/// Instances are built once and never mutated, with a single exception: the
/// regtest deployment table may be moved through
/// [`ChainParams::update_deployment_window`] for deterministic soft-fork
/// tests.
#[derive(Debug)]
pub struct ChainParams {
    /// Which network these parameters describe.
    pub network: Network,
    /// Consensus rules.
    pub consensus: ConsensusParams,
    /// 4-byte prefix framing wire messages.
    pub magic: [u8; 4],
    /// Default P2P listening port.
    pub default_port: u16,
    /// Height below which block files may be pruned.
    pub prune_after_height: u64,
    /// The genesis block.
    pub genesis: Block,
    /// Address-encoding prefix bytes.
    pub address_prefixes: AddressPrefixes,
    /// DNS seeds for peer discovery, in preference order.
    pub dns_seeds: Vec<DnsSeed>,
    /// Literal fallback peers.
    pub fixed_seeds: Vec<SocketAddr>,
    /// Checkpoint table.
    pub checkpoints: Checkpoints,
    /// Whether mining requires connected peers.
    pub mining_requires_peers: bool,
    /// Whether expensive consistency checks run by default.
    pub default_consistency_checks: bool,
    /// Whether non-standard transactions are rejected.
    pub require_standard: bool,
    /// Whether blocks may be mined on demand, without peers.
    pub mine_blocks_on_demand: bool,
    /// Whether RPC reports this network as a testnet.
    pub rpc_reports_testnet: bool,
}

impl ChainParams {
    /// Build the parameter set for a network.
    ///
    /// Prefer [`crate::registry::params`] for the statically-held instance;
    /// this constructor exists for the registry itself and for tests that
    /// need an owned set.
    pub fn for_network(network: Network) -> ChainParams {
        match network {
            Network::Main => build(main_spec()),
            Network::Test => build(test_spec()),
            Network::Regtest => build(regtest_spec()),
        }
    }

    /// Current activation window for a deployment.
    pub fn deployment(&self, d: Deployment) -> DeploymentWindow {
        self.consensus.deployment(d)
    }

    /// Move a deployment's activation window.
    ///
    /// Only the regression network supports this; it exists so test
    /// harnesses can activate or expire soft forks deterministically. On any
    /// other network the call fails and the table is left untouched.
    pub fn update_deployment_window(
        &self,
        d: Deployment,
        start_time: i64,
        timeout: i64,
    ) -> Result<(), ParamsError> {
        if self.network != Network::Regtest {
            return Err(ParamsError::DeploymentOverrideNotRegtest(self.network));
        }
        let mut table = self.consensus.deployments.write();
        let window = &mut table[d as usize];
        window.start_time = start_time;
        window.timeout = timeout;
        Ok(())
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Literal inputs for one network. The construction routine is shared;
/// networks differ only in these values.
struct ChainSpec {
    network: Network,
    magic: [u8; 4],
    default_port: u16,
    prune_after_height: u64,
    genesis_time: u32,
    genesis_nonce: u32,
    genesis_bits: u32,
    genesis_version: i32,
    genesis_reward: i64,
    expected_genesis_hash: &'static str,
    expected_merkle_root: &'static str,
    subsidy_halving_interval: u32,
    majority_enforce_block_upgrade: u32,
    majority_reject_block_outdated: u32,
    majority_window: u32,
    bip34_height: Option<u32>,
    bip34_hash: &'static str,
    pow_limit: &'static str,
    pow_target_timespan: u64,
    pow_target_spacing: u64,
    pow_allow_min_difficulty_blocks: bool,
    pow_no_retargeting: bool,
    rule_change_activation_threshold: u32,
    miner_confirmation_window: u32,
    deployments: [DeploymentWindow; DEPLOYMENT_COUNT],
    minimum_chain_work: &'static str,
    address_prefixes: AddressPrefixes,
    dns_seeds: &'static [DnsSeed],
    fixed_seeds: &'static [&'static str],
    checkpoint_entries: &'static [(u64, &'static str)],
    last_checkpoint_time: i64,
    checkpoint_total_transactions: u64,
    checkpoint_tx_rate: f64,
    mining_requires_peers: bool,
    default_consistency_checks: bool,
    require_standard: bool,
    mine_blocks_on_demand: bool,
    rpc_reports_testnet: bool,
}

/// All three networks share the same deployment schedule: every window is
/// permanently open pending a scheduled rollout.
const SHARED_DEPLOYMENTS: [DeploymentWindow; DEPLOYMENT_COUNT] = [
    // TestDummy
    DeploymentWindow {
        bit: 28,
        start_time: 0,
        timeout: NO_TIMEOUT,
    },
    // Csv
    DeploymentWindow {
        bit: 0,
        start_time: 0,
        timeout: NO_TIMEOUT,
    },
    // Segwit
    DeploymentWindow {
        bit: 1,
        start_time: 0,
        timeout: NO_TIMEOUT,
    },
];

const MAIN_GENESIS_HASH: &str =
    "4056a74e055f76326bf08a841056239901d1090ba575daf01432d22abbbbe6d5";
const TEST_GENESIS_HASH: &str =
    "516e9daba169b368ac5b81e6215b4bed71c0a8864d8f12bbc45f87b457ea8099";
const REGTEST_GENESIS_HASH: &str =
    "7acdaeddcf580e5ba646968e82ffee193ece898b6416238d304389cdd14b3a9a";

/// The coinbase template is identical across networks, so the merkle root is
/// shared even though the header fields differ.
const GENESIS_MERKLE_ROOT: &str =
    "9277106797e2955b15f3bfb6f472ec9aa715773c8c352e46cfb5b2640d8b6433";

fn main_spec() -> ChainSpec {
    ChainSpec {
        network: Network::Main,
        magic: [0xfc, 0xdc, 0xc2, 0xd5],
        default_port: 9333,
        prune_after_height: 100_000,
        genesis_time: 1_507_616_851,
        genesis_nonce: 2_084_782_440,
        genesis_bits: 0x1e0ffff0,
        genesis_version: 1,
        genesis_reward: 50 * COIN,
        expected_genesis_hash: MAIN_GENESIS_HASH,
        expected_merkle_root: GENESIS_MERKLE_ROOT,
        subsidy_halving_interval: 840_000,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        bip34_height: Some(0),
        bip34_hash: "0x",
        pow_limit: "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        pow_target_timespan: 3 * 24 * 60 * 60 + 12 * 60 * 60, // 3.5 days
        pow_target_spacing: 150,                              // 2.5 minutes
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        rule_change_activation_threshold: 6048, // 75% of 8064
        miner_confirmation_window: 8064, // pow_target_timespan / pow_target_spacing * 4
        deployments: SHARED_DEPLOYMENTS,
        minimum_chain_work: "0x000000000000000000000000000000000000000000000005c13f99f6d0b1a908",
        address_prefixes: AddressPrefixes {
            pubkey_hash: [50],
            script_hash: [6],
            secret_key: [216],
            ext_public_key: [0x05, 0x86, 0xc2, 0x2e],
            ext_secret_key: [0x05, 0x86, 0xdc, 0xf1],
        },
        dns_seeds: &[],
        fixed_seeds: &[],
        checkpoint_entries: &[(0, MAIN_GENESIS_HASH)],
        last_checkpoint_time: 1_507_616_851,
        checkpoint_total_transactions: 0,
        checkpoint_tx_rate: 5500.0,
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
        rpc_reports_testnet: false,
    }
}

fn test_spec() -> ChainSpec {
    ChainSpec {
        network: Network::Test,
        magic: [0xac, 0xb2, 0xd5, 0x2c],
        default_port: 19_333,
        prune_after_height: 1000,
        genesis_time: 1_507_619_228,
        genesis_nonce: 293_345,
        genesis_bits: 0x1e0ffff0,
        genesis_version: 1,
        genesis_reward: 50 * COIN,
        expected_genesis_hash: TEST_GENESIS_HASH,
        expected_merkle_root: GENESIS_MERKLE_ROOT,
        subsidy_halving_interval: 840_000,
        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 100,
        bip34_height: Some(0),
        bip34_hash: "0x",
        pow_limit: "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        pow_target_timespan: 3 * 24 * 60 * 60 + 12 * 60 * 60, // 3.5 days
        pow_target_spacing: 150,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: false,
        rule_change_activation_threshold: 1512, // 75% for testchains
        miner_confirmation_window: 2016,
        deployments: SHARED_DEPLOYMENTS,
        minimum_chain_work: "0x00000000000000000000000000000000000000000000000000006fce5d67766e",
        address_prefixes: AddressPrefixes {
            pubkey_hash: [11],
            script_hash: [106],
            secret_key: [229],
            ext_public_key: [0x05, 0x37, 0x82, 0xbf],
            ext_secret_key: [0x05, 0x37, 0x84, 0xa4],
        },
        dns_seeds: &[],
        fixed_seeds: &[],
        checkpoint_entries: &[(0, "0x")],
        last_checkpoint_time: 0,
        checkpoint_total_transactions: 0,
        checkpoint_tx_rate: 576.0,
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: false,
        mine_blocks_on_demand: false,
        rpc_reports_testnet: true,
    }
}

fn regtest_spec() -> ChainSpec {
    ChainSpec {
        network: Network::Regtest,
        magic: [0xaa, 0xbd, 0xaf, 0xd1],
        default_port: 19_444,
        prune_after_height: 1000,
        genesis_time: 1_507_616_851,
        genesis_nonce: 0,
        genesis_bits: 0x207fffff,
        genesis_version: 1,
        genesis_reward: 50 * COIN,
        expected_genesis_hash: REGTEST_GENESIS_HASH,
        expected_merkle_root: GENESIS_MERKLE_ROOT,
        subsidy_halving_interval: 150,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        // BIP34 has not necessarily activated on regtest.
        bip34_height: None,
        bip34_hash: "0x",
        pow_limit: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        pow_target_timespan: 3 * 24 * 60 * 60 + 12 * 60 * 60, // 3.5 days
        pow_target_spacing: 150,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: true,
        rule_change_activation_threshold: 108, // 75% for testchains
        miner_confirmation_window: 144, // faster than normal for regtest
        deployments: SHARED_DEPLOYMENTS,
        minimum_chain_work: "0x00",
        address_prefixes: AddressPrefixes {
            pubkey_hash: [113],
            script_hash: [123],
            secret_key: [202],
            ext_public_key: [0x05, 0x39, 0x81, 0xab],
            ext_secret_key: [0x05, 0x39, 0x85, 0x2c],
        },
        dns_seeds: &[],
        fixed_seeds: &[],
        checkpoint_entries: &[(0, REGTEST_GENESIS_HASH)],
        last_checkpoint_time: 0,
        checkpoint_total_transactions: 0,
        checkpoint_tx_rate: 0.0,
        mining_requires_peers: false,
        default_consistency_checks: true,
        require_standard: false,
        mine_blocks_on_demand: true,
        rpc_reports_testnet: false,
    }
}

/// Build one parameter set and run the genesis self-check.
///
/// Panics if the constructed genesis header hash or merkle root disagrees
/// with the hardcoded expected value. That can only happen when the literal
/// table above was edited incorrectly (wrong nonce, message or script), and
/// the process must not start in that state.
fn build(spec: ChainSpec) -> ChainParams {
    let genesis = pearl_genesis_block(
        spec.genesis_time,
        spec.genesis_nonce,
        spec.genesis_bits,
        spec.genesis_version,
        spec.genesis_reward,
    );
    let genesis_hash = genesis.header.hash();
    let merkle_root = genesis.compute_merkle_root();

    let expected_hash =
        Uint256::from_hex(spec.expected_genesis_hash).expect("valid expected genesis hash hex");
    let expected_merkle =
        Uint256::from_hex(spec.expected_merkle_root).expect("valid expected merkle root hex");
    assert_eq!(
        genesis_hash, expected_hash,
        "genesis hash mismatch for {} network",
        spec.network
    );
    assert_eq!(
        merkle_root, expected_merkle,
        "genesis merkle root mismatch for {} network",
        spec.network
    );

    validate_deployments(spec.network, &spec.deployments);

    debug!(
        network = %spec.network,
        hash = %genesis_hash,
        merkle_root = %merkle_root,
        nonce = spec.genesis_nonce,
        "constructed genesis block"
    );

    let checkpoints = Checkpoints {
        entries: spec
            .checkpoint_entries
            .iter()
            .map(|(height, hash)| {
                (
                    *height,
                    Uint256::from_hex(hash).expect("valid checkpoint hash hex"),
                )
            })
            .collect(),
        last_checkpoint_time: spec.last_checkpoint_time,
        total_transactions: spec.checkpoint_total_transactions,
        tx_rate: spec.checkpoint_tx_rate,
    };

    ChainParams {
        network: spec.network,
        consensus: ConsensusParams {
            subsidy_halving_interval: spec.subsidy_halving_interval,
            majority_enforce_block_upgrade: spec.majority_enforce_block_upgrade,
            majority_reject_block_outdated: spec.majority_reject_block_outdated,
            majority_window: spec.majority_window,
            bip34_height: spec.bip34_height,
            bip34_hash: Uint256::from_hex(spec.bip34_hash).expect("valid BIP34 hash hex"),
            pow_limit: Uint256::from_hex(spec.pow_limit).expect("valid pow limit hex"),
            pow_target_timespan: spec.pow_target_timespan,
            pow_target_spacing: spec.pow_target_spacing,
            pow_allow_min_difficulty_blocks: spec.pow_allow_min_difficulty_blocks,
            pow_no_retargeting: spec.pow_no_retargeting,
            rule_change_activation_threshold: spec.rule_change_activation_threshold,
            miner_confirmation_window: spec.miner_confirmation_window,
            deployments: RwLock::new(spec.deployments),
            genesis_hash,
            minimum_chain_work: Uint256::from_hex(spec.minimum_chain_work)
                .expect("valid minimum chain work hex"),
        },
        magic: spec.magic,
        default_port: spec.default_port,
        prune_after_height: spec.prune_after_height,
        genesis,
        address_prefixes: spec.address_prefixes,
        dns_seeds: spec.dns_seeds.to_vec(),
        fixed_seeds: spec
            .fixed_seeds
            .iter()
            .map(|s| s.parse().expect("valid fixed seed address"))
            .collect(),
        checkpoints,
        mining_requires_peers: spec.mining_requires_peers,
        default_consistency_checks: spec.default_consistency_checks,
        require_standard: spec.require_standard,
        mine_blocks_on_demand: spec.mine_blocks_on_demand,
        rpc_reports_testnet: spec.rpc_reports_testnet,
    }
}

/// Deployment-table invariant: bits in range, and unique among windows that
/// are not permanently disabled.
fn validate_deployments(network: Network, table: &[DeploymentWindow; DEPLOYMENT_COUNT]) {
    let mut seen = [false; MAX_VERSION_BIT as usize + 1];
    for window in table {
        assert!(
            window.bit <= MAX_VERSION_BIT,
            "deployment bit {} out of range on {} network",
            window.bit,
            network
        );
        assert!(
            window.is_disabled() || window.timeout > window.start_time,
            "deployment window ends before it starts on {} network",
            network
        );
        if window.is_disabled() {
            continue;
        }
        assert!(
            !seen[window.bit as usize],
            "duplicate deployment bit {} on {} network",
            window.bit,
            network
        );
        seen[window.bit as usize] = true;
    }
}

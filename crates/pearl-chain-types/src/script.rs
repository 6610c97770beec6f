//! Script container and builder.
//!
//! Only the pieces genesis construction needs: data pushes, minimally
//! serialized script integers and raw opcodes.

use std::fmt;

/// Opcodes used by this crate.
pub mod opcodes {
    /// Push an empty value.
    pub const OP_0: u8 = 0x00;
    /// The next byte holds the push length.
    pub const OP_PUSHDATA1: u8 = 0x4c;
    /// The next two bytes (little-endian) hold the push length.
    pub const OP_PUSHDATA2: u8 = 0x4d;
    /// The next four bytes (little-endian) hold the push length.
    pub const OP_PUSHDATA4: u8 = 0x4e;
    /// Verify a signature against a public key.
    pub const OP_CHECKSIG: u8 = 0xac;
}

/// A serialized script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

/// Incremental script builder.
#[derive(Debug, Default)]
pub struct Builder(Vec<u8>);

impl Builder {
    pub fn new() -> Self {
        Builder(Vec::new())
    }

    /// Push a data blob with its length prefix.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        match data.len() {
            0..=75 => self.0.push(data.len() as u8),
            76..=0xff => {
                self.0.push(opcodes::OP_PUSHDATA1);
                self.0.push(data.len() as u8);
            }
            0x100..=0xffff => {
                self.0.push(opcodes::OP_PUSHDATA2);
                self.0.extend_from_slice(&(data.len() as u16).to_le_bytes());
            }
            _ => {
                self.0.push(opcodes::OP_PUSHDATA4);
                self.0.extend_from_slice(&(data.len() as u32).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Push an integer using the minimal script-number serialization, always
    /// as a data push and never as a small-integer opcode. Genesis input
    /// scripts depend on this: `4` must encode as `0x01 0x04`, not `OP_4`.
    pub fn push_scriptnum(mut self, n: i64) -> Self {
        if n == 0 {
            self.0.push(opcodes::OP_0);
            return self;
        }
        let negative = n < 0;
        let mut abs = n.unsigned_abs();
        let mut bytes = Vec::with_capacity(9);
        while abs > 0 {
            bytes.push((abs & 0xff) as u8);
            abs >>= 8;
        }
        // The top bit of the last byte carries the sign; pad when the
        // magnitude already occupies it.
        if let Some(last) = bytes.last_mut() {
            if *last & 0x80 != 0 {
                bytes.push(if negative { 0x80 } else { 0x00 });
            } else if negative {
                *last |= 0x80;
            }
        }
        self.push_slice(&bytes)
    }

    /// Append a raw opcode.
    pub fn push_opcode(mut self, op: u8) -> Self {
        self.0.push(op);
        self
    }

    pub fn into_script(self) -> Script {
        Script(self.0)
    }
}

//! Canonical memo keys.
//!
//! Games whose state type does not derive a canonical `Hash`/`Eq` (floats,
//! variable-length fields) can build a [`StateKey`] instead. The key is an
//! exact byte encoding of the fields that define the subproblem, so distinct
//! subproblems can never collide in the memo table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bit pattern used for every NaN.
const CANONICAL_NAN: u64 = 0x7ff8_0000_0000_0000;

/// Canonical bit pattern of a float.
///
/// `-0.0` and `0.0` map to the same bits, and so do all NaN payloads.
pub fn canonical_f64_bits(value: f64) -> u64 {
    if value.is_nan() {
        CANONICAL_NAN
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

/// A canonical byte encoding of a state.
///
/// Build one field at a time with the `push_*` methods (or the chaining
/// `with_*` variants). Variable-length fields are length-prefixed, so
/// `("ab", "c")` and `("a", "bc")` encode differently.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    bytes: Vec<u8>,
}

impl StateKey {
    /// Create an empty key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty key with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Append a `u32`.
    pub fn push_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    fn push_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a float using its canonical bits.
    pub fn push_f64(&mut self, value: f64) {
        self.push_u64(canonical_f64_bits(value));
    }

    /// Append a length-prefixed UTF-8 string.
    pub fn push_str(&mut self, value: &str) {
        self.push_u64(value.len() as u64);
        self.bytes.extend_from_slice(value.as_bytes());
    }

    /// Chaining form of [`StateKey::push_u32`].
    pub fn with_u32(mut self, value: u32) -> Self {
        self.push_u32(value);
        self
    }

    /// Chaining form of [`StateKey::push_f64`].
    pub fn with_f64(mut self, value: f64) -> Self {
        self.push_f64(value);
        self
    }

    /// Chaining form of [`StateKey::push_str`].
    pub fn with_str(mut self, value: &str) -> Self {
        self.push_str(value);
        self
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been encoded yet.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateKey(")?;
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

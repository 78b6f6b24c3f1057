//! Four-character keys and type tags.
//!
//! Both are packed big-endian into a `u32`: character 0 lands in the most
//! significant byte.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyError;

/// Number of characters in a key or type tag.
pub const KEY_SIZE: usize = 4;

/// A validated SMC key such as `TC0D` or `F0Ac`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SmcKey([u8; KEY_SIZE]);

impl SmcKey {
    /// Validate a textual key.
    pub fn new(key: &str) -> Result<Self, KeyError> {
        let bytes = key.as_bytes();
        if bytes.len() != KEY_SIZE {
            return Err(KeyError::InvalidLength {
                key: key.to_string(),
                len: bytes.len(),
            });
        }
        if !key.is_ascii() {
            return Err(KeyError::NonAscii {
                key: key.to_string(),
            });
        }
        let mut raw = [0u8; KEY_SIZE];
        raw.copy_from_slice(bytes);
        Ok(Self(raw))
    }

    /// Rebuild a key from its binary identifier.
    ///
    /// No validation: any `u32` maps to some four bytes.
    pub fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    /// The binary identifier sent to the controller.
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl FromStr for SmcKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SmcKey {
    type Error = KeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SmcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl fmt::Debug for SmcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SmcKey({:?})", self.as_str())
    }
}

/// Encode a textual key into its binary identifier.
pub fn encode_key(key: &str) -> Result<u32, KeyError> {
    SmcKey::new(key).map(SmcKey::to_u32)
}

/// Decode the `dataType` field of a key-info response.
pub fn decode_type_tag(value: u32) -> DataType {
    DataType(value.to_be_bytes())
}

/// The four-character data type the controller reports for a key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType([u8; KEY_SIZE]);

impl DataType {
    /// Signed fixed point, 8 integer bits and 8 fraction bits.
    pub const SP78: DataType = DataType(*b"sp78");
    /// Unsigned fixed point with 2 fraction bits.
    pub const FPE2: DataType = DataType(*b"fpe2");
    pub const UI8: DataType = DataType(*b"ui8 ");
    pub const UI16: DataType = DataType(*b"ui16");
    pub const UI32: DataType = DataType(*b"ui32");
    pub const FLAG: DataType = DataType(*b"flag");
    pub const FLT: DataType = DataType(*b"flt ");

    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl Default for DataType {
    fn default() -> Self {
        Self([0; KEY_SIZE])
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataType(\"{self}\")")
    }
}

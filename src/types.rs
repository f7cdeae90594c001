use std::fmt;
use std::str::FromStr;

use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
};

/// A 12-byte document identifier, displayed as 24 lowercase hex characters.
///
/// The all-zero identifier is representable but never passes validation; it
/// is the "unset" sentinel the storage layer hands out before an insert.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// The raw 12 bytes.
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// True for the all-zero identifier.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 12]
    }
}

/// Error from parsing an [`ObjectId`] out of a hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseObjectIdError;

impl fmt::Display for ParseObjectIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("objectId must be exactly 24 hexadecimal characters")
    }
}

impl std::error::Error for ParseObjectIdError {}

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseObjectIdError);
        }
        let mut bytes = [0u8; 12];
        for (i, chunk) in s.as_bytes().chunks_exact(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| ParseObjectIdError)?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| ParseObjectIdError)?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: ParseObjectIdError| D::Error::custom(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
        assert!(!id.is_zero());
    }

    #[test]
    fn zero_id() {
        let id: ObjectId = "000000000000000000000000".parse().unwrap();
        assert!(id.is_zero());
        assert_eq!(id, ObjectId::default());
    }

    #[test]
    fn rejects_bad_input() {
        assert!("507f1f77bcf86cd79943901".parse::<ObjectId>().is_err());
        assert!("507f1f77bcf86cd79943901g".parse::<ObjectId>().is_err());
        assert!("".parse::<ObjectId>().is_err());
    }
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as UpstreamDigest, Sha256};
use std::fmt;

const DIGEST_LENGTH: usize = 256 / 8;

/// SHA-256 of some content. Serializes as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl Digest {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(txt: impl AsRef<[u8]>) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; DIGEST_LENGTH];
        hex::decode_to_slice(txt, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl<T> From<T> for Digest
where
    T: AsRef<[u8]>,
{
    fn from(item: T) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(item);
        let mut bytes = [0u8; DIGEST_LENGTH];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let txt = String::deserialize(deserializer)?;
        Digest::from_hex(&txt).map_err(serde::de::Error::custom)
    }
}

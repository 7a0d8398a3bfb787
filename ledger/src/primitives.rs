//! Fixed-size byte newtypes: hashes, account keys, and signatures.

#[cfg(feature = "serde")]
use {
    serde::{
        de::{self, SeqAccess, Visitor},
        ser::SerializeTuple,
        Deserializer, Serializer,
    },
    serde_derive::{Deserialize, Serialize},
    std::fmt,
};
use std::sync::atomic::{AtomicU64, Ordering};

/// Size of a SHA-256 hash in bytes.
pub const HASH_BYTES: usize = 32;
/// Size of an Ed25519 public key in bytes.
pub const PUBKEY_BYTES: usize = 32;
/// Size of an Ed25519 signature in bytes.
pub const SIGNATURE_BYTES: usize = 64;

/// A 32-byte hash, serialized as raw bytes on every wire dialect.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Hash([u8; HASH_BYTES]);

/// A 32-byte Ed25519 public key identifying an account.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

/// A 64-byte Ed25519 signature.
///
/// Always serialized as 64 raw bytes; no dialect length-prefixes it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Signature([u8; SIGNATURE_BYTES]);

macro_rules! impl_byte_newtype {
    ($name:ident, $len:expr) => {
        impl $name {
            pub const fn new_from_array(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub const fn to_bytes(self) -> [u8; $len] {
                self.0
            }

            pub const fn as_array(&self) -> &[u8; $len] {
                &self.0
            }

            /// A unique value for tests, derived from a process-wide counter.
            pub fn new_unique() -> Self {
                static COUNTER: AtomicU64 = AtomicU64::new(1);
                let mut bytes = [0u8; $len];
                let n = COUNTER.fetch_add(1, Ordering::Relaxed);
                bytes[..8].copy_from_slice(&n.to_le_bytes());
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }
    };
}

impl_byte_newtype!(Hash, HASH_BYTES);
impl_byte_newtype!(Pubkey, PUBKEY_BYTES);
impl_byte_newtype!(Signature, SIGNATURE_BYTES);

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; SIGNATURE_BYTES])
    }
}

// Serde cannot derive for arrays longer than 32 elements, so Signature
// serializes as a 64-element tuple by hand. Through bincode that is the
// same 64 raw bytes the dialects write.
#[cfg(feature = "serde")]
impl serde::Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_tuple(SIGNATURE_BYTES)?;
        for byte in self.0.iter() {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Signature, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SignatureVisitor;

        impl<'de> Visitor<'de> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("64 signature bytes")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Signature, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bytes = [0u8; SIGNATURE_BYTES];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                Ok(Signature(bytes))
            }
        }

        deserializer.deserialize_tuple(SIGNATURE_BYTES, SignatureVisitor)
    }
}

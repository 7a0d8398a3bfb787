#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use crate::{primitives::Hash, transaction::VersionedTransaction};

/// A proof-of-history entry: a hash count, the resulting hash, and the
/// transactions recorded under it.
///
/// An entry with no transactions is a tick. The `transactions` vector is
/// ShortVec-prefixed in the wincode dialects; a slice of entries is
/// always u64-prefixed regardless of dialect.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Entry {
    /// Number of hashes performed since the previous entry.
    pub num_hashes: u64,

    /// Hash produced by hashing the previous entry's hash `num_hashes`
    /// times, mixing in the transactions when present.
    pub hash: Hash,

    /// Transactions recorded under this entry, in execution order.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub transactions: Vec<VersionedTransaction>,
}

impl Entry {
    pub fn is_tick(&self) -> bool {
        self.transactions.is_empty()
    }
}

//! Gossip contact info as exchanged on the cluster's gossip plane.
//!
//! A [`ContactInfo`] advertises a node's identity, software version, and
//! socket endpoints. Socket entries do not carry full addresses: each
//! one names an IP by index into `addrs` and a port as an offset from
//! the previous entry's port, which keeps repeated endpoints compact.
//!
//! These types only travel on the wincode wire, where small integers use
//! the variable-length encodings; the codec crate owns the byte-level
//! walk. There is no bincode rendition of this data.

use limcode_ledger::Pubkey;
use std::net::IpAddr;

pub mod socket_tag {
    //! Socket entry keys. Values are part of the wire protocol.
    pub const GOSSIP: u8 = 0;
    pub const SERVE_REPAIR_QUIC: u8 = 1;
    pub const RPC: u8 = 2;
    pub const RPC_PUBSUB: u8 = 3;
    pub const SERVE_REPAIR: u8 = 4;
    pub const TPU: u8 = 5;
    pub const TPU_FORWARDS: u8 = 6;
    pub const TPU_FORWARDS_QUIC: u8 = 7;
    pub const TPU_QUIC: u8 = 8;
    pub const TPU_VOTE: u8 = 9;
    pub const TVU: u8 = 10;
    pub const TVU_QUIC: u8 = 11;
    pub const TPU_VOTE_QUIC: u8 = 12;
    pub const ALPENGLOW: u8 = 13;
}

/// CrdsData enum discriminant under which a [`ContactInfo`] payload is
/// carried.
pub const CRDS_DATA_CONTACT_INFO: u32 = 11;

/// Node software version advertised over gossip.
///
/// `major`, `minor`, `patch`, and `client` are varint-encoded on the
/// wire; `commit` and `feature_set` are fixed u32.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    /// First four bytes of the build commit, zero when unknown.
    pub commit: u32,
    pub feature_set: u32,
    /// Client implementation id; 3 identifies Agave.
    pub client: u16,
}

impl Default for Version {
    fn default() -> Self {
        Self {
            major: 2,
            minor: 2,
            patch: 1,
            commit: 0,
            feature_set: 0,
            client: 3,
        }
    }
}

/// One advertised socket: a tag, an index into the address list, and a
/// port offset.
///
/// Entries are sorted by port; each `offset` is relative to the previous
/// entry's port (the first is relative to zero).
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub struct SocketEntry {
    /// Socket kind, one of the [`socket_tag`] values.
    pub key: u8,
    /// Index into [`ContactInfo::addrs`].
    pub index: u8,
    /// Port delta against the previous entry, varint-encoded.
    pub offset: u16,
}

/// A node's gossip advertisement.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ContactInfo {
    /// Node identity key.
    pub pubkey: Pubkey,
    /// Wallclock of the advertisement in milliseconds, varint-encoded.
    pub wallclock: u64,
    /// Timestamp of the node instance's start, fixed u64.
    pub outset: u64,
    pub shred_version: u16,
    pub version: Version,
    /// Distinct IP addresses referenced by `sockets`.
    pub addrs: Vec<IpAddr>,
    /// Socket entries, sorted by port.
    pub sockets: Vec<SocketEntry>,
}

impl ContactInfo {
    pub fn new(pubkey: Pubkey, wallclock: u64, shred_version: u16) -> Self {
        Self {
            pubkey,
            wallclock,
            outset: 0,
            shred_version,
            version: Version::default(),
            addrs: Vec::new(),
            sockets: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_version_identifies_agave() {
        let version = Version::default();
        assert_eq!((version.major, version.minor, version.patch), (2, 2, 1));
        assert_eq!(version.client, 3);
    }

    #[test]
    fn test_new_contact_info_is_empty() {
        let info = ContactInfo::new(Pubkey::new_unique(), 12345, 42);
        assert!(info.addrs.is_empty());
        assert!(info.sockets.is_empty());
        assert_eq!(info.shred_version, 42);
    }
}

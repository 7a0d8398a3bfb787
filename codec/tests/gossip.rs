use {
    assert_matches::assert_matches,
    limcode_codec::{limcode, wincode, CodecError},
    limcode_gossip::{socket_tag, ContactInfo, SocketEntry, Version, CRDS_DATA_CONTACT_INFO},
    limcode_ledger::{Pubkey, PUBKEY_BYTES},
    std::net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

fn sample_contact_info() -> ContactInfo {
    ContactInfo {
        pubkey: Pubkey::new_from_array([9; 32]),
        wallclock: 1_700_000_000_000,
        outset: 1_699_999_000_000,
        shred_version: 50093,
        version: Version::default(),
        addrs: vec![
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)),
            IpAddr::V6(Ipv6Addr::LOCALHOST),
        ],
        sockets: vec![
            SocketEntry {
                key: socket_tag::GOSSIP,
                index: 0,
                offset: 8000,
            },
            SocketEntry {
                key: socket_tag::TVU,
                index: 0,
                offset: 1,
            },
            SocketEntry {
                key: socket_tag::TPU,
                index: 1,
                offset: 2,
            },
        ],
    }
}

#[test]
fn test_contact_info_roundtrip() {
    let info = sample_contact_info();
    let bytes = wincode::serialize_contact_info(&info).unwrap();
    assert_eq!(wincode::deserialize_contact_info(&bytes).unwrap(), info);
}

#[test]
fn test_limcode_ties_wincode() {
    let info = sample_contact_info();
    assert_eq!(
        wincode::serialize_contact_info(&info).unwrap(),
        limcode::serialize_contact_info(&info).unwrap(),
    );
}

#[test]
fn test_wire_layout_prefix() {
    let info = sample_contact_info();
    let bytes = wincode::serialize_contact_info(&info).unwrap();
    // Pubkey is raw, then the varint wallclock begins.
    assert_eq!(&bytes[..PUBKEY_BYTES], &[9; 32]);
    assert_ne!(bytes[PUBKEY_BYTES] & 0x80, 0);
    // Trailing extensions prefix is the empty ShortVec.
    assert_eq!(bytes[bytes.len() - 1], 0x00);
}

#[test]
fn test_minimal_contact_info_layout() {
    let info = ContactInfo::new(Pubkey::default(), 0, 0);
    let bytes = wincode::serialize_contact_info(&info).unwrap();
    // pubkey(32) + wallclock(1) + outset(8) + shred_version(2)
    // + version 2.2.1/client 3 (1+1+1+4+4+1) + three empty ShortVecs.
    assert_eq!(bytes.len(), 32 + 1 + 8 + 2 + 12 + 3);
}

#[test]
fn test_crds_framing() {
    let info = sample_contact_info();
    let bytes = wincode::serialize_crds_contact_info(&info).unwrap();
    assert_eq!(&bytes[..4], &CRDS_DATA_CONTACT_INFO.to_le_bytes());
    assert_eq!(
        wincode::deserialize_contact_info(&bytes[4..]).unwrap(),
        info
    );
}

#[test]
fn test_nonzero_extensions_rejected() {
    let info = ContactInfo::new(Pubkey::default(), 0, 0);
    let mut bytes = wincode::serialize_contact_info(&info).unwrap();
    let last = bytes.len() - 1;
    bytes[last] = 0x01;
    assert_matches!(
        wincode::deserialize_contact_info(&bytes),
        Err(CodecError::InvalidEncoding { .. })
    );
}

#[test]
fn test_bad_ip_discriminant_rejected() {
    let mut info = ContactInfo::new(Pubkey::default(), 0, 0);
    info.addrs.push(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let mut bytes = wincode::serialize_contact_info(&info).unwrap();
    // The addrs ShortVec prefix sits after the fixed head; the
    // discriminant is the next four bytes.
    let addr_offset = 32 + 1 + 8 + 2 + 12 + 1;
    bytes[addr_offset] = 2;
    assert_matches!(
        wincode::deserialize_contact_info(&bytes),
        Err(CodecError::InvalidEncoding { .. })
    );
}

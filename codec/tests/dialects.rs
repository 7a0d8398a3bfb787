use {
    assert_matches::assert_matches,
    limcode_codec::{bincode as bincode_dialect, limcode, wincode, CodecError},
    limcode_ledger::{
        AddressTableLookup, CompiledInstruction, Entry, Hash, LegacyMessage, MessageHeader, Pubkey,
        Signature, V0Message, VersionedMessage, VersionedTransaction,
    },
    proptest::{collection::vec, prelude::*},
};

fn legacy_transaction() -> VersionedTransaction {
    VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(LegacyMessage {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 1,
            },
            account_keys: vec![Pubkey::default(); 3],
            recent_blockhash: Hash::default(),
            instructions: vec![CompiledInstruction {
                program_id_index: 2,
                accounts: vec![0, 1],
                data: (1..=8).collect(),
            }],
        }),
    }
}

fn v0_transaction() -> VersionedTransaction {
    VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::V0(V0Message {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 1,
            },
            account_keys: vec![Pubkey::default(); 3],
            recent_blockhash: Hash::default(),
            instructions: vec![CompiledInstruction {
                program_id_index: 2,
                accounts: vec![0, 1],
                data: (1..=8).collect(),
            }],
            address_table_lookups: vec![AddressTableLookup {
                account_key: Pubkey::default(),
                writable_indexes: vec![0, 1],
                readonly_indexes: vec![2],
            }],
        }),
    }
}

#[test]
fn test_legacy_transaction_shape() {
    let transaction = legacy_transaction();
    let wincode_bytes = wincode::serialize_transaction(&transaction).unwrap();
    let limcode_bytes = limcode::serialize_transaction(&transaction).unwrap();
    assert_eq!(wincode_bytes, limcode_bytes);

    // ShortVec prefix for one signature, 64 signature bytes, then the
    // message whose first byte is num_required_signatures.
    assert_eq!(wincode_bytes[0], 1);
    assert_eq!(wincode_bytes[65], 0x01);

    let back = wincode::deserialize_transaction(&wincode_bytes).unwrap();
    assert_eq!(back, transaction);
}

#[test]
fn test_v0_message_region_starts_with_prefix() {
    let transaction = v0_transaction();
    let bytes = wincode::serialize_transaction(&transaction).unwrap();
    // Signatures region is 1 + 64 bytes; the message region follows.
    assert_eq!(bytes[65], 0x80);

    let back = wincode::deserialize_transaction(&bytes).unwrap();
    assert_eq!(back, transaction);
}

#[test]
fn test_bincode_strictly_larger_on_minimal_entry() {
    let entry = Entry {
        num_hashes: 1,
        hash: Hash::default(),
        transactions: vec![VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::Legacy(LegacyMessage {
                header: MessageHeader {
                    num_required_signatures: 1,
                    num_readonly_signed_accounts: 0,
                    num_readonly_unsigned_accounts: 0,
                },
                account_keys: vec![Pubkey::default()],
                recent_blockhash: Hash::default(),
                instructions: vec![],
            }),
        }],
    };
    let wincode_bytes = wincode::serialize_entry(&entry).unwrap();
    let bincode_bytes = bincode_dialect::serialize_entry(&entry).unwrap();
    assert!(bincode_bytes.len() > wincode_bytes.len());

    assert_eq!(bincode_dialect::deserialize_entry(&bincode_bytes).unwrap(), entry);
    assert_eq!(wincode::deserialize_entry(&wincode_bytes).unwrap(), entry);
}

#[test]
fn test_legacy_num_required_signatures_128_fails() {
    let mut transaction = legacy_transaction();
    if let VersionedMessage::Legacy(message) = &mut transaction.message {
        message.header.num_required_signatures = 128;
    }
    type SerializeFn = fn(&VersionedTransaction) -> limcode_codec::Result<Vec<u8>>;
    for serialize in [
        wincode::serialize_transaction as SerializeFn,
        limcode::serialize_transaction,
        bincode_dialect::serialize_transaction,
    ] {
        assert_matches!(
            serialize(&transaction),
            Err(CodecError::InvalidHeader(128))
        );
    }
}

#[test]
fn test_first_byte_0x81_fails_with_invalid_version() {
    let bytes = wincode::serialize_message(&v0_transaction().message).unwrap();
    let mut bytes = bytes;
    bytes[0] = 0x81;
    assert_matches!(
        wincode::deserialize_message(&bytes),
        Err(CodecError::InvalidVersion(0x81))
    );
}

#[test]
fn test_v0_header_byte_0x80_is_legal_after_prefix() {
    // The discriminator is consumed before the header is read, so a v0
    // num_required_signatures of 0x80 is encodable and round-trips.
    let mut transaction = v0_transaction();
    if let VersionedMessage::V0(message) = &mut transaction.message {
        message.header.num_required_signatures = 0x80;
    }
    let bytes = wincode::serialize_transaction(&transaction).unwrap();
    assert_eq!(wincode::deserialize_transaction(&bytes).unwrap(), transaction);
}

#[test]
fn test_prefix_stability_under_trailing_garbage() {
    let entry = Entry {
        num_hashes: 7,
        hash: Hash::new_unique(),
        transactions: vec![legacy_transaction()],
    };
    let mut bytes = wincode::serialize_entry(&entry).unwrap();
    let clean = wincode::deserialize_entry(&bytes).unwrap();
    bytes.extend_from_slice(&[0xff; 32]);
    assert_eq!(wincode::deserialize_entry(&bytes).unwrap(), clean);
}

#[test]
fn test_entries_batch_roundtrip() {
    let entries = vec![
        Entry::default(),
        Entry {
            num_hashes: 3,
            hash: Hash::new_unique(),
            transactions: vec![legacy_transaction(), v0_transaction()],
        },
    ];
    type SerializeFn = fn(&[Entry]) -> limcode_codec::Result<Vec<u8>>;
    type DeserializeFn = fn(&[u8]) -> limcode_codec::Result<Vec<Entry>>;
    for (serialize, deserialize) in [
        (
            wincode::serialize_entries as SerializeFn,
            wincode::deserialize_entries as DeserializeFn,
        ),
        (limcode::serialize_entries, limcode::deserialize_entries),
        (
            bincode_dialect::serialize_entries,
            bincode_dialect::deserialize_entries,
        ),
    ] {
        let bytes = serialize(&entries).unwrap();
        // The top-level count is a fixed u64 in every dialect.
        assert_eq!(&bytes[..8], &2u64.to_le_bytes());
        assert_eq!(deserialize(&bytes).unwrap(), entries);
    }
}

#[test]
fn test_wincode_matches_serde_bincode_oracle() {
    // The ledger types' serde impls reproduce the wincode wire through
    // the bincode crate; use that as an independent oracle.
    let transaction = legacy_transaction();
    assert_eq!(
        wincode::serialize_transaction(&transaction).unwrap(),
        bincode::serialize(&transaction).unwrap(),
    );

    let transaction = v0_transaction();
    assert_eq!(
        wincode::serialize_transaction(&transaction).unwrap(),
        bincode::serialize(&transaction).unwrap(),
    );

    let entry = Entry {
        num_hashes: 42,
        hash: Hash::new_unique(),
        transactions: vec![legacy_transaction(), v0_transaction()],
    };
    assert_eq!(
        wincode::serialize_entry(&entry).unwrap(),
        bincode::serialize(&entry).unwrap(),
    );
}

prop_compose! {
    fn arb_instruction()(
        program_id_index in any::<u8>(),
        accounts in vec(any::<u8>(), 0..16),
        data in vec(any::<u8>(), 0..64),
    ) -> CompiledInstruction {
        CompiledInstruction { program_id_index, accounts, data }
    }
}

prop_compose! {
    fn arb_legacy_message()(
        num_required_signatures in 0u8..=127,
        num_readonly_signed_accounts in any::<u8>(),
        num_readonly_unsigned_accounts in any::<u8>(),
        keys in vec(any::<[u8; 32]>(), 0..8),
        blockhash in any::<[u8; 32]>(),
        instructions in vec(arb_instruction(), 0..4),
    ) -> LegacyMessage {
        LegacyMessage {
            header: MessageHeader {
                num_required_signatures,
                num_readonly_signed_accounts,
                num_readonly_unsigned_accounts,
            },
            account_keys: keys.into_iter().map(Pubkey::new_from_array).collect(),
            recent_blockhash: Hash::new_from_array(blockhash),
            instructions,
        }
    }
}

prop_compose! {
    fn arb_lookup()(
        key in any::<[u8; 32]>(),
        writable in vec(any::<u8>(), 0..8),
        readonly in vec(any::<u8>(), 0..8),
    ) -> AddressTableLookup {
        AddressTableLookup {
            account_key: Pubkey::new_from_array(key),
            writable_indexes: writable,
            readonly_indexes: readonly,
        }
    }
}

fn arb_message() -> impl Strategy<Value = VersionedMessage> {
    prop_oneof![
        arb_legacy_message().prop_map(VersionedMessage::Legacy),
        (arb_legacy_message(), vec(arb_lookup(), 0..3)).prop_map(|(message, lookups)| {
            VersionedMessage::V0(V0Message {
                header: message.header,
                account_keys: message.account_keys,
                recent_blockhash: message.recent_blockhash,
                instructions: message.instructions,
                address_table_lookups: lookups,
            })
        }),
    ]
}

prop_compose! {
    fn arb_entry()(
        num_hashes in any::<u64>(),
        hash in any::<[u8; 32]>(),
        transactions in vec(
            (vec(any::<u8>(), 64..=64), arb_message()).prop_map(|(sig, message)| {
                let mut bytes = [0u8; 64];
                bytes.copy_from_slice(&sig);
                VersionedTransaction {
                    signatures: vec![Signature::new_from_array(bytes)],
                    message,
                }
            }),
            0..4,
        ),
    ) -> Entry {
        Entry { num_hashes, hash: Hash::new_from_array(hash), transactions }
    }
}

proptest! {
    #[test]
    fn test_limcode_ties_wincode(entry in arb_entry()) {
        let wincode_bytes = wincode::serialize_entry(&entry).unwrap();
        let limcode_bytes = limcode::serialize_entry(&entry).unwrap();
        prop_assert_eq!(&wincode_bytes, &limcode_bytes);
        prop_assert_eq!(limcode::serialized_entry_size(&entry), wincode_bytes.len());
    }

    #[test]
    fn test_roundtrip_all_dialects(entry in arb_entry()) {
        let bytes = wincode::serialize_entry(&entry).unwrap();
        prop_assert_eq!(wincode::deserialize_entry(&bytes).unwrap(), entry.clone());

        let bytes = bincode_dialect::serialize_entry(&entry).unwrap();
        prop_assert_eq!(bincode_dialect::deserialize_entry(&bytes).unwrap(), entry);
    }

    #[test]
    fn test_serde_oracle_ties_wincode(entry in arb_entry()) {
        prop_assert_eq!(
            wincode::serialize_entry(&entry).unwrap(),
            bincode::serialize(&entry).unwrap(),
        );
    }
}

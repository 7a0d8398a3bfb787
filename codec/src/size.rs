//! Exact encoded-size walkers.
//!
//! The limcode encoder sizes its output before writing so the buffer is
//! allocated once and never grows. These walkers mirror the encode
//! walkers in `ser` exactly; they perform no validation, since the
//! write pass reports any error on the same input.

use {
    crate::config::Config,
    limcode_gossip::{ContactInfo, SocketEntry, Version},
    limcode_ledger::{
        AddressTableLookup, CompiledInstruction, Entry, LegacyMessage, V0Message, VersionedMessage,
        VersionedTransaction, HASH_BYTES, MESSAGE_HEADER_LENGTH, PUBKEY_BYTES, SIGNATURE_BYTES,
    },
    std::net::IpAddr,
};

#[inline]
pub(crate) fn varint_u64_size(value: u64) -> usize {
    if value == 0 {
        1
    } else {
        (70 - value.leading_zeros() as usize) / 7
    }
}

pub(crate) fn instruction_size<C: Config>(instruction: &CompiledInstruction) -> usize {
    1 + C::len_size(instruction.accounts.len())
        + instruction.accounts.len()
        + C::len_size(instruction.data.len())
        + instruction.data.len()
}

pub(crate) fn lookup_size<C: Config>(lookup: &AddressTableLookup) -> usize {
    PUBKEY_BYTES
        + C::len_size(lookup.writable_indexes.len())
        + lookup.writable_indexes.len()
        + C::len_size(lookup.readonly_indexes.len())
        + lookup.readonly_indexes.len()
}

pub(crate) fn legacy_message_size<C: Config>(message: &LegacyMessage) -> usize {
    MESSAGE_HEADER_LENGTH
        + C::len_size(message.account_keys.len())
        + message.account_keys.len() * PUBKEY_BYTES
        + HASH_BYTES
        + C::len_size(message.instructions.len())
        + message
            .instructions
            .iter()
            .map(instruction_size::<C>)
            .sum::<usize>()
}

pub(crate) fn v0_message_size<C: Config>(message: &V0Message) -> usize {
    MESSAGE_HEADER_LENGTH
        + C::len_size(message.account_keys.len())
        + message.account_keys.len() * PUBKEY_BYTES
        + HASH_BYTES
        + C::len_size(message.instructions.len())
        + message
            .instructions
            .iter()
            .map(instruction_size::<C>)
            .sum::<usize>()
        + C::len_size(message.address_table_lookups.len())
        + message
            .address_table_lookups
            .iter()
            .map(lookup_size::<C>)
            .sum::<usize>()
}

pub(crate) fn message_size<C: Config>(message: &VersionedMessage) -> usize {
    match message {
        VersionedMessage::Legacy(message) => legacy_message_size::<C>(message),
        // One extra byte for the version prefix.
        VersionedMessage::V0(message) => 1 + v0_message_size::<C>(message),
    }
}

pub(crate) fn transaction_size<C: Config>(transaction: &VersionedTransaction) -> usize {
    C::len_size(transaction.signatures.len())
        + transaction.signatures.len() * SIGNATURE_BYTES
        + message_size::<C>(&transaction.message)
}

pub(crate) fn entry_size<C: Config>(entry: &Entry) -> usize {
    8 + HASH_BYTES
        + C::len_size(entry.transactions.len())
        + entry
            .transactions
            .iter()
            .map(transaction_size::<C>)
            .sum::<usize>()
}

pub(crate) fn entries_size<C: Config>(entries: &[Entry]) -> usize {
    8 + entries.iter().map(entry_size::<C>).sum::<usize>()
}

fn gossip_version_size(version: &Version) -> usize {
    varint_u64_size(u64::from(version.major))
        + varint_u64_size(u64::from(version.minor))
        + varint_u64_size(u64::from(version.patch))
        + 4
        + 4
        + varint_u64_size(u64::from(version.client))
}

fn ip_addr_size(addr: &IpAddr) -> usize {
    match addr {
        IpAddr::V4(_) => 4 + 4,
        IpAddr::V6(_) => 4 + 16,
    }
}

fn socket_entry_size(socket: &SocketEntry) -> usize {
    2 + varint_u64_size(u64::from(socket.offset))
}

pub(crate) fn contact_info_size(info: &ContactInfo) -> usize {
    let short_vec_len = |len: usize| <crate::config::Wincode as Config>::len_size(len);
    PUBKEY_BYTES
        + varint_u64_size(info.wallclock)
        + 8
        + 2
        + gossip_version_size(&info.version)
        + short_vec_len(info.addrs.len())
        + info.addrs.iter().map(ip_addr_size).sum::<usize>()
        + short_vec_len(info.sockets.len())
        + info.sockets.iter().map(socket_entry_size).sum::<usize>()
        + short_vec_len(0)
}

//! Dialect-generic encode walkers.
//!
//! Each function appends one domain value to the writer. The walk order
//! is the wire format; the only dialect-dependent step is the inner
//! vector length prefix, routed through [`Config`].

use {
    crate::config::{Config, Wincode},
    limcode_gossip::{ContactInfo, SocketEntry, Version, CRDS_DATA_CONTACT_INFO},
    limcode_io::{CodecError, Result, Writer},
    limcode_ledger::{
        AddressTableLookup, CompiledInstruction, Entry, LegacyMessage, MessageHeader, V0Message,
        VersionedMessage, VersionedTransaction, MAX_LEGACY_REQUIRED_SIGNATURES,
        MESSAGE_VERSION_PREFIX,
    },
    std::net::IpAddr,
};

pub(crate) fn write_header(writer: &mut Writer, header: &MessageHeader) {
    writer.write_u8(header.num_required_signatures);
    writer.write_u8(header.num_readonly_signed_accounts);
    writer.write_u8(header.num_readonly_unsigned_accounts);
}

pub(crate) fn write_instruction<C: Config>(
    writer: &mut Writer,
    instruction: &CompiledInstruction,
) -> Result<()> {
    writer.write_u8(instruction.program_id_index);
    C::write_len(writer, instruction.accounts.len())?;
    writer.write_bytes(&instruction.accounts);
    C::write_len(writer, instruction.data.len())?;
    writer.write_bytes(&instruction.data);
    Ok(())
}

pub(crate) fn write_lookup<C: Config>(
    writer: &mut Writer,
    lookup: &AddressTableLookup,
) -> Result<()> {
    writer.write_bytes(lookup.account_key.as_ref());
    C::write_len(writer, lookup.writable_indexes.len())?;
    writer.write_bytes(&lookup.writable_indexes);
    C::write_len(writer, lookup.readonly_indexes.len())?;
    writer.write_bytes(&lookup.readonly_indexes);
    Ok(())
}

/// The first emitted byte is `num_required_signatures`, which shares its
/// position with the version prefix, so values above 127 are rejected
/// here rather than producing bytes that would decode as a versioned
/// message.
pub(crate) fn write_legacy_message<C: Config>(
    writer: &mut Writer,
    message: &LegacyMessage,
) -> Result<()> {
    let num_required_signatures = message.header.num_required_signatures;
    if num_required_signatures > MAX_LEGACY_REQUIRED_SIGNATURES {
        return Err(CodecError::InvalidHeader(num_required_signatures));
    }
    write_header(writer, &message.header);
    C::write_len(writer, message.account_keys.len())?;
    for key in &message.account_keys {
        writer.write_bytes(key.as_ref());
    }
    writer.write_bytes(message.recent_blockhash.as_ref());
    C::write_len(writer, message.instructions.len())?;
    for instruction in &message.instructions {
        write_instruction::<C>(writer, instruction)?;
    }
    Ok(())
}

pub(crate) fn write_v0_message<C: Config>(writer: &mut Writer, message: &V0Message) -> Result<()> {
    write_header(writer, &message.header);
    C::write_len(writer, message.account_keys.len())?;
    for key in &message.account_keys {
        writer.write_bytes(key.as_ref());
    }
    writer.write_bytes(message.recent_blockhash.as_ref());
    C::write_len(writer, message.instructions.len())?;
    for instruction in &message.instructions {
        write_instruction::<C>(writer, instruction)?;
    }
    C::write_len(writer, message.address_table_lookups.len())?;
    for lookup in &message.address_table_lookups {
        write_lookup::<C>(writer, lookup)?;
    }
    Ok(())
}

pub(crate) fn write_message<C: Config>(
    writer: &mut Writer,
    message: &VersionedMessage,
) -> Result<()> {
    match message {
        VersionedMessage::Legacy(message) => write_legacy_message::<C>(writer, message),
        VersionedMessage::V0(message) => {
            writer.write_u8(MESSAGE_VERSION_PREFIX);
            write_v0_message::<C>(writer, message)
        }
    }
}

pub(crate) fn write_transaction<C: Config>(
    writer: &mut Writer,
    transaction: &VersionedTransaction,
) -> Result<()> {
    C::write_len(writer, transaction.signatures.len())?;
    for signature in &transaction.signatures {
        writer.write_bytes(signature.as_ref());
    }
    write_message::<C>(writer, &transaction.message)
}

pub(crate) fn write_entry<C: Config>(writer: &mut Writer, entry: &Entry) -> Result<()> {
    writer.write_u64(entry.num_hashes);
    writer.write_bytes(entry.hash.as_ref());
    C::write_len(writer, entry.transactions.len())?;
    for transaction in &entry.transactions {
        write_transaction::<C>(writer, transaction)?;
    }
    Ok(())
}

/// A slice of entries is u64-prefixed in every dialect; only the inner
/// vectors differ.
pub(crate) fn write_entries<C: Config>(writer: &mut Writer, entries: &[Entry]) -> Result<()> {
    writer.write_u64(entries.len() as u64);
    for entry in entries {
        write_entry::<C>(writer, entry)?;
    }
    Ok(())
}

// Gossip is defined on the wincode wire only; there is no fixed-u64
// rendition, so these walkers are not generic over Config.

pub(crate) fn write_gossip_version(writer: &mut Writer, version: &Version) {
    writer.write_varint_u64(u64::from(version.major));
    writer.write_varint_u64(u64::from(version.minor));
    writer.write_varint_u64(u64::from(version.patch));
    writer.write_u32(version.commit);
    writer.write_u32(version.feature_set);
    writer.write_varint_u64(u64::from(version.client));
}

pub(crate) fn write_ip_addr(writer: &mut Writer, addr: &IpAddr) {
    match addr {
        IpAddr::V4(v4) => {
            writer.write_u32(0);
            writer.write_bytes(&v4.octets());
        }
        IpAddr::V6(v6) => {
            writer.write_u32(1);
            writer.write_bytes(&v6.octets());
        }
    }
}

pub(crate) fn write_socket_entry(writer: &mut Writer, socket: &SocketEntry) {
    writer.write_u8(socket.key);
    writer.write_u8(socket.index);
    writer.write_varint_u64(u64::from(socket.offset));
}

pub(crate) fn write_contact_info(writer: &mut Writer, info: &ContactInfo) -> Result<()> {
    writer.write_bytes(info.pubkey.as_ref());
    writer.write_varint_u64(info.wallclock);
    writer.write_u64(info.outset);
    writer.write_u16(info.shred_version);
    write_gossip_version(writer, &info.version);
    Wincode::write_len(writer, info.addrs.len())?;
    for addr in &info.addrs {
        write_ip_addr(writer, addr);
    }
    Wincode::write_len(writer, info.sockets.len())?;
    for socket in &info.sockets {
        write_socket_entry(writer, socket);
    }
    // Extensions: none are defined, so the prefix is always zero.
    Wincode::write_len(writer, 0)?;
    Ok(())
}

/// ContactInfo framed as a CrdsData payload: a u32 discriminant, then
/// the contact info itself.
pub(crate) fn write_crds_contact_info(writer: &mut Writer, info: &ContactInfo) -> Result<()> {
    writer.write_u32(CRDS_DATA_CONTACT_INFO);
    write_contact_info(writer, info)
}

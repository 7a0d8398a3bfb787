//! Dialect-generic decode walkers.
//!
//! Mirrors of the walkers in `ser`. Every read is bounds-checked by the
//! reader; a failed walk reports the first offending offset and never
//! yields a partial value.

use {
    crate::config::{Config, Wincode},
    limcode_gossip::{ContactInfo, SocketEntry, Version},
    limcode_io::{CodecError, Reader, Result},
    limcode_ledger::{
        AddressTableLookup, CompiledInstruction, Entry, Hash, LegacyMessage, MessageHeader, Pubkey,
        Signature, V0Message, VersionedMessage, VersionedTransaction, MESSAGE_VERSION_PREFIX,
    },
    std::net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

// Upper bound on speculative Vec preallocation. A hostile length prefix
// can claim up to u16::MAX (or u64::MAX under bincode) elements; actual
// growth past this point is driven by bytes really present.
const MAX_PREALLOC: usize = 1024;

#[inline]
fn vec_with_capacity<T>(len: usize) -> Vec<T> {
    Vec::with_capacity(len.min(MAX_PREALLOC))
}

pub(crate) fn read_header(reader: &mut Reader<'_>) -> Result<MessageHeader> {
    Ok(MessageHeader {
        num_required_signatures: reader.read_u8()?,
        num_readonly_signed_accounts: reader.read_u8()?,
        num_readonly_unsigned_accounts: reader.read_u8()?,
    })
}

pub(crate) fn read_instruction<C: Config>(reader: &mut Reader<'_>) -> Result<CompiledInstruction> {
    let program_id_index = reader.read_u8()?;
    let accounts_len = C::read_len(reader)?;
    let accounts = reader.read_bytes(accounts_len)?.to_vec();
    let data_len = C::read_len(reader)?;
    let data = reader.read_bytes(data_len)?.to_vec();
    Ok(CompiledInstruction {
        program_id_index,
        accounts,
        data,
    })
}

pub(crate) fn read_lookup<C: Config>(reader: &mut Reader<'_>) -> Result<AddressTableLookup> {
    let account_key = Pubkey::new_from_array(reader.read_array()?);
    let writable_len = C::read_len(reader)?;
    let writable_indexes = reader.read_bytes(writable_len)?.to_vec();
    let readonly_len = C::read_len(reader)?;
    let readonly_indexes = reader.read_bytes(readonly_len)?.to_vec();
    Ok(AddressTableLookup {
        account_key,
        writable_indexes,
        readonly_indexes,
    })
}

fn read_account_keys<C: Config>(reader: &mut Reader<'_>) -> Result<Vec<Pubkey>> {
    let len = C::read_len(reader)?;
    let mut keys = vec_with_capacity(len);
    for _ in 0..len {
        keys.push(Pubkey::new_from_array(reader.read_array()?));
    }
    Ok(keys)
}

fn read_instructions<C: Config>(reader: &mut Reader<'_>) -> Result<Vec<CompiledInstruction>> {
    let len = C::read_len(reader)?;
    let mut instructions = vec_with_capacity(len);
    for _ in 0..len {
        instructions.push(read_instruction::<C>(reader)?);
    }
    Ok(instructions)
}

/// Legacy walk starting at `num_required_signatures`; the caller has
/// already ruled out a version prefix.
pub(crate) fn read_legacy_message<C: Config>(reader: &mut Reader<'_>) -> Result<LegacyMessage> {
    Ok(LegacyMessage {
        header: read_header(reader)?,
        account_keys: read_account_keys::<C>(reader)?,
        recent_blockhash: Hash::new_from_array(reader.read_array()?),
        instructions: read_instructions::<C>(reader)?,
    })
}

pub(crate) fn read_v0_message<C: Config>(reader: &mut Reader<'_>) -> Result<V0Message> {
    let header = read_header(reader)?;
    let account_keys = read_account_keys::<C>(reader)?;
    let recent_blockhash = Hash::new_from_array(reader.read_array()?);
    let instructions = read_instructions::<C>(reader)?;
    let lookups_len = C::read_len(reader)?;
    let mut address_table_lookups = vec_with_capacity(lookups_len);
    for _ in 0..lookups_len {
        address_table_lookups.push(read_lookup::<C>(reader)?);
    }
    Ok(V0Message {
        header,
        account_keys,
        recent_blockhash,
        instructions,
        address_table_lookups,
    })
}

/// Peek the discriminator byte without consuming it. A set top bit must
/// be exactly the v0 prefix; any other high byte is an invalid version.
/// A clear top bit means the byte is the legacy
/// `num_required_signatures` and the legacy walk starts on it.
pub(crate) fn read_message<C: Config>(reader: &mut Reader<'_>) -> Result<VersionedMessage> {
    let first = reader.peek_u8()?;
    if first & MESSAGE_VERSION_PREFIX != 0 {
        if first != MESSAGE_VERSION_PREFIX {
            return Err(CodecError::InvalidVersion(first));
        }
        reader.skip(1)?;
        Ok(VersionedMessage::V0(read_v0_message::<C>(reader)?))
    } else {
        Ok(VersionedMessage::Legacy(read_legacy_message::<C>(reader)?))
    }
}

pub(crate) fn read_transaction<C: Config>(reader: &mut Reader<'_>) -> Result<VersionedTransaction> {
    let signatures_len = C::read_len(reader)?;
    let mut signatures = vec_with_capacity(signatures_len);
    for _ in 0..signatures_len {
        signatures.push(Signature::new_from_array(reader.read_array()?));
    }
    Ok(VersionedTransaction {
        signatures,
        message: read_message::<C>(reader)?,
    })
}

pub(crate) fn read_entry<C: Config>(reader: &mut Reader<'_>) -> Result<Entry> {
    let num_hashes = reader.read_u64()?;
    let hash = Hash::new_from_array(reader.read_array()?);
    let transactions_len = C::read_len(reader)?;
    let mut transactions = vec_with_capacity(transactions_len);
    for _ in 0..transactions_len {
        transactions.push(read_transaction::<C>(reader)?);
    }
    Ok(Entry {
        num_hashes,
        hash,
        transactions,
    })
}

pub(crate) fn read_entries<C: Config>(reader: &mut Reader<'_>) -> Result<Vec<Entry>> {
    let len = reader.read_u64()?;
    let len = usize::try_from(len).map_err(|_| CodecError::LengthOverflow(usize::MAX))?;
    let mut entries = vec_with_capacity(len);
    for _ in 0..len {
        entries.push(read_entry::<C>(reader)?);
    }
    Ok(entries)
}

fn read_varint_u16(reader: &mut Reader<'_>) -> Result<u16> {
    let offset = reader.position();
    let value = reader.read_varint_u64()?;
    u16::try_from(value).map_err(|_| CodecError::InvalidEncoding { offset })
}

pub(crate) fn read_gossip_version(reader: &mut Reader<'_>) -> Result<Version> {
    Ok(Version {
        major: read_varint_u16(reader)?,
        minor: read_varint_u16(reader)?,
        patch: read_varint_u16(reader)?,
        commit: reader.read_u32()?,
        feature_set: reader.read_u32()?,
        client: read_varint_u16(reader)?,
    })
}

pub(crate) fn read_ip_addr(reader: &mut Reader<'_>) -> Result<IpAddr> {
    let offset = reader.position();
    match reader.read_u32()? {
        0 => Ok(IpAddr::V4(Ipv4Addr::from(reader.read_array::<4>()?))),
        1 => Ok(IpAddr::V6(Ipv6Addr::from(reader.read_array::<16>()?))),
        _ => Err(CodecError::InvalidEncoding { offset }),
    }
}

pub(crate) fn read_socket_entry(reader: &mut Reader<'_>) -> Result<SocketEntry> {
    Ok(SocketEntry {
        key: reader.read_u8()?,
        index: reader.read_u8()?,
        offset: read_varint_u16(reader)?,
    })
}

pub(crate) fn read_contact_info(reader: &mut Reader<'_>) -> Result<ContactInfo> {
    let pubkey = Pubkey::new_from_array(reader.read_array()?);
    let wallclock = reader.read_varint_u64()?;
    let outset = reader.read_u64()?;
    let shred_version = reader.read_u16()?;
    let version = read_gossip_version(reader)?;

    let addrs_len = Wincode::read_len(reader)?;
    let mut addrs = vec_with_capacity(addrs_len);
    for _ in 0..addrs_len {
        addrs.push(read_ip_addr(reader)?);
    }

    let sockets_len = Wincode::read_len(reader)?;
    let mut sockets = vec_with_capacity(sockets_len);
    for _ in 0..sockets_len {
        sockets.push(read_socket_entry(reader)?);
    }

    // No extension variants are defined, so any claimed entry is
    // undecodable.
    let extensions_offset = reader.position();
    if Wincode::read_len(reader)? != 0 {
        return Err(CodecError::InvalidEncoding {
            offset: extensions_offset,
        });
    }

    Ok(ContactInfo {
        pubkey,
        wallclock,
        outset,
        shred_version,
        version,
        addrs,
        sockets,
    })
}

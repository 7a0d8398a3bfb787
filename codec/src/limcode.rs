//! The sized ShortVec encoder.
//!
//! Output bytes are identical to [`crate::wincode`] on every input; the
//! difference is purely mechanical. Each serialize call first walks the
//! value with the size walkers in `size`, allocates the output buffer
//! once at its exact final length, then runs the shared encode walk.
//! Large byte payloads go through the writer's non-temporal bulk copy.
//!
//! Decoding has no sized counterpart; the limcode decode functions are
//! the wincode ones.

use {
    crate::{config::Wincode, ser, size},
    limcode_gossip::ContactInfo,
    limcode_io::{Result, Writer},
    limcode_ledger::{Entry, VersionedMessage, VersionedTransaction},
};

pub use crate::wincode::{
    deserialize_entries, deserialize_entry, deserialize_message, deserialize_transaction,
};

fn write_sized(
    size: usize,
    write: impl FnOnce(&mut Writer) -> Result<()>,
) -> Result<Vec<u8>> {
    let mut writer = Writer::with_capacity(size);
    write(&mut writer)?;
    debug_assert_eq!(writer.len(), size);
    Ok(writer.into_vec())
}

pub fn serialize_entry(entry: &Entry) -> Result<Vec<u8>> {
    write_sized(size::entry_size::<Wincode>(entry), |writer| {
        ser::write_entry::<Wincode>(writer, entry)
    })
}

pub fn serialize_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    write_sized(size::entries_size::<Wincode>(entries), |writer| {
        ser::write_entries::<Wincode>(writer, entries)
    })
}

pub fn serialize_transaction(transaction: &VersionedTransaction) -> Result<Vec<u8>> {
    write_sized(size::transaction_size::<Wincode>(transaction), |writer| {
        ser::write_transaction::<Wincode>(writer, transaction)
    })
}

pub fn serialize_message(message: &VersionedMessage) -> Result<Vec<u8>> {
    write_sized(size::message_size::<Wincode>(message), |writer| {
        ser::write_message::<Wincode>(writer, message)
    })
}

pub fn serialize_contact_info(info: &ContactInfo) -> Result<Vec<u8>> {
    write_sized(size::contact_info_size(info), |writer| {
        ser::write_contact_info(writer, info)
    })
}

/// Exact encoded length of an entry without producing bytes.
pub fn serialized_entry_size(entry: &Entry) -> usize {
    size::entry_size::<Wincode>(entry)
}

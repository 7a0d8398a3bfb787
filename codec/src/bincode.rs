//! The fixed-length dialect.
//!
//! Every vector length, inner or top-level, is a fixed little-endian
//! u64. Fixed arrays, integers, and the message version discriminator
//! are identical to the ShortVec dialect.
//!
//! Gossip contact info has no fixed-u64 rendition; its wire format is
//! defined once, in [`crate::wincode`].

use {
    crate::{config::Bincode, de, ser},
    limcode_io::{Reader, Result, Writer},
    limcode_ledger::{Entry, VersionedMessage, VersionedTransaction},
};

pub fn serialize_entry(entry: &Entry) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_entry::<Bincode>(&mut writer, entry)?;
    Ok(writer.into_vec())
}

pub fn serialize_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_entries::<Bincode>(&mut writer, entries)?;
    Ok(writer.into_vec())
}

pub fn serialize_transaction(transaction: &VersionedTransaction) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_transaction::<Bincode>(&mut writer, transaction)?;
    Ok(writer.into_vec())
}

pub fn serialize_message(message: &VersionedMessage) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_message::<Bincode>(&mut writer, message)?;
    Ok(writer.into_vec())
}

pub fn deserialize_entry(bytes: &[u8]) -> Result<Entry> {
    de::read_entry::<Bincode>(&mut Reader::new(bytes))
}

pub fn deserialize_entries(bytes: &[u8]) -> Result<Vec<Entry>> {
    de::read_entries::<Bincode>(&mut Reader::new(bytes))
}

pub fn deserialize_transaction(bytes: &[u8]) -> Result<VersionedTransaction> {
    de::read_transaction::<Bincode>(&mut Reader::new(bytes))
}

pub fn deserialize_message(bytes: &[u8]) -> Result<VersionedMessage> {
    de::read_message::<Bincode>(&mut Reader::new(bytes))
}

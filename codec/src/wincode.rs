//! The reference ShortVec dialect.
//!
//! Inner vector lengths are ShortVec-prefixed; a top-level slice of
//! entries keeps its fixed u64 count. The limcode encoder in
//! [`crate::limcode`] produces byte-identical output and exists only as
//! a faster rendition of this dialect.

use {
    crate::{config::Wincode, de, ser},
    limcode_gossip::ContactInfo,
    limcode_io::{Reader, Result, Writer},
    limcode_ledger::{Entry, VersionedMessage, VersionedTransaction},
};

pub fn serialize_entry(entry: &Entry) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_entry::<Wincode>(&mut writer, entry)?;
    Ok(writer.into_vec())
}

pub fn serialize_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_entries::<Wincode>(&mut writer, entries)?;
    Ok(writer.into_vec())
}

pub fn serialize_transaction(transaction: &VersionedTransaction) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_transaction::<Wincode>(&mut writer, transaction)?;
    Ok(writer.into_vec())
}

pub fn serialize_message(message: &VersionedMessage) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_message::<Wincode>(&mut writer, message)?;
    Ok(writer.into_vec())
}

pub fn serialize_contact_info(info: &ContactInfo) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_contact_info(&mut writer, info)?;
    Ok(writer.into_vec())
}

/// ContactInfo wrapped as a CrdsData payload (u32 discriminant first).
pub fn serialize_crds_contact_info(info: &ContactInfo) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    ser::write_crds_contact_info(&mut writer, info)?;
    Ok(writer.into_vec())
}

pub fn deserialize_entry(bytes: &[u8]) -> Result<Entry> {
    de::read_entry::<Wincode>(&mut Reader::new(bytes))
}

pub fn deserialize_entries(bytes: &[u8]) -> Result<Vec<Entry>> {
    de::read_entries::<Wincode>(&mut Reader::new(bytes))
}

pub fn deserialize_transaction(bytes: &[u8]) -> Result<VersionedTransaction> {
    de::read_transaction::<Wincode>(&mut Reader::new(bytes))
}

pub fn deserialize_message(bytes: &[u8]) -> Result<VersionedMessage> {
    de::read_message::<Wincode>(&mut Reader::new(bytes))
}

pub fn deserialize_contact_info(bytes: &[u8]) -> Result<ContactInfo> {
    de::read_contact_info(&mut Reader::new(bytes))
}

//! AppendVec member scanning.
//!
//! An `accounts/` tar member is a sequence of stored-account records.
//! Each record is a 136-byte header followed by `data_len` bytes of
//! account data, and the next record starts at the following 8-byte
//! boundary relative to the member start. The member length is
//! authoritative: a record whose claimed `data_len` overruns it marks
//! the end of that member.

use limcode_ledger::{Hash, Pubkey};

/// Byte size of a stored-account header.
pub const STORED_META_SIZE: usize = 136;

const WRITE_VERSION_OFFSET: usize = 0x00;
const DATA_LEN_OFFSET: usize = 0x08;
const PUBKEY_OFFSET: usize = 0x10;
const LAMPORTS_OFFSET: usize = 0x30;
const RENT_EPOCH_OFFSET: usize = 0x38;
const OWNER_OFFSET: usize = 0x40;
const EXECUTABLE_OFFSET: usize = 0x60;
// 7 padding bytes at 0x61 are not validated.
const HASH_OFFSET: usize = 0x68;

/// One account as stored in an AppendVec, borrowing the member bytes.
#[derive(Debug, Clone, Copy)]
pub struct StoredAccount<'a> {
    /// Obsolete store-ordering counter, still present in the format.
    pub write_version: u64,
    pub pubkey: Pubkey,
    pub lamports: u64,
    pub rent_epoch: u64,
    pub owner: Pubkey,
    pub executable: bool,
    pub hash: Hash,
    pub data: &'a [u8],
}

/// Visitor verdict after each account.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Scan {
    Continue,
    Stop,
}

#[inline]
fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut array = [0u8; 8];
    array.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(array)
}

#[inline]
fn read_key(bytes: &[u8], offset: usize) -> [u8; 32] {
    let mut array = [0u8; 32];
    array.copy_from_slice(&bytes[offset..offset + 32]);
    array
}

/// Scan every complete record of one accounts member, in order.
///
/// Stops at the first record that overruns the member (a truncated
/// store, tolerated) or when the visitor returns [`Scan::Stop`].
/// Returns `Stop` iff the visitor stopped the scan.
pub fn scan_append_vec<'a, F>(member: &'a [u8], visitor: &mut F) -> Scan
where
    F: FnMut(&StoredAccount<'a>) -> Scan,
{
    let mut offset = 0usize;
    while offset + STORED_META_SIZE <= member.len() {
        let header = &member[offset..offset + STORED_META_SIZE];
        let data_len = read_u64(header, DATA_LEN_OFFSET);

        let data_start = offset + STORED_META_SIZE;
        let Some(data_end) = (data_len as usize)
            .checked_add(data_start)
            .filter(|end| *end <= member.len())
        else {
            // Truncated record: the member ends here.
            break;
        };

        let account = StoredAccount {
            write_version: read_u64(header, WRITE_VERSION_OFFSET),
            pubkey: Pubkey::new_from_array(read_key(header, PUBKEY_OFFSET)),
            lamports: read_u64(header, LAMPORTS_OFFSET),
            rent_epoch: read_u64(header, RENT_EPOCH_OFFSET),
            owner: Pubkey::new_from_array(read_key(header, OWNER_OFFSET)),
            executable: header[EXECUTABLE_OFFSET] != 0,
            hash: Hash::new_from_array(read_key(header, HASH_OFFSET)),
            data: &member[data_start..data_end],
        };
        if visitor(&account) == Scan::Stop {
            return Scan::Stop;
        }

        // Records are 8-byte aligned relative to the member start.
        offset = data_end;
        offset += offset.wrapping_neg() % 8;
    }
    Scan::Continue
}

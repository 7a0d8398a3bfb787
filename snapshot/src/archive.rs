//! Streaming tar-in-zstd member walk.
//!
//! The archive is decompressed in large chunks and reassembled into a
//! single buffer that only ever holds the current `accounts/` member
//! plus the stream tail. Non-account members are never buffered: once
//! identified, their remaining bytes are dropped straight from the
//! decompressor output.

use {
    crate::{append_vec::Scan, SnapshotError},
    log::{debug, trace},
    std::{
        fs::File,
        io::{BufReader, Read},
        path::Path,
    },
    zstd::stream::read::Decoder,
};

/// Compressed read-ahead handed to the decompressor.
const INPUT_BUFFER_SIZE: usize = 8 * 1024 * 1024;
/// Decompressed bytes consumed per pipeline iteration.
const CHUNK_SIZE: usize = 64 * 1024 * 1024;
/// Ceiling on the reassembly buffer. Accounts members are far smaller
/// in practice; a member that does not fit is a malformed archive.
const MEMBER_BUFFER_SIZE: usize = 256 * 1024 * 1024;

const TAR_RECORD_SIZE: usize = 512;
const TAR_NAME_LEN: usize = 100;
const TAR_SIZE_OFFSET: usize = 124;
const TAR_SIZE_LEN: usize = 12;

const ACCOUNTS_PREFIX: &[u8] = b"accounts/";

/// Decode the octal ASCII size field of a tar header.
///
/// Digits run up to the first non-octal byte (NUL or space terminated
/// in practice). A field with no digits at all is malformed.
fn parse_octal(field: &[u8]) -> Option<u64> {
    let mut value = 0u64;
    let mut digits = 0;
    for &byte in field {
        if !(b'0'..=b'7').contains(&byte) {
            break;
        }
        value = value.checked_mul(8)?.checked_add(u64::from(byte - b'0'))?;
        digits += 1;
    }
    (digits > 0).then_some(value)
}

/// Walk the archive, invoking `on_member` with the payload of each
/// non-empty `accounts/` member in archive order.
///
/// Returns after the end-of-archive sentinel, at end of stream, or as
/// soon as `on_member` returns [`Scan::Stop`].
pub(crate) fn walk_accounts_members<F>(path: &Path, on_member: &mut F) -> Result<(), SnapshotError>
where
    F: FnMut(&[u8]) -> Scan,
{
    let file = File::open(path).map_err(SnapshotError::Io)?;
    let reader = BufReader::with_capacity(INPUT_BUFFER_SIZE, file);
    let mut decoder = Decoder::with_buffer(reader).map_err(SnapshotError::Decompress)?;

    let mut chunk = vec![0u8; CHUNK_SIZE];
    // Reassembly buffer: buf[pos..] is the unconsumed tar stream tail.
    let mut buf: Vec<u8> = Vec::new();
    let mut pos = 0usize;
    // Bytes of a non-account member still to drop from the stream.
    let mut skip = 0usize;

    loop {
        let read = decoder.read(&mut chunk).map_err(SnapshotError::Decompress)?;
        if read == 0 {
            // Stream ended without a sentinel; everything parseable has
            // been delivered.
            return Ok(());
        }

        let mut incoming = &chunk[..read];
        if skip > 0 {
            if read <= skip {
                skip -= read;
                continue;
            }
            incoming = &chunk[skip..read];
            skip = 0;
            buf.clear();
            pos = 0;
        }

        if buf.len() + incoming.len() > MEMBER_BUFFER_SIZE {
            // Compact: move the unconsumed tail to the front.
            buf.drain(..pos);
            pos = 0;
            if buf.len() + incoming.len() > MEMBER_BUFFER_SIZE {
                return Err(SnapshotError::InvalidArchive("member exceeds buffer ceiling"));
            }
        }
        buf.extend_from_slice(incoming);

        while pos + TAR_RECORD_SIZE <= buf.len() {
            let header = &buf[pos..pos + TAR_RECORD_SIZE];
            if header[0] == 0 {
                // End-of-archive sentinel.
                return Ok(());
            }

            let size = parse_octal(&header[TAR_SIZE_OFFSET..TAR_SIZE_OFFSET + TAR_SIZE_LEN])
                .ok_or(SnapshotError::InvalidArchive("unparseable size field"))?;
            let size = usize::try_from(size)
                .map_err(|_| SnapshotError::InvalidArchive("size field out of range"))?;
            let padded = size
                .checked_next_multiple_of(TAR_RECORD_SIZE)
                .ok_or(SnapshotError::InvalidArchive("size field out of range"))?;
            let total = TAR_RECORD_SIZE + padded;

            let name = &header[..TAR_NAME_LEN];
            let is_accounts = name.starts_with(ACCOUNTS_PREFIX) && size > 0;

            if !is_accounts {
                trace!("skipping member ({size} bytes)");
                let available = buf.len() - pos;
                if total <= available {
                    pos += total;
                } else {
                    // Drop the buffered part now, the rest as it arrives.
                    skip = total - available;
                    pos = buf.len();
                }
                continue;
            }

            if pos + total > buf.len() {
                // Wait for the rest of this member.
                break;
            }

            debug!("accounts member: {size} bytes");
            let member = &buf[pos + TAR_RECORD_SIZE..pos + TAR_RECORD_SIZE + size];
            if on_member(member) == Scan::Stop {
                return Ok(());
            }
            pos += total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_octal() {
        assert_eq!(parse_octal(b"00000000144\0"), Some(100));
        assert_eq!(parse_octal(b"0\0"), Some(0));
        assert_eq!(parse_octal(b"777 "), Some(511));
        assert_eq!(parse_octal(b"x\0"), None);
        assert_eq!(parse_octal(b"\0"), None);
    }
}

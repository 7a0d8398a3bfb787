//! Order-preserving parallel batch encode.
//!
//! Entries in a batch are independent, so each one can be encoded on a
//! worker into its own buffer and the buffers stitched together in
//! input order. The result is byte-identical to the sequential
//! [`crate::limcode::serialize_entries`]; parallelism lives entirely
//! outside the encoder.

use {
    crate::{config::Wincode, limcode, size},
    limcode_io::{Result, Writer},
    limcode_ledger::Entry,
    rayon::prelude::*,
};

/// Encode a batch of entries across the rayon thread pool.
///
/// Worth it for batches whose encoded size is large enough to amortize
/// the fan-out; for small batches the sequential encoder wins.
pub fn serialize_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    let encoded: Vec<Vec<u8>> = entries
        .par_iter()
        .map(limcode::serialize_entry)
        .collect::<Result<_>>()?;

    let total: usize = encoded.iter().map(Vec::len).sum();
    let mut writer = Writer::with_capacity(8 + total);
    writer.write_u64(entries.len() as u64);
    for bytes in &encoded {
        writer.write_bytes(bytes);
    }
    debug_assert_eq!(writer.len(), size::entries_size::<Wincode>(entries));
    Ok(writer.into_vec())
}

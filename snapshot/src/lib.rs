//! Streaming parser for Solana snapshot archives (`.tar.zst`).
//!
//! A snapshot is a zstd-compressed tar archive; the members under
//! `accounts/` are AppendVec stores holding the cluster's accounts.
//! This crate decompresses the archive as a stream and visits every
//! stored account without materializing the archive, one account
//! borrow at a time.
//!
//! Two entry points:
//! - [`parse_snapshot_stats`] folds the whole archive into running
//!   totals with no per-account allocation.
//! - [`stream_snapshot`] hands each account to a caller-provided
//!   visitor, which can stop the parse early with [`Scan::Stop`].
//!
//! Accounts are visited in archive order. A truncated accounts member
//! ends that member's scan without failing the parse; decompression
//! and tar framing errors are fatal.

use {
    log::info,
    std::path::Path,
};

pub mod append_vec;
mod archive;
mod error;

pub use {
    append_vec::{scan_append_vec, Scan, StoredAccount, STORED_META_SIZE},
    error::SnapshotError,
};

/// Running totals over every account in a snapshot.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotStats {
    pub total_accounts: u64,
    pub total_lamports: u64,
    pub total_data_bytes: u64,
    pub executable_accounts: u64,
    /// Largest single account data length seen.
    pub max_data_size: u64,
}

impl SnapshotStats {
    fn record(&mut self, account: &StoredAccount<'_>) {
        let data_len = account.data.len() as u64;
        self.total_accounts += 1;
        self.total_lamports = self.total_lamports.saturating_add(account.lamports);
        self.total_data_bytes = self.total_data_bytes.saturating_add(data_len);
        if account.executable {
            self.executable_accounts += 1;
        }
        self.max_data_size = self.max_data_size.max(data_len);
    }

    pub fn data_accounts(&self) -> u64 {
        self.total_accounts - self.executable_accounts
    }

    /// Total balance in SOL.
    pub fn total_sol(&self) -> f64 {
        self.total_lamports as f64 / 1e9
    }
}

/// Visit every account in the archive and return the running totals.
pub fn parse_snapshot_stats(path: impl AsRef<Path>) -> Result<SnapshotStats, SnapshotError> {
    let path = path.as_ref();
    info!("parsing snapshot {}", path.display());
    let mut stats = SnapshotStats::default();
    archive::walk_accounts_members(path, &mut |member| {
        scan_append_vec(member, &mut |account| {
            stats.record(account);
            Scan::Continue
        })
    })?;
    info!(
        "parsed {} accounts, {} data bytes",
        stats.total_accounts, stats.total_data_bytes
    );
    Ok(stats)
}

/// Invoke `visitor` once per stored account, in archive order.
///
/// Returns the number of accounts visited. A [`Scan::Stop`] verdict
/// terminates the parse cleanly after the current account.
pub fn stream_snapshot<F>(path: impl AsRef<Path>, mut visitor: F) -> Result<u64, SnapshotError>
where
    F: FnMut(&StoredAccount<'_>) -> Scan,
{
    let mut count = 0u64;
    archive::walk_accounts_members(path.as_ref(), &mut |member| {
        scan_append_vec(member, &mut |account| {
            count += 1;
            visitor(account)
        })
    })?;
    Ok(count)
}

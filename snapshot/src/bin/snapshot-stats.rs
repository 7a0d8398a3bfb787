//! Print account totals for a snapshot archive.
//!
//! Usage: `snapshot-stats [PATH]`, defaulting to `snapshot.tar.zst` in
//! the working directory. Exits non-zero with a single diagnostic line
//! on failure.

use {limcode_snapshot::parse_snapshot_stats, std::process::ExitCode, std::time::Instant};

fn main() -> ExitCode {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "snapshot.tar.zst".to_string());

    let start = Instant::now();
    let stats = match parse_snapshot_stats(&path) {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("snapshot-stats: {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed().as_secs_f64();

    println!("snapshot:     {path}");
    println!("accounts:     {}", stats.total_accounts);
    println!("executable:   {}", stats.executable_accounts);
    println!("total SOL:    {:.2}", stats.total_sol());
    println!(
        "data:         {:.2} MB (largest account {} bytes)",
        stats.total_data_bytes as f64 / 1e6,
        stats.max_data_size
    );
    if elapsed > 0.0 {
        println!(
            "parsed in {elapsed:.2}s ({:.0} accounts/s)",
            stats.total_accounts as f64 / elapsed
        );
    }
    ExitCode::SUCCESS
}

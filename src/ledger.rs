//! Local append-only report ledger.
//!
//! This is an external collaborator of the scoring core, not part of it:
//! an append-only JSONL log with a fabricated transaction identifier and
//! random block/gas metadata. It deliberately implements none of the
//! semantics of a real distributed ledger; callers treat the returned
//! receipt as opaque. The convention is to record a profile only when its
//! fake probability reaches [`crate::risk::MEDIUM_RISK_THRESHOLD`].

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{Result, SybilError};
use crate::risk::HIGH_RISK_THRESHOLD;

/// One appended report row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: Uuid,
    pub platform: String,
    pub username: String,
    pub risk_score: f64,
    /// Serialized explanation, stored verbatim.
    pub evidence: String,
    pub tx_hash: String,
    pub block_number: u64,
    pub gas_used: u64,
    pub timestamp: DateTime<Utc>,
}

/// Opaque receipt returned for one append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    pub tx_hash: String,
    pub block_number: u64,
    pub gas_used: u64,
}

/// Aggregate counts over the ledger file, computed in a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_reports: u64,
    /// Rows whose risk score reaches [`HIGH_RISK_THRESHOLD`].
    pub high_risk_reports: u64,
}

/// Append-only JSONL ledger backed by a local file.
///
/// Every append opens the file for the duration of one write; the handle is
/// released when the call returns.
pub struct Ledger {
    path: PathBuf,
    rng: Mutex<StdRng>,
}

impl Ledger {
    /// Open (or create on first append) a ledger at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Ledger {
            path,
            rng: Mutex::new(StdRng::from_os_rng()),
        })
    }

    /// Open a ledger with a pinned metadata RNG, for tests.
    pub fn with_seed(path: impl Into<PathBuf>, seed: u64) -> Result<Self> {
        let mut ledger = Self::open(path)?;
        ledger.rng = Mutex::new(StdRng::seed_from_u64(seed));
        Ok(ledger)
    }

    /// Append one report row and return its opaque receipt.
    pub fn record(
        &self,
        platform: &str,
        username: &str,
        risk_score: f64,
        evidence: &str,
    ) -> Result<LedgerReceipt> {
        let timestamp = Utc::now();

        let mut hasher = Sha256::new();
        hasher.update(platform.as_bytes());
        hasher.update(username.as_bytes());
        hasher.update(risk_score.to_le_bytes());
        hasher.update(timestamp.to_rfc3339().as_bytes());
        let tx_hash = format!("0x{}", hex::encode(hasher.finalize()));

        let (block_number, gas_used) = {
            let mut rng = self.rng.lock();
            (
                rng.random_range(1_000_000..10_000_000u64),
                rng.random_range(21_000..100_000u64),
            )
        };

        let record = LedgerRecord {
            id: Uuid::new_v4(),
            platform: platform.to_string(),
            username: username.to_string(),
            risk_score,
            evidence: evidence.to_string(),
            tx_hash: tx_hash.clone(),
            block_number,
            gas_used,
            timestamp,
        };

        let line = serde_json::to_string(&record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;

        log::info!("ledger record appended for @{username} on {platform}");
        Ok(LedgerReceipt {
            tx_hash,
            block_number,
            gas_used,
        })
    }

    /// Read up to `limit` rows, newest first. A missing file is an empty
    /// ledger, not an error.
    pub fn records(&self, limit: usize) -> Result<Vec<LedgerRecord>> {
        let mut records = self.read_all()?;
        records.reverse();
        records.truncate(limit);
        Ok(records)
    }

    /// Count totals in one pass over the file, so the two counts can never
    /// disagree about which rows they saw.
    pub fn stats(&self) -> Result<LedgerStats> {
        let records = self.read_all()?;
        let total_reports = records.len() as u64;
        let high_risk_reports = records
            .iter()
            .filter(|record| record.risk_score >= HIGH_RISK_THRESHOLD)
            .count() as u64;
        Ok(LedgerStats {
            total_reports,
            high_risk_reports,
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<LedgerRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: LedgerRecord = serde_json::from_str(line).map_err(|err| {
                SybilError::ledger(format!(
                    "malformed ledger row at {}:{}: {err}",
                    self.path.display(),
                    line_no + 1
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_ledger(dir: &TempDir) -> Ledger {
        Ledger::with_seed(dir.path().join("ledger.jsonl"), 42).unwrap()
    }

    #[test]
    fn test_empty_ledger_reads_empty() {
        let dir = TempDir::new().unwrap();
        let ledger = temp_ledger(&dir);
        assert!(ledger.records(50).unwrap().is_empty());
        assert_eq!(
            ledger.stats().unwrap(),
            LedgerStats {
                total_reports: 0,
                high_risk_reports: 0
            }
        );
    }

    #[test]
    fn test_record_returns_receipt_with_fabricated_metadata() {
        let dir = TempDir::new().unwrap();
        let ledger = temp_ledger(&dir);
        let receipt = ledger
            .record("twitter", "follow4follow99", 0.91, "[\"No profile picture\"]")
            .unwrap();

        assert!(receipt.tx_hash.starts_with("0x"));
        assert_eq!(receipt.tx_hash.len(), 2 + 64);
        assert!((1_000_000..10_000_000).contains(&receipt.block_number));
        assert!((21_000..100_000).contains(&receipt.gas_used));
    }

    #[test]
    fn test_records_newest_first_with_limit() {
        let dir = TempDir::new().unwrap();
        let ledger = temp_ledger(&dir);
        for i in 0..5 {
            ledger
                .record("instagram", &format!("user{i}"), 0.5, "[]")
                .unwrap();
        }

        let records = ledger.records(3).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].username, "user4");
        assert_eq!(records[2].username, "user2");
    }

    #[test]
    fn test_stats_counts_in_one_pass() {
        let dir = TempDir::new().unwrap();
        let ledger = temp_ledger(&dir);
        ledger.record("twitter", "a", 0.45, "[]").unwrap();
        ledger.record("twitter", "b", 0.7, "[]").unwrap();
        ledger.record("twitter", "c", 0.95, "[]").unwrap();

        let stats = ledger.stats().unwrap();
        assert_eq!(stats.total_reports, 3);
        assert_eq!(stats.high_risk_reports, 2);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let dir = TempDir::new().unwrap();
        let ledger = temp_ledger(&dir);
        ledger.record("twitter", "a", 0.8, "[]").unwrap();
        fs::write(ledger.path(), "not json\n").unwrap();

        let err = ledger.records(10).unwrap_err();
        assert!(matches!(err, SybilError::Ledger(_)));
    }

    #[test]
    fn test_distinct_appends_get_distinct_hashes() {
        let dir = TempDir::new().unwrap();
        let ledger = temp_ledger(&dir);
        let a = ledger.record("twitter", "a", 0.8, "[]").unwrap();
        let b = ledger.record("twitter", "b", 0.8, "[]").unwrap();
        assert_ne!(a.tx_hash, b.tx_hash);
    }
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::{Friend, FriendId, Ledger, format_cents};

/// Point-in-time view of the ledger for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub exported_at: DateTime<Utc>,
    pub selected: Option<FriendId>,
    pub friends: Vec<Friend>,
}

/// Exporter for writing ledger balances to various formats
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export balances to CSV format
    pub fn balances_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["id", "name", "image", "balance", "status"])?;

        let mut count = 0;
        for friend in self.ledger.friends() {
            csv_writer.write_record([
                friend.id.to_string(),
                friend.name.clone(),
                friend.image_ref.clone(),
                format_cents(friend.balance),
                friend.status().to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            exported_at: Utc::now(),
            selected: self.ledger.selected().map(|f| f.id),
            friends: self.ledger.friends().to_vec(),
        }
    }

    /// Export the full ledger as pretty-printed JSON
    pub fn snapshot_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let snapshot = self.snapshot();
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        Ok(snapshot.friends.len())
    }
}

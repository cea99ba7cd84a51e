use std::path::Path;

use rusqlite::{Connection, params};

use ecan_core::{AttentionSystem, AttentionValue, EcanConfig};

use crate::error::{Result, StoreError};
use crate::schema;

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).ok();
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // --- Save ---

    /// Persist the full attention ledger and bank balance, replacing
    /// whatever snapshot was stored before.
    pub fn save_system(&self, system: &AttentionSystem) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute_batch("DELETE FROM attention;")?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO attention (node_id, sti, lti, vlti) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (id, value) in system.iter() {
                insert.execute(params![id, value.sti, value.lti, value.vlti as i64])?;
            }
        }

        tx.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES ('bank', ?1)",
            [format!("{}", system.attention_bank())],
        )?;

        tx.commit()?;
        tracing::debug!("saved {} attention entries", system.len());
        Ok(())
    }

    // --- Load ---

    /// Rebuild a live system from the stored snapshot under the given
    /// config. A fresh database loads as an empty system with the config's
    /// opening bank balance.
    pub fn load_system(&self, config: EcanConfig) -> Result<AttentionSystem> {
        let mut stmt = self
            .conn
            .prepare("SELECT node_id, sti, lti, vlti FROM attention")?;
        let entries: Vec<(String, AttentionValue)> = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let sti: i64 = row.get(1)?;
                let lti: i64 = row.get(2)?;
                let vlti: i64 = row.get(3)?;
                Ok((id, AttentionValue::new(sti, lti, vlti != 0)))
            })?
            .collect::<std::result::Result<_, _>>()?;

        let bank = match self.get_metadata("bank")? {
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| StoreError::InvalidData(format!("unparseable bank balance: {raw}")))?,
            None => config.attention_bank,
        };

        AttentionSystem::restore(config, entries, bank)
            .map_err(|e| StoreError::InvalidData(e.to_string()))
    }

    /// Number of persisted attention entries.
    pub fn entry_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT count(*) FROM attention", [], |row| row.get(0))?;
        Ok(count)
    }
}

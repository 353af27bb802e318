use rusqlite::params;

use crate::error::{RelataError, Result};

impl super::Database {
    /// Replace an owner's related-items list wholesale
    pub fn replace_related(&self, owner_id: &str, ordered_target_ids: &[String]) -> Result<()> {
        if !self.item_exists(owner_id)? {
            return Err(RelataError::ItemNotFound {
                id: owner_id.to_string(),
            });
        }

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| RelataError::transaction("begin replace_related", e))?;

        tx.execute(
            "DELETE FROM related_items WHERE owner_id = ?1",
            params![owner_id],
        )
        .map_err(|e| RelataError::item_operation(owner_id, "clear related items of", e))?;

        for (position, target_id) in ordered_target_ids.iter().enumerate() {
            tx.execute(
                "INSERT INTO related_items (owner_id, position, target_id) VALUES (?1, ?2, ?3)",
                params![owner_id, position as i64, target_id],
            )
            .map_err(|e| RelataError::item_operation(owner_id, "write related items of", e))?;
        }

        tx.commit()
            .map_err(|e| RelataError::transaction("commit replace_related", e))?;
        Ok(())
    }

    /// Persisted list for an owner, empty when never ranked
    pub fn get_related(&self, owner_id: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT target_id FROM related_items WHERE owner_id = ?1 ORDER BY position")
            .map_err(|e| crate::map_db_err!("prepare related query", e))?;

        let targets: Vec<String> = stmt
            .query_map(params![owner_id], |r| r.get(0))
            .and_then(|rows| rows.collect())
            .map_err(|e| crate::map_db_err!("read related items", e))?;
        Ok(targets)
    }

    pub fn count_owners_with_related(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(DISTINCT owner_id) FROM related_items",
                [],
                |r| r.get(0),
            )
            .map_err(|e| crate::map_db_err!("count related owners", e))
    }
}

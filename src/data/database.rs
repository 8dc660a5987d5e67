//! Embedded document store.
//!
//! Every document is a JSON object kept in the `documents` table under the
//! name of its collection. Lookups filter on a single top-level field with
//! `json_extract`, which is all the portal ever needs. Named sequences live in
//! `counters` and are bumped with one upsert so the new value is read in the
//! same statement that writes it.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::utils::enums::Collection;

pub type Document = Map<String, Value>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS documents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        collection TEXT NOT NULL,
        body TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS documents_collection ON documents (collection);
    CREATE TABLE IF NOT EXISTS counters (
        name TEXT PRIMARY KEY,
        number INTEGER NOT NULL
    );
";

/// Result of moving a document between two collections.
#[derive(Debug, PartialEq)]
pub enum Move {
    Moved(Document),
    Missing,
    AlreadyPresent,
}

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Store> {
        Store::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Store> {
        Store::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Store> {
        conn.execute_batch(SCHEMA)?;
        Ok(Store {
            conn: Mutex::new(conn),
        })
    }

    // A panic while holding the lock cannot leave a half-applied statement
    // behind, so a poisoned guard is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_one(&self, collection: Collection, document: &Document) -> Result<()> {
        let conn = self.lock();
        insert(&conn, collection, document)
    }

    /// Inserts `document` unless the collection already holds one with
    /// `field = value`. Returns whether the insert happened.
    pub fn insert_unique(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
        document: &Document,
    ) -> Result<bool> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        if find_row(&tx, collection, field, value)?.is_some() {
            return Ok(false);
        }
        insert(&tx, collection, document)?;
        tx.commit()?;
        Ok(true)
    }

    pub fn find_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY id")?;
        let bodies = stmt
            .query_map(params![collection.name()], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        let mut documents = Vec::with_capacity(bodies.len());
        for body in bodies {
            documents.push(serde_json::from_str(&body)?);
        }
        Ok(documents)
    }

    pub fn is_empty(&self, collection: Collection) -> Result<bool> {
        let conn = self.lock();
        let found = conn
            .query_row(
                "SELECT 1 FROM documents WHERE collection = ?1 LIMIT 1",
                params![collection.name()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_none())
    }

    pub fn find_one(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>> {
        let conn = self.lock();
        Ok(find_row(&conn, collection, field, value)?.map(|(_, document)| document))
    }

    /// Deletes the oldest document matching the filter.
    pub fn delete_one(&self, collection: Collection, field: &str, value: &str) -> Result<bool> {
        let conn = self.lock();
        let deleted = conn.execute(
            "DELETE FROM documents WHERE id = (
                SELECT id FROM documents
                WHERE collection = ?1 AND json_extract(body, ?2) = ?3
                ORDER BY id LIMIT 1
            )",
            params![collection.name(), json_path(field), value],
        )?;
        Ok(deleted > 0)
    }

    /// Deletes the oldest matching document and hands it back.
    pub fn take_one(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let Some((id, document)) = find_row(&tx, collection, field, value)? else {
            return Ok(None);
        };
        tx.execute("DELETE FROM documents WHERE id = ?1", params![id])?;

        tx.commit()?;
        Ok(Some(document))
    }

    /// Writes `fields` over the oldest matching document, leaving its other
    /// fields untouched. Returns false when nothing matched.
    pub fn set_fields(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
        fields: &Document,
    ) -> Result<bool> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let Some((id, mut document)) = find_row(&tx, collection, field, value)? else {
            return Ok(false);
        };
        for (key, new_value) in fields {
            document.insert(key.clone(), new_value.clone());
        }
        tx.execute(
            "UPDATE documents SET body = ?1 WHERE id = ?2",
            params![serde_json::to_string(&document)?, id],
        )?;

        tx.commit()?;
        Ok(true)
    }

    /// Moves the oldest document matching `field = value` from `from` to `to`
    /// in one transaction. Nothing changes when the target already holds a
    /// document with the same value, or when the source has none.
    pub fn move_one(
        &self,
        from: Collection,
        to: Collection,
        field: &str,
        value: &str,
    ) -> Result<Move> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        if find_row(&tx, to, field, value)?.is_some() {
            return Ok(Move::AlreadyPresent);
        }
        let Some((id, document)) = find_row(&tx, from, field, value)? else {
            return Ok(Move::Missing);
        };

        insert(&tx, to, &document)?;
        tx.execute("DELETE FROM documents WHERE id = ?1", params![id])?;

        tx.commit()?;
        Ok(Move::Moved(document))
    }

    /// Increments the named sequence and returns its new value. A sequence
    /// that does not exist yet starts at 0, so its first value is 1.
    pub fn next_sequence(&self, name: &str) -> Result<i64> {
        let conn = self.lock();
        let number = conn.query_row(
            "INSERT INTO counters (name, number) VALUES (?1, 1)
             ON CONFLICT(name) DO UPDATE SET number = number + 1
             RETURNING number",
            params![name],
            |row| row.get(0),
        )?;
        Ok(number)
    }

    pub fn sequence(&self, name: &str) -> Result<Option<i64>> {
        let conn = self.lock();
        let number = conn
            .query_row(
                "SELECT number FROM counters WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(number)
    }
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field)
}

fn insert(conn: &Connection, collection: Collection, document: &Document) -> Result<()> {
    conn.execute(
        "INSERT INTO documents (collection, body) VALUES (?1, ?2)",
        params![collection.name(), serde_json::to_string(document)?],
    )?;
    Ok(())
}

fn find_row(
    conn: &Connection,
    collection: Collection,
    field: &str,
    value: &str,
) -> Result<Option<(i64, Document)>> {
    let row = conn
        .query_row(
            "SELECT id, body FROM documents
             WHERE collection = ?1 AND json_extract(body, ?2) = ?3
             ORDER BY id LIMIT 1",
            params![collection.name(), json_path(field), value],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    match row {
        Some((id, body)) => Ok(Some((id, serde_json::from_str(&body)?))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn find_one_matches_on_a_single_field() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_one(Collection::Applications, &doc(json!({"email": "a@x.io", "jobTitle": "Engineer"})))
            .unwrap();
        store
            .insert_one(Collection::Applications, &doc(json!({"email": "b@x.io", "jobTitle": "Tester"})))
            .unwrap();

        let found = store
            .find_one(Collection::Applications, "email", "b@x.io")
            .unwrap()
            .unwrap();
        assert_eq!(found["jobTitle"], "Tester");
        assert!(store
            .find_one(Collection::Shortlist, "email", "b@x.io")
            .unwrap()
            .is_none());
    }

    #[test]
    fn find_all_keeps_insertion_order() {
        let store = Store::open_in_memory().unwrap();
        for title in ["one", "two", "three"] {
            store
                .insert_one(Collection::Jobs, &doc(json!({"jobtitle": title})))
                .unwrap();
        }

        let titles: Vec<String> = store
            .find_all(Collection::Jobs)
            .unwrap()
            .into_iter()
            .map(|job| job["jobtitle"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[test]
    fn delete_one_removes_only_the_oldest_match() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_one(Collection::Jobs, &doc(json!({"name": "dup", "n": 1})))
            .unwrap();
        store
            .insert_one(Collection::Jobs, &doc(json!({"name": "dup", "n": 2})))
            .unwrap();

        assert!(store.delete_one(Collection::Jobs, "name", "dup").unwrap());
        let left = store.find_all(Collection::Jobs).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0]["n"], 2);

        assert!(!store.delete_one(Collection::Jobs, "name", "missing").unwrap());
    }

    #[test]
    fn set_fields_leaves_other_fields_alone() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_one(
                Collection::Jobs,
                &doc(json!({"jobId": "Job1", "jobtitle": "Engineer", "walkin": "no"})),
            )
            .unwrap();

        let updated = store
            .set_fields(Collection::Jobs, "jobId", "Job1", &doc(json!({"walkin": null, "minsalary": 10})))
            .unwrap();
        assert!(updated);

        let job = store.find_one(Collection::Jobs, "jobId", "Job1").unwrap().unwrap();
        assert_eq!(job["jobtitle"], "Engineer");
        assert_eq!(job["walkin"], Value::Null);
        assert_eq!(job["minsalary"], 10);

        assert!(!store
            .set_fields(Collection::Jobs, "jobId", "Job9", &doc(json!({"x": 1})))
            .unwrap());
    }

    #[test]
    fn move_one_relocates_and_refuses_duplicates() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_one(Collection::Applications, &doc(json!({"email": "a@x.io"})))
            .unwrap();

        let moved = store
            .move_one(Collection::Applications, Collection::Shortlist, "email", "a@x.io")
            .unwrap();
        assert_eq!(moved, Move::Moved(doc(json!({"email": "a@x.io"}))));
        assert!(store.find_all(Collection::Applications).unwrap().is_empty());
        assert_eq!(store.find_all(Collection::Shortlist).unwrap().len(), 1);

        assert_eq!(
            store
                .move_one(Collection::Applications, Collection::Shortlist, "email", "a@x.io")
                .unwrap(),
            Move::AlreadyPresent
        );
        assert_eq!(
            store
                .move_one(Collection::Applications, Collection::Shortlist, "email", "b@x.io")
                .unwrap(),
            Move::Missing
        );

        store
            .insert_one(Collection::Applications, &doc(json!({"email": "a@x.io"})))
            .unwrap();
        assert_eq!(
            store
                .move_one(Collection::Applications, Collection::Shortlist, "email", "a@x.io")
                .unwrap(),
            Move::AlreadyPresent
        );
        assert_eq!(store.find_all(Collection::Applications).unwrap().len(), 1);
        assert_eq!(store.find_all(Collection::Shortlist).unwrap().len(), 1);
    }

    #[test]
    fn is_empty_looks_at_one_collection() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.is_empty(Collection::Admins).unwrap());

        store
            .insert_one(Collection::Jobs, &doc(json!({"jobtitle": "Engineer"})))
            .unwrap();
        assert!(store.is_empty(Collection::Admins).unwrap());
        assert!(!store.is_empty(Collection::Jobs).unwrap());
    }

    #[test]
    fn insert_unique_refuses_a_second_document_with_the_same_key() {
        let store = Store::open_in_memory().unwrap();
        let first = doc(json!({"username": "root", "password": "one"}));
        let second = doc(json!({"username": "root", "password": "two"}));

        assert!(store.insert_unique(Collection::Admins, "username", "root", &first).unwrap());
        assert!(!store.insert_unique(Collection::Admins, "username", "root", &second).unwrap());

        let admins = store.find_all(Collection::Admins).unwrap();
        assert_eq!(admins, vec![first]);
    }

    #[test]
    fn sequences_start_at_one_and_advance_by_one() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.sequence("Job").unwrap(), None);
        assert_eq!(store.next_sequence("Job").unwrap(), 1);
        assert_eq!(store.next_sequence("Job").unwrap(), 2);
        assert_eq!(store.next_sequence("Other").unwrap(), 1);
        assert_eq!(store.sequence("Job").unwrap(), Some(2));
    }
}

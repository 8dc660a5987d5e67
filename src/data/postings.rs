use serde_json::Value;

use crate::data::database::{Document, Store};
use crate::error::Result;
use crate::utils::enums::Collection;

/// Name of the sequence behind generated job ids, and their prefix.
pub const JOB_COUNTER: &str = "Job";

/// Fields an admin may overwrite on an existing posting.
pub const UPDATABLE_FIELDS: [&str; 11] = [
    "description",
    "facetoface",
    "joblocation",
    "jobtitle",
    "jobtype",
    "maxsalary",
    "minsalary",
    "qualification",
    "telephone",
    "walkin",
    "writtentest",
];

pub fn job_id(counter: &str, number: i64) -> String {
    format!("{counter}{number}")
}

/// Claims the next job id from the persisted sequence.
pub fn next_job_id(store: &Store) -> Result<String> {
    let number = store.next_sequence(JOB_COUNTER)?;
    Ok(job_id(JOB_COUNTER, number))
}

pub fn create(store: &Store, job: &Document) -> Result<()> {
    store.insert_one(Collection::Jobs, job)
}

pub fn get_all(store: &Store) -> Result<Vec<Document>> {
    store.find_all(Collection::Jobs)
}

/// Overwrites the updatable fields present in `body`. Returns false when no
/// posting carries `job_id`.
pub fn update(store: &Store, job_id: &str, body: &Document) -> Result<bool> {
    let fields: Document = UPDATABLE_FIELDS
        .iter()
        .filter_map(|field| body.get(*field).map(|value| (field.to_string(), value.clone())))
        .collect();
    store.set_fields(Collection::Jobs, "jobId", job_id, &fields)
}

pub fn delete(store: &Store, job_id: &str) -> Result<bool> {
    store.delete_one(Collection::Jobs, "jobId", job_id)
}

/// Sets `job` on the posting stored under `name`.
pub fn update_by_name(store: &Store, name: &str, job: Value) -> Result<bool> {
    let mut fields = Document::new();
    fields.insert("job".to_string(), job);
    store.set_fields(Collection::Jobs, "name", name, &fields)
}

pub fn delete_by_name(store: &Store, name: &str) -> Result<bool> {
    store.delete_one(Collection::Jobs, "name", name)
}

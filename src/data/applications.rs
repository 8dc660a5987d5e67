use crate::data::database::{Document, Move, Store};
use crate::error::Result;
use crate::utils::enums::Collection;

pub fn save(store: &Store, application: &Document) -> Result<()> {
    store.insert_one(Collection::Applications, application)
}

pub fn get_all(store: &Store) -> Result<Vec<Document>> {
    store.find_all(Collection::Applications)
}

pub fn get_shortlisted(store: &Store) -> Result<Vec<Document>> {
    store.find_all(Collection::Shortlist)
}

/// Moves the application filed under `email` onto the shortlist.
pub fn shortlist(store: &Store, email: &str) -> Result<Move> {
    store.move_one(Collection::Applications, Collection::Shortlist, "email", email)
}

/// Removes the application filed under `email`, returning it when present.
pub fn reject(store: &Store, email: &str) -> Result<Option<Document>> {
    store.take_one(Collection::Applications, "email", email)
}

pub fn delete_shortlisted(store: &Store, email: &str) -> Result<bool> {
    store.delete_one(Collection::Shortlist, "email", email)
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::database::{Document, Store};
use crate::error::Result;
use crate::utils::encrypt;
use crate::utils::enums::Collection;

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
}

impl AdminAccount {
    /// Builds an account with `password` already hashed.
    pub fn new(username: String, password: &str, hash_secret: &str) -> Result<AdminAccount> {
        Ok(AdminAccount {
            username,
            password: encrypt::hash_password(password, hash_secret)?,
        })
    }

    /// Stores the account unless the username is taken. Returns whether it
    /// was stored.
    pub fn dump(&self, store: &Store) -> Result<bool> {
        let mut document = Document::new();
        document.insert("username".to_string(), Value::String(self.username.clone()));
        document.insert("password".to_string(), Value::String(self.password.clone()));
        store.insert_unique(Collection::Admins, "username", &self.username, &document)
    }

    pub fn get_by_username(store: &Store, username: &str) -> Result<Option<AdminAccount>> {
        match store.find_one(Collection::Admins, "username", username)? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Whether any admin account exists yet.
    pub fn any(store: &Store) -> Result<bool> {
        Ok(!store.is_empty(Collection::Admins)?)
    }

    pub fn verify(&self, password: &str, hash_secret: &str) -> Result<bool> {
        encrypt::verify_password(password, &self.password, hash_secret)
    }
}

fn from_document(document: Document) -> Result<AdminAccount> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_account_keeps_only_the_hash() {
        let store = Store::open_in_memory().unwrap();
        let account = AdminAccount::new("root".to_string(), "s3cret", "pepper").unwrap();
        assert!(!AdminAccount::any(&store).unwrap());
        assert!(account.dump(&store).unwrap());
        assert!(AdminAccount::any(&store).unwrap());

        let loaded = AdminAccount::get_by_username(&store, "root").unwrap().unwrap();
        assert_ne!(loaded.password, "s3cret");
        assert!(loaded.verify("s3cret", "pepper").unwrap());
        assert!(!loaded.verify("wrong", "pepper").unwrap());
    }

    #[test]
    fn taken_username_is_not_stored_twice() {
        let store = Store::open_in_memory().unwrap();
        let first = AdminAccount::new("root".to_string(), "one", "pepper").unwrap();
        let second = AdminAccount::new("root".to_string(), "two", "pepper").unwrap();

        assert!(first.dump(&store).unwrap());
        assert!(!second.dump(&store).unwrap());

        let loaded = AdminAccount::get_by_username(&store, "root").unwrap().unwrap();
        assert_eq!(loaded.password, first.password);
    }
}

pub mod admins;
pub mod applications;
pub mod database;
pub mod postings;

pub mod job_id;
pub mod token;

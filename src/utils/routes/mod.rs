pub mod accounts;
pub mod applications;
pub mod jobs;
pub mod misc;
pub mod shortlist;

pub mod board;
pub mod encrypt;
pub mod enums;
pub mod mailer;
pub mod middleware;
pub mod routes;
pub mod structures;
pub mod token;

pub mod board;
pub mod boards;
pub mod init;
pub mod issues;
pub mod open;
pub mod users;

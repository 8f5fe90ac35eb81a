pub mod bom;
pub mod compose;
pub mod config;
pub mod delete;
pub mod dispatch;
pub mod import;
pub mod init;
pub mod units;
pub mod value;

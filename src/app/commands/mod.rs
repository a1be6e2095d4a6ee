pub mod create_domain;
pub mod init;
pub mod list;
pub mod run;
pub mod schedule;
pub mod validate;

mod config_dir;
mod create_domain;
mod init;
mod list;
mod run;
mod schedule;
mod validate;

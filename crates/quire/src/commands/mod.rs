pub mod build;
pub mod create;
pub mod init;

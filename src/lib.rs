pub mod commands;
pub mod config;
pub mod env_file;
pub mod git;
pub mod identity;
pub mod port;

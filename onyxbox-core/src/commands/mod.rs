// src/commands/mod.rs
pub mod init;
mod api;

pub use api::{CheckReport, Commands};

pub use init::{data_root, ensure_initialized, InitReport};

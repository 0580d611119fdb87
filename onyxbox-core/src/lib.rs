//! OnyxBox core: the composer's submission gate around the `onyx-filter`
//! matcher, its configuration, and the moderation logbook.

pub mod commands;
pub mod config;
pub mod services;
pub mod utils;

pub use commands::{data_root, ensure_initialized, Commands, InitReport};
pub use config::OnyxConfig;
pub use services::composer::{Decision, Draft, GateVerdict, RejectReason, SubmissionGate};
pub use services::screening::Screener;

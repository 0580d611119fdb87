// src/services/mod.rs

pub mod audit;      // moderation logbook records
pub mod composer;   // submission gate used by the message composer
pub mod screening;  // lexicon source + matcher/redactor built from config

pub use composer::SubmissionGate;
pub use screening::Screener;

pub mod backup;
pub mod config;
pub mod log;
pub mod materialize;
pub mod streak;
pub mod toggle;
pub mod tracker;

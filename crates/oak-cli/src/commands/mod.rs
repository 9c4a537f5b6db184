pub mod audit;
pub mod config;
pub mod dispatch;
pub mod entry;
pub mod export;
pub mod import;
pub mod record;
pub mod shared;
pub mod source;
pub mod stats;
pub mod taxon;

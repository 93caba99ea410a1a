pub mod config;
pub mod error;
pub mod ledger;
pub mod market;
pub mod provider;
pub mod queue;
pub mod stats;
pub mod types;

pub use config::CoreConfig;
pub use error::{TransferError, TransferResult};
pub use market::Marketplace;

pub mod repositories;
pub mod stores;

pub use stores::{InMemoryBookingStore, InMemoryRuleStore};

//! Ledger store abstraction - the per-user document database interface.

mod memory;
mod store;

pub use memory::MemoryLedgerStore;
pub use store::{Document, DocumentFields, FieldFilter, FilterOp, LedgerStore};

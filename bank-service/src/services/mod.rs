pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoBankStore;
pub use memory::InMemoryBankStore;
pub use metrics::{get_metrics, init_metrics};
pub use store::{BankStore, StoreError};

pub mod check_in_store_repo;
pub mod in_memory_store;

pub use check_in_store_repo::SqliteCheckInStore;
pub use in_memory_store::InMemoryCheckInStore;

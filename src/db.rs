pub mod store;
pub use store::InventoryStore;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

#[cfg(test)]
pub mod memory_store;
#[cfg(test)]
pub mod test_db;

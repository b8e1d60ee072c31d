mod database;
mod memory;

pub use database::SeaOrmStore;
pub use memory::MemoryStore;

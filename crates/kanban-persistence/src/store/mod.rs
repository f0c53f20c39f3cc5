pub mod atomic_writer;
pub mod file_store;
pub mod memory_store;

pub use atomic_writer::AtomicWriter;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

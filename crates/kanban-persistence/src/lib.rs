pub mod debounce;
pub mod gateway;
pub mod serialization;
pub mod store;
pub mod traits;

pub use debounce::{DebouncedWriter, SaveHandle, SaveReport};
pub use gateway::PersistenceGateway;
pub use serialization::*;
pub use store::*;
pub use traits::*;

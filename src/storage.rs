pub mod backend;
mod document;
/// The write-through participant store.
pub mod store;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use store::{PersistenceError, Store};

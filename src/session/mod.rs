pub mod provider;
pub mod storage;

pub use provider::{AuthProvider, Session, TOKEN_KEY, USER_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

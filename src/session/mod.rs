pub mod store;

pub use store::{FileSessionStore, MemorySessionStore, Session, SessionStore};

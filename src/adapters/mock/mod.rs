pub mod chat_transport;
pub mod store;

pub use chat_transport::{ChatTransport as RecordingTransport, Sent};
pub use store::InMemoryStore;

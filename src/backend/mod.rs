//! Backend module: the trait the screens talk to and its in-memory implementation

mod mock;
mod traits;

pub use mock::InMemoryBackend;
pub use traits::BackendTrait;

#[cfg(test)]
pub use traits::MockBackendTrait;

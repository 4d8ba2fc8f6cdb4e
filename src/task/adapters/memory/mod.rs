//! In-memory task repository adapter.

mod repository;

pub use repository::InMemoryTaskRepository;

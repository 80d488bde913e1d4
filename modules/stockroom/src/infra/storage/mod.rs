//! Document store adapter.
//!
//! `DocumentCollection` is the raw per-collection contract (MongoDB or the
//! in-memory double); the repositories map between its documents and the
//! domain models. `ObjectId` never leaves this module tree.

pub mod clock_in_repo;
pub mod collection;
pub mod entity;
pub mod items_repo;
pub mod memory;
pub mod mongo;

pub use clock_in_repo::DocumentClockInRepository;
pub use collection::{DocumentCollection, StoreError, UpdateCounts};
pub use items_repo::DocumentItemsRepository;
pub use memory::InMemoryCollection;
pub use mongo::{MongoCollection, MongoStore};

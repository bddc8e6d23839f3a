//! Test helpers shared across Toolgate crates.

pub mod classifier;
pub mod context;
pub mod sleeper;
pub mod store;

pub use classifier::{FailingClassifier, FixedClassifier};
pub use context::{dispatcher_with, seeded_dispatcher, seeded_store, shared_store};
pub use sleeper::RecordingSleeper;
pub use store::{FailingStore, StubStore};

//! Collaborator store contracts for the order fulfillment engine.
//!
//! The engine talks to three logical stores — products, orders, payments —
//! through one transactional view: [`Stores::begin`] yields a [`StoreTx`]
//! whose reads and writes commit together via [`StoreTx::commit`] or are
//! discarded wholesale when the transaction is dropped. The orchestrator
//! owns that boundary; no partial stock adjustment or half-written order is
//! ever observable.
//!
//! [`InMemoryStores`] is the reference backend, used by the test suites.

mod error;
mod memory;
mod product;
mod store;

pub use error::{Result, StoreError};
pub use memory::{InMemoryStores, InMemoryTx};
pub use product::ProductRecord;
pub use store::{StoreTx, Stores};

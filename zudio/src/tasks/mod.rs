//! Task state synchronization.
//!
//! [`TaskStore`] keeps the local mirror of the current user's task list and
//! applies mutations: each operation performs exactly one remote call and
//! then reconciles the local copy optimistically. The mirror is a cache,
//! eventually consistent with the backend; a full fetch is the only
//! operation that guarantees canonical order and completeness.

pub mod store;

pub use store::TaskStore;

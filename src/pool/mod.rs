//! Rotating instance pool subsystem.
//!
//! # Data Flow
//! ```text
//! Config (pool.instances, ordered)
//!     → instance.rs (parse base URLs)
//!     → rotation.rs (pool + atomic rotation cursor)
//!     → Selector reads/advances the cursor per request
//! ```
//!
//! # Design Decisions
//! - Pool is built once at startup and never resized
//! - Instance order is significant: it defines the rotation sequence
//! - The cursor is an owned field on the pool, not ambient global state,
//!   so tests can instantiate independent pools
//! - Empty pools are rejected at construction, never at request time

pub mod instance;
pub mod rotation;

pub use instance::Instance;
pub use rotation::{EmptyPool, InstancePool};

//! Table registry and lifecycle management.
//!
//! [`Floor`] is the sole shared map in the system: table id → mailbox
//! handle. Lookups clone a sender and release the lock before any command
//! runs, so tables never contend with each other.
mod floor;
mod handle;

pub use floor::*;
pub use handle::*;

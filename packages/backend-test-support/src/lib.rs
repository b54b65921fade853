//! Backend test support utilities
//!
//! Shared helpers for the room server's integration tests. Today that is the
//! unified tracing bootstrap; fixtures that need crate internals live next to
//! the tests that use them.

pub mod logging;

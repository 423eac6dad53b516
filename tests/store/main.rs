//! Store Tests
//!
//! End-to-end tests through the public `soupstore` API:
//! - properties: behaviour every store guarantees
//! - sessions: registry sharing and snapshot persistence

mod common;

mod properties;
mod sessions;

//! Integration tests for the ccm crates.
//!
//! End-to-end checks that go through several crates at once: a config file
//! on disk, the profile table, the stock color manager and output setup.

pub mod reference;

//! Shared test fixtures for FusionForge crates.
//!
//! This crate provides data types and pure functions for testing.
//! It depends only on `fusionforge-core` so every other crate can use it
//! as a dev-dependency without cycles.
//!
//! - [`creatures`] - Reference creatures and small rosters
//! - [`candidates`] - Synthetic scored candidates and pools
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! fusionforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use fusionforge_test::creatures::sample_roster;
//! use fusionforge_test::candidates::{synthetic, synthetic_pool};
//! ```

pub mod candidates;
pub mod creatures;

pub use candidates::{synthetic, synthetic_pool, SyntheticSpec};
pub use creatures::{creature, sample_roster};

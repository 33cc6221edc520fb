//! GeoQuest Fuzz Harness
//!
//! Reusable property-based testing strategies shared by the game crates:
//! coordinates, distances, map click fractions and free-text guesses.
//!
//! # Usage
//!
//! ```rust
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_fuzz_test(p in geo_point()) {
//!         prop_assert!(p.is_valid());
//!     }
//! }
//! ```

pub mod generators;

pub mod prelude {
    pub use crate::generators::*;
    pub use proptest::prelude::*;
}

// Re-export proptest for convenience
pub use proptest;

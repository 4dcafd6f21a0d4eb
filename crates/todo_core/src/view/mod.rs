//! Pure view derivation: filtering, sorting, counts and row descriptors.
//!
//! Nothing in this module mutates the task collection or touches storage.

pub mod counts;
pub mod filter;
pub mod model;
pub mod sort;

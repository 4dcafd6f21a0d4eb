//! Search input handling.
//!
//! Matching itself lives in `view::filter`; this module decides *when* a
//! typed query becomes the active one.

pub mod debounce;

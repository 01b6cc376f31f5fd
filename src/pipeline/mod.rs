//! Analysis pipeline
//!
//! - [`runner`]: runs normalize → graph → rank and yields an `Analysis`
//! - [`cache`]: host-owned memoization per document and window size
//! - [`observer`]: stage boundary hooks
//! - [`validation`]: parameter checks run before any computation

pub mod cache;
pub mod observer;
pub mod runner;
pub mod validation;

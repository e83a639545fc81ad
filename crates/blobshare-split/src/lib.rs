//! Splitting byte sequences into shares and reconstructing them.
//!
//! Exposes the sparse (one sequence per share run) and compact (packed,
//! length-delimited units) splitters and the matching parsers.

pub mod compact;
pub mod error;
pub mod sequence;
pub mod sparse;
pub mod varint;

pub use compact::{parse_compact_shares, CompactShareSplitter};
pub use error::SplitError;
pub use sequence::{parse_sparse_shares, Sequence};
pub use sparse::SparseShareSplitter;

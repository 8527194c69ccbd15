//! Chart values mutation.
//!
//! Reads the values document, bumps the replica count by one and writes
//! the whole mapping back. Key order is kept; comments and formatting are
//! not.

pub mod values;

pub use values::{ChartError, ReplicaChange, ValuesFile, DEFAULT_REPLICAS};

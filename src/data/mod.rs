//! Data reading and representation.
//!
//! This module handles reading delimited text files into an in-memory
//! [`Dataset`] of named columns.

mod dataset;
mod reader;

pub use dataset::Dataset;
pub use reader::DataReader;

//! GeneViz - a terminal visualizer for genomic data tables.
//!
//! GeneViz loads a CSV file and draws one of four bioinformatics charts from
//! it: a Manhattan plot, a Venn diagram of typed-in gene sets, an expression
//! heatmap or a volcano plot. Charts are shown in the terminal and can be
//! saved as PNG images.
//!
//! # Features
//!
//! - CSV loading with column checks per chart type
//! - Manhattan, Venn, heatmap and volcano plots
//! - PNG export and clipboard copy of the chart data
//! - Vim-style keyboard shortcuts
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```ignore
//! use geneviz::data::DataReader;
//! use geneviz::plots::render;
//! use geneviz::request::PlotRequest;
//! use std::path::Path;
//!
//! let dataset = DataReader::read_file(Path::new("gwas.csv"))?;
//! let request = PlotRequest::Manhattan { title: "GWAS".into() };
//! let figure = render(&request, Some(&dataset))?;
//! println!("{}", figure.to_tsv());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod chart_view;
pub mod clipboard;
pub mod data;
pub mod dialog;
pub mod error;
pub mod export;
pub mod file_browser;
pub mod form;
pub mod plots;
pub mod request;
pub mod shared;
pub mod ui;
pub mod util;

pub use error::{GenevizError, Result};

//! Exploratory data analysis of a single tabular dataset.
//!
//! [`data`] loads CSV, TSV, JSON and Parquet files into a typed [`data::model::Dataset`];
//! [`analysis`] runs the describe → correlate → standardize → PCA pipeline over it;
//! [`state`] holds the session the desktop page renders.

pub mod analysis;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;

//! Analysis layer: the EDA pipeline over a loaded dataset.
//!
//! Architecture:
//! ```text
//!   Dataset ──► inspect   (overview, column types, missing counts)
//!      │
//!      ├─────► describe  (summary statistics, all columns)
//!      │
//!      ▼
//!   select  (numeric subset)
//!      │
//!      ├─────► correlation (pairwise Pearson)
//!      │
//!      ▼
//!   standardize (z-score) ──► pca (2 components)
//! ```
//!
//! [`pipeline::EdaReport`] runs every stage and keeps the outputs together.

pub mod correlation;
pub mod describe;
pub mod inspect;
pub mod pca;
pub mod pipeline;
pub mod select;
pub mod standardize;

pub use pipeline::EdaReport;

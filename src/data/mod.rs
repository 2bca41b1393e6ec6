//! Data layer: core types and loading.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset, infer ColumnType once
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<Column>, read-only for the session
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;

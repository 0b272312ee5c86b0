//! Data layer: input discovery, loading, and row/column selection.
//!
//! Architecture:
//! ```text
//!  files / directories
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ discover  │  walk inputs → sorted, deduplicated .csv paths
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse each file → Table, stack rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   Table   │  typed columns, union of headers
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  builds in first-seen order, measurement columns
//!   └──────────┘
//! ```

pub mod discover;
pub mod filter;
pub mod loader;
pub mod model;

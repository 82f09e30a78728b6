/// Data layer: core types, loading, normalization, filtering and export.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .xls / .ods
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (typed cells)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  cells → display strings (working Table)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐     ┌────────────┐
///   │  filter   │ ──▶ │ projection │  substring match, then column pick
///   └──────────┘     └────────────┘
///        │                 │
///        ▼                 ▼
///   ┌──────────┐
///   │  export   │  named sheets → .xlsx
///   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod projection;

pub use error::{DataError, ErrorKind};
pub use model::{CellValue, RawTable, Table};

/// Data layer: core types, loading, section index and filtering.
///
/// Architecture:
/// ```text
///   survey export (.csv, two header rows)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → SurveyTable
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌───────────┐
///   │  filter   │   │ sections  │  section → fields
///   └──────────┘   └───────────┘
///        │
///        ▼
///   filtered SurveyTable (new copy)
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sections;

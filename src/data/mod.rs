/// Data layer: core types, parsing, and the backing sources.
///
/// Architecture:
/// ```text
///  olympic.json / .csv / http(s)://
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch bytes (file, memory, HTTP)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse payload → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Country>, unique by name
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod source;

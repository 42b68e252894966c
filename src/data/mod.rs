/// Data layer: source retrieval, parsing, caching, and derived views.
///
/// Architecture:
/// ```text
///   names.zip (SSA url / local file)
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch raw archive bytes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  yobYYYY.txt → NameRecord, pct per (year, sex)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<Dataset>, single-flight; one-hit-wonder memo
///   └──────────┘
///        │                       │
///        ▼                       ▼
///   ┌──────────┐           ┌──────────┐
///   │  filter   │           │ wonders   │  (name, sex) seen in one year
///   └──────────┘           └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary / │  name trend, top names, samples; export to disk
///   │ export    │
///   └──────────┘
/// ```

pub mod cache;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
pub mod summary;
pub mod wonders;

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Build an in-memory ZIP archive from `(file name, contents)` pairs.
    pub fn zip_archive(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}

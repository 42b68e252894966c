use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::model::{Dataset, NameRecord, Sex};
use super::source::ArchiveSource;
use crate::error::{NamesError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch the archive from `source` and parse it into a [`Dataset`].
///
/// Uncached; callers that want the process-wide memoized dataset go
/// through [`super::cache`].
pub fn load_from(source: &dyn ArchiveSource) -> Result<Dataset> {
    let bytes = source.fetch()?;
    let dataset = parse_archive(&bytes)?;
    match dataset.year_span() {
        Some((first, last)) => log::info!(
            "Loaded {} name records for {first}–{last} from {}",
            dataset.len(),
            source.describe()
        ),
        None => log::info!("Loaded an empty dataset from {}", source.describe()),
    }
    Ok(dataset)
}

/// Parse a ZIP archive of per-year `yobYYYY.txt` files.
///
/// Entries that are not `.txt` files (the SSA archive ships a PDF read-me)
/// are skipped. Any per-year file that fails to parse fails the whole load.
pub fn parse_archive(bytes: &[u8]) -> Result<Dataset> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut records = Vec::new();
    let mut year_files = 0usize;

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() || !entry.name().ends_with(".txt") {
            continue;
        }
        let file_name = entry.name().to_string();
        let year = year_from_file_name(&file_name)?;

        let before = records.len();
        parse_year_file(entry, year, &file_name, &mut records)?;
        log::debug!("{file_name}: {} records for {year}", records.len() - before);
        year_files += 1;
    }

    if year_files == 0 {
        return Err(NamesError::MalformedSource(
            "archive contains no per-year .txt files".to_string(),
        ));
    }

    Dataset::from_counts(records)
}

// ---------------------------------------------------------------------------
// Per-year files
// ---------------------------------------------------------------------------

/// Extract the year from a file name such as `yob1880.txt`: the four
/// characters after the three-letter prefix of the base name.
pub fn year_from_file_name(file_name: &str) -> Result<i32> {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    let token = base
        .get(3..7)
        .filter(|t| t.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| {
            NamesError::MalformedSource(format!("{file_name}: no year token in file name"))
        })?;
    token
        .parse()
        .map_err(|e| NamesError::MalformedSource(format!("{file_name}: year '{token}': {e}")))
}

/// Parse `name,sex,count` lines (no header) and append them to `out`.
fn parse_year_file<R: Read>(
    reader: R,
    year: i32,
    file_name: &str,
    out: &mut Vec<NameRecord>,
) -> Result<()> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    for result in csv_reader.records() {
        let record = result
            .map_err(|e| NamesError::MalformedSource(format!("{file_name}: {e}")))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let malformed =
            |msg: String| NamesError::MalformedSource(format!("{file_name} line {line}: {msg}"));

        if record.len() != 3 {
            return Err(malformed(format!(
                "expected 3 fields (name,sex,count), found {}",
                record.len()
            )));
        }

        let name = &record[0];
        if name.is_empty() {
            return Err(malformed("empty name".to_string()));
        }
        let sex: Sex = record[1].parse().map_err(malformed)?;
        let count: u64 = record[2]
            .parse()
            .map_err(|e| malformed(format!("count '{}': {e}", &record[2])))?;

        out.push(NameRecord {
            name: name.to_string(),
            sex,
            count,
            year,
            pct: 0.0,
        });
    }
    Ok(())
}

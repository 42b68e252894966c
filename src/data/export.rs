use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::Dataset;

/// Write `dataset` to `path`.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row `name,sex,count,year,pct`
/// * `.json`    – records-oriented array, one object per row
/// * `.parquet` – flat columns, readable by Pandas and Polars
pub fn export_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => export_csv(path, dataset),
        "json" => export_json(path, dataset),
        "parquet" | "pq" => export_parquet(path, dataset),
        other => bail!("Unsupported export extension: .{other}"),
    }?;
    log::info!("Exported {} records to {}", dataset.len(), path.display());
    Ok(())
}

fn export_csv(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for rec in dataset {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn export_json(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(BufWriter::new(file), dataset.records())
        .context("writing JSON")?;
    Ok(())
}

fn export_parquet(path: &Path, dataset: &Dataset) -> Result<()> {
    let records = dataset.records();
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("sex", DataType::Utf8, false),
        Field::new("count", DataType::Int64, false),
        Field::new("year", DataType::Int32, false),
        Field::new("pct", DataType::Float64, false),
    ]));

    let names = StringArray::from_iter_values(records.iter().map(|r| r.name.as_str()));
    let sexes = StringArray::from_iter_values(records.iter().map(|r| r.sex.as_str()));
    let counts = records
        .iter()
        .map(|r| i64::try_from(r.count).context("count does not fit in Int64"))
        .collect::<Result<Vec<i64>>>()?;
    let years = Int32Array::from_iter_values(records.iter().map(|r| r.year));
    let pcts = Float64Array::from_iter_values(records.iter().map(|r| r.pct));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(names),
            Arc::new(sexes),
            Arc::new(Int64Array::from(counts)),
            Arc::new(years),
            Arc::new(pcts),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::data::model::{record, NameRecord, Sex};

    fn sample() -> Dataset {
        Dataset::from_counts(vec![
            record("Emma", Sex::F, 1990, 100),
            record("Olivia", Sex::F, 1990, 300),
            record("Liam", Sex::M, 1990, 10),
        ])
        .unwrap()
    }

    #[test]
    fn csv_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.csv");
        export_dataset(&path, &sample()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, ["name", "sex", "count", "year", "pct"]);
        let rows: Vec<NameRecord> = reader.deserialize::<NameRecord>().map(|r| r.unwrap()).collect();
        assert_eq!(rows, sample().records());
    }

    #[test]
    fn json_export_is_an_array_of_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        export_dataset(&path, &sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["name"], "Olivia");
        assert_eq!(rows[1]["sex"], "F");
        assert_eq!(rows[1]["pct"], 0.75);
    }

    #[test]
    fn parquet_export_keeps_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.parquet");
        export_dataset(&path, &sample()).unwrap();

        let file = File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(rows, 3);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_dataset(&dir.path().join("view.xlsx"), &sample()).is_err());
    }
}

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Record, SurveyDataset, COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.zip`     – archive whose first file is the CSV export (as published)
/// * `.csv`     – the survey export itself
/// * `.json`    – `[{ "MainBranch": "...", "Age": "...", ... }, ...]`
/// * `.parquet` – UTF-8 columns named like the CSV header
pub fn load_file(path: &Path) -> Result<SurveyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "zip" => load_archive(File::open(path).context("opening archive")?),
        "csv" => load_csv(File::open(path).context("opening CSV")?),
        "json" => load_json(File::open(path).context("opening JSON file")?),
        "parquet" | "pq" => load_parquet(File::open(path).context("opening parquet file")?),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Zip archive
// ---------------------------------------------------------------------------

/// Parse the first file entry of a zip archive as the CSV export.
pub fn load_archive<R: Read + Seek>(reader: R) -> Result<SurveyDataset> {
    let mut archive = zip::ZipArchive::new(reader).context("reading zip archive")?;

    let index = (0..archive.len())
        .find(|&i| archive.by_index(i).map(|f| !f.is_dir()).unwrap_or(false))
        .context("archive contains no files")?;

    let entry = archive
        .by_index(index)
        .with_context(|| format!("opening archive entry {index}"))?;
    let name = entry.name().to_string();
    log::debug!("Reading {name} from archive");

    load_csv(entry).with_context(|| format!("parsing {name}"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the survey's column names. Columns the
/// dashboard does not read are ignored; `NA` and empty cells are missing.
pub fn load_csv<R: Read>(reader: R) -> Result<SurveyDataset> {
    let mut reader = csv::Reader::from_reader(reader);

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(SurveyDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
pub fn load_json<R: Read>(reader: R) -> Result<SurveyDataset> {
    let records: Vec<Record> = serde_json::from_reader(reader).context("parsing JSON")?;
    Ok(SurveyDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export. Survey columns must be Utf8 / LargeUtf8; any other
/// columns are ignored, and absent survey columns read as missing.
pub fn load_parquet(file: File) -> Result<SurveyDataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: BTreeMap<&str, &Arc<dyn Array>> = BTreeMap::new();
        for name in COLUMNS {
            if let Ok(idx) = schema.index_of(name) {
                let col = batch.column(idx);
                match col.data_type() {
                    DataType::Utf8 | DataType::LargeUtf8 => {
                        columns.insert(name, col);
                    }
                    other => bail!("Parquet column '{name}' is {other:?}, expected a string column"),
                }
            }
        }

        for row in 0..batch.num_rows() {
            records.push(Record::from_columns(|name| {
                columns.get(name).and_then(|col| extract_string(col, row))
            }));
        }
    }

    Ok(SurveyDataset::from_records(records))
}

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

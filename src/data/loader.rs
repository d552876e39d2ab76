use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::PhotometricRecord;

const N_FIELDS: usize = PhotometricRecord::FIELD_NAMES.len();

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a photometric catalogue from a file.  Dispatch by extension.
///
/// Every format must provide the thirteen record fields by name
/// (`ra`, `dec`, `u` … `z`, `redshift`, `extinction_u` … `extinction_z`);
/// other columns are ignored.
///
/// Supported formats:
/// * `.parquet` – numeric columns (Float64, Float32, Int64, Int32)
/// * `.json`    – `[{ "ra": ..., "dec": ..., ... }, ...]`
/// * `.csv`     – header row plus one record per line
pub fn load_catalogue(path: &Path) -> Result<Vec<PhotometricRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Assemble a record by asking `field` for each (position, name) in
/// [`PhotometricRecord::FIELD_NAMES`] order.
fn build_record(
    mut field: impl FnMut(usize, &'static str) -> Result<f64>,
) -> Result<PhotometricRecord> {
    let mut values = [0.0; N_FIELDS];
    for (k, name) in PhotometricRecord::FIELD_NAMES.into_iter().enumerate() {
        values[k] = field(k, name)?;
    }
    Ok(PhotometricRecord::from_values(values))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "ra": 180.0, "dec": 2.5, "u": 19.0, ..., "extinction_z": 0.04 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<PhotometricRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<PhotometricRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            build_record(|_, name| {
                obj.get(name)
                    .with_context(|| format!("Row {i}: missing '{name}'"))?
                    .as_f64()
                    .with_context(|| format!("Row {i}: '{name}' is not a number"))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Columns may appear in any order.
fn load_csv(path: &Path) -> Result<Vec<PhotometricRecord>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<PhotometricRecord>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut indices = [0usize; N_FIELDS];
    for (slot, name) in indices.iter_mut().zip(PhotometricRecord::FIELD_NAMES) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))?;
    }

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let record = build_record(|k, name| {
            let cell = row.get(indices[k]).unwrap_or("").trim();
            cell.parse::<f64>()
                .with_context(|| format!("Row {row_no}, {name}: '{cell}' is not a number"))
        })?;
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one numeric column per record field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<PhotometricRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: Vec<&Arc<dyn Array>> = Vec::with_capacity(N_FIELDS);
        for name in PhotometricRecord::FIELD_NAMES {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            columns.push(batch.column(idx));
        }

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let record = build_record(|k, name| {
                extract_f64(columns[k], row)
                    .with_context(|| format!("Row {}: failed to read '{name}'", offset + row))
            })?;
            records.push(record);
        }
    }

    Ok(records)
}

/// Read one numeric cell as `f64`.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

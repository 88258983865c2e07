use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{SalaryDataset, SalaryRecord, REQUIRED_COLUMNS};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the salary dataset from a URL or a local file.
///
/// Supported sources:
/// * `http(s)://…` – remote CSV, fetched once with a blocking request
/// * `.csv`        – header row with the eight source columns
/// * `.json`       – `[{ "ano": 2024, "senioridade": "senior", ... }, ...]`
/// * `.parquet`    – one column per field
pub fn load_source(source: &str) -> Result<SalaryDataset> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return load_url(source);
    }
    load_file(Path::new(source))
}

/// Load a local file, dispatching by extension.
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => {
            let file = std::fs::File::open(path)
                .map_err(DashboardError::from)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            parse_csv(file)
        }
        _ => Err(DashboardError::UnsupportedSource(path.display().to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Remote CSV
// ---------------------------------------------------------------------------

fn load_url(url: &str) -> Result<SalaryDataset> {
    log::info!("Fetching dataset from {url}");
    let response = reqwest::blocking::get(url)
        .map_err(DashboardError::from)
        .with_context(|| format!("fetching {url}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DashboardError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        }
        .into());
    }

    let body = response
        .bytes()
        .map_err(DashboardError::from)
        .context("reading response body")?;
    parse_csv(body.as_ref())
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row. Extra columns are ignored.
pub fn parse_csv<R: Read>(input: R) -> Result<SalaryDataset> {
    // Header names are trimmed so the column check and serde agree.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(input);
    let headers = reader
        .headers()
        .map_err(DashboardError::from)
        .context("reading CSV headers")?
        .clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DashboardError::MissingColumn(col.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SalaryRecord>().enumerate() {
        let record = result
            .map_err(DashboardError::from)
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<SalaryDataset> {
    let text = std::fs::read_to_string(path)
        .map_err(DashboardError::from)
        .context("reading JSON file")?;
    let records: Vec<SalaryRecord> = serde_json::from_str(&text)
        .map_err(DashboardError::from)
        .context("parsing JSON records")?;
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), which differ in integer widths and
/// string encodings.
fn load_parquet(path: &Path) -> Result<SalaryDataset> {
    let file = std::fs::File::open(path)
        .map_err(DashboardError::from)
        .context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(DashboardError::from)
        .context("reading parquet metadata")?;
    let reader = builder
        .build()
        .map_err(DashboardError::from)
        .context("building parquet reader")?;

    let mut records = Vec::new();
    let mut offset = 0usize;
    for batch_result in reader {
        let batch = batch_result
            .map_err(DashboardError::from)
            .context("reading parquet record batch")?;
        records.extend(batch_to_records(&batch, offset)?);
        offset += batch.num_rows();
    }

    Ok(SalaryDataset::from_records(records))
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DashboardError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn batch_to_records(batch: &RecordBatch, offset: usize) -> Result<Vec<SalaryRecord>> {
    let year = column(batch, "ano")?;
    let seniority = column(batch, "senioridade")?;
    let contract = column(batch, "contrato")?;
    let company_size = column(batch, "tamanho_empresa")?;
    let job_title = column(batch, "cargo")?;
    let remote = column(batch, "remoto")?;
    let residence = column(batch, "residencia_iso3")?;
    let usd = column(batch, "usd")?;

    (0..batch.num_rows())
        .map(|row| {
            let at = offset + row;
            Ok(SalaryRecord {
                year: extract_i64(year, "ano", row, at)?,
                seniority: extract_string(seniority, "senioridade", row, at)?,
                contract: extract_string(contract, "contrato", row, at)?,
                company_size: extract_string(company_size, "tamanho_empresa", row, at)?,
                job_title: extract_string(job_title, "cargo", row, at)?,
                remote: extract_string(remote, "remoto", row, at)?,
                residence_iso3: extract_string(residence, "residencia_iso3", row, at)?,
                usd: extract_f64(usd, "usd", row, at)?,
            })
        })
        .collect()
}

// -- Parquet / Arrow helpers --

fn check_null(col: &Arc<dyn Array>, name: &str, row: usize, at: usize) -> Result<()> {
    if col.is_null(row) {
        bail!(DashboardError::NullCell {
            column: name.to_string(),
            row: at,
        });
    }
    Ok(())
}

fn type_error(col: &Arc<dyn Array>, name: &str, expected: &'static str) -> anyhow::Error {
    DashboardError::ColumnType {
        column: name.to_string(),
        found: format!("{:?}", col.data_type()),
        expected,
    }
    .into()
}

fn extract_i64(col: &Arc<dyn Array>, name: &str, row: usize, at: usize) -> Result<i64> {
    check_null(col, name, row, at)?;
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else {
        Err(type_error(col, name, "Int32 or Int64"))
    }
}

fn extract_f64(col: &Arc<dyn Array>, name: &str, row: usize, at: usize) -> Result<f64> {
    check_null(col, name, row, at)?;
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(row) as f64)
    } else {
        Err(type_error(col, name, "Float64, Float32 or Int64"))
    }
}

fn extract_string(col: &Arc<dyn Array>, name: &str, row: usize, at: usize) -> Result<String> {
    check_null(col, name, row, at)?;
    match col.data_type() {
        DataType::Utf8 => {
            let s = col
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| type_error(col, name, "Utf8"))?;
            Ok(s.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(type_error(col, name, "Utf8 or LargeUtf8")),
    }
}

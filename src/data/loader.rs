use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Penguin, PenguinDataset, RawPenguin, is_missing_marker};

/// Excerpt of the Palmer penguins table shipped inside the binary.
const BUNDLED_CSV: &str = include_str!("../../data/penguins.csv");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bundled penguins table.
pub fn load_penguins() -> Result<PenguinDataset> {
    read_csv(BUNDLED_CSV.as_bytes()).context("parsing bundled penguins table")
}

/// Load a penguins table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the eight penguin columns, `NA` for missing
/// * `.json`    – `[{ "species": "Adelie", "island": "Torgersen", ... }, ...]`
/// * `.parquet` – one column per penguin column (strings, ints, floats)
pub fn load_file(path: &Path) -> Result<PenguinDataset> {
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

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PenguinDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// CSV layout: the palmerpenguins export, i.e. a header row
/// `species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year`.
/// Extra columns (such as a leading row id) are ignored.
fn read_csv<R: Read>(input: R) -> Result<PenguinDataset> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawPenguin>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let penguin = Penguin::try_from(raw).with_context(|| format!("CSV row {row_no}"))?;
        rows.push(penguin);
    }

    Ok(PenguinDataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7, "flipper_length_mm": 181, "body_mass_g": 3750,
///     "sex": "male", "year": 2007 },
///   ...
/// ]
/// ```
///
/// Missing cells may be `null`, absent, or a string such as `"NA"`. A
/// measurement given as an array or object is an error.
fn load_json(path: &Path) -> Result<PenguinDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<RawPenguin> = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = records
        .into_iter()
        .enumerate()
        .map(|(i, raw)| Penguin::try_from(raw).with_context(|| format!("Row {i}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(PenguinDataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing the penguins table.
///
/// `species` and `island` are required string columns; the measurement
/// columns, `sex` and `year` are optional and may contain nulls.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<PenguinDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));

        let species = column("species").context("Parquet file missing 'species' column")?;
        let island = column("island").context("Parquet file missing 'island' column")?;
        let bill_length = column("bill_length_mm");
        let bill_depth = column("bill_depth_mm");
        let flipper_length = column("flipper_length_mm");
        let body_mass = column("body_mass_g");
        let sex = column("sex");
        let year = column("year");

        for row in 0..batch.num_rows() {
            let raw = RawPenguin {
                species: extract_string(species, row)
                    .with_context(|| format!("Row {row}: failed to read 'species'"))?
                    .unwrap_or_default(),
                island: extract_string(island, row)
                    .with_context(|| format!("Row {row}: failed to read 'island'"))?
                    .unwrap_or_default(),
                bill_length_mm: extract_f64(bill_length, row)
                    .with_context(|| format!("Row {row}: failed to read 'bill_length_mm'"))?,
                bill_depth_mm: extract_f64(bill_depth, row)
                    .with_context(|| format!("Row {row}: failed to read 'bill_depth_mm'"))?,
                flipper_length_mm: extract_f64(flipper_length, row)
                    .with_context(|| format!("Row {row}: failed to read 'flipper_length_mm'"))?,
                body_mass_g: extract_f64(body_mass, row)
                    .with_context(|| format!("Row {row}: failed to read 'body_mass_g'"))?,
                sex: match sex {
                    Some(col) => extract_string(col, row)
                        .with_context(|| format!("Row {row}: failed to read 'sex'"))?,
                    None => None,
                },
                year: extract_f64(year, row)
                    .with_context(|| format!("Row {row}: failed to read 'year'"))?
                    .map(|y| y as i64),
            };
            rows.push(Penguin::try_from(raw).with_context(|| format!("Row {row}"))?);
        }
    }

    Ok(PenguinDataset::from_rows(rows))
}

// -- Parquet / Arrow helpers --

/// Extract a string cell. Nulls and textual missing markers become `None`.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    };
    if is_missing_marker(value) {
        Ok(None)
    } else {
        Ok(Some(value.to_string()))
    }
}

/// Extract a numeric cell as `f64`. An absent column reads as all-null.
fn extract_f64(col: Option<&Arc<dyn Array>>, row: usize) -> Result<Option<f64>> {
    let Some(col) = col else {
        return Ok(None);
    };
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(Some(value).filter(|v| !v.is_nan()))
}

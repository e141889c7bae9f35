use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{PokeType, Record, Region, Table};

/// Columns every source format must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["region", "types", "height", "weight"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("decoding arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: unknown region '{value}'")]
    UnknownRegion { row: usize, value: String },
    #[error("row {row}: unknown type '{value}'")]
    UnknownType { row: usize, value: String },
    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

fn invalid(row: usize, reason: impl Into<String>) -> LoadError {
    LoadError::InvalidRow {
        row,
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a creature table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – `region,types,height,weight` with `types` a string-encoded list
/// * `.json`    – `[{ "region": ..., "types": [...], "height": ..., "weight": ... }, ...]`
/// * `.parquet` – same columns, `types` as `List<Utf8>` or an encoded string
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Memoizes the first successful load for the lifetime of the cache.
///
/// The dashboard reads one fixed path, so the cache holds a single table and
/// is never invalidated. A failed load leaves the cache empty.
pub struct TableCache {
    cell: OnceLock<Arc<Table>>,
}

impl TableCache {
    pub const fn new() -> Self {
        TableCache {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Table>, LoadError> {
        if let Some(table) = self.cell.get() {
            log::debug!("table cache hit ({} records)", table.len());
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_table(path)?);
        log::info!("Loaded {} records from {}", table.len(), path.display());
        Ok(Arc::clone(self.cell.get_or_init(|| table)))
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide cached load.
pub fn cached_table(path: &Path) -> Result<Arc<Table>, LoadError> {
    static CACHE: TableCache = TableCache::new();
    CACHE.get_or_load(path)
}

// ---------------------------------------------------------------------------
// Row validation shared by all formats
// ---------------------------------------------------------------------------

/// Split a string-encoded type list into its names.
///
/// Accepts `["grass", "poison"]`, `['grass', 'poison']` and bare lists
/// separated by `/`, `;`, `,` or `|`.
pub fn parse_type_list(raw: &str, row: usize) -> Result<Vec<String>, LoadError> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        let normalized = raw.replace('\'', "\"");
        return serde_json::from_str::<Vec<String>>(&normalized)
            .map_err(|e| invalid(row, format!("malformed type list '{raw}': {e}")));
    }
    Ok(raw
        .split(['/', ';', ',', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

fn build_record(
    row: usize,
    name: Option<String>,
    region: &str,
    type_names: &[String],
    height: f64,
    weight: f64,
) -> Result<Record, LoadError> {
    let region = Region::from_name(region).ok_or_else(|| LoadError::UnknownRegion {
        row,
        value: region.to_string(),
    })?;

    if type_names.is_empty() || type_names.len() > 2 {
        return Err(invalid(
            row,
            format!("expected 1 or 2 types, found {}", type_names.len()),
        ));
    }
    let types = type_names
        .iter()
        .map(|t| {
            PokeType::from_name(t).ok_or_else(|| LoadError::UnknownType {
                row,
                value: t.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !(height.is_finite() && height > 0.0) {
        return Err(invalid(row, format!("height must be positive, got {height}")));
    }
    if !(weight.is_finite() && weight > 0.0) {
        return Err(invalid(row, format!("weight must be positive, got {weight}")));
    }

    let mut record = Record::new(region, types, height, weight);
    record.name = name.filter(|n| !n.trim().is_empty());
    Ok(record)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    region: String,
    types: String,
    height: f64,
    weight: f64,
}

/// CSV layout: header row, then one creature per line.
/// `types` holds an encoded list such as `"['grass', 'poison']"`.
/// Columns other than `name`, `region`, `types`, `height` and `weight` are
/// ignored.
fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<CsvRow>().enumerate() {
        let raw = result?;
        let type_names = parse_type_list(&raw.types, row)?;
        records.push(build_record(
            row,
            raw.name,
            &raw.region,
            &type_names,
            raw.height,
            raw.weight,
        )?);
    }

    Ok(Table::new(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonTypes {
    List(Vec<String>),
    Encoded(String),
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(default)]
    name: Option<String>,
    region: String,
    types: JsonTypes,
    height: f64,
    weight: f64,
}

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Table, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<JsonRow> = serde_json::from_str(&text)?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let type_names = match raw.types {
                JsonTypes::List(list) => list,
                JsonTypes::Encoded(s) => parse_type_list(&s, row)?,
            };
            build_record(
                row,
                raw.name,
                &raw.region,
                &type_names,
                raw.height,
                raw.weight,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table::new(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas or Polars.
///
/// Expected schema:
/// - `region`: Utf8
/// - `types`: List<Utf8> (or an encoded Utf8 list)
/// - `height`, `weight`: Float64, Float32, Int32 or Int64
/// - `name`: optional Utf8
fn load_parquet(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    let mut offset = 0;

    for batch_result in reader {
        let batch = batch_result?;

        let region_col = required_column(&batch, "region")?;
        let types_col = required_column(&batch, "types")?;
        let height_col = required_column(&batch, "height")?;
        let weight_col = required_column(&batch, "weight")?;
        let name_col = batch.column_by_name("name");

        for i in 0..batch.num_rows() {
            let row = offset + i;
            let name = match name_col {
                Some(col) if !col.is_null(i) => Some(string_at(col, i, row, "name")?),
                _ => None,
            };
            let region = string_at(region_col, i, row, "region")?;
            let type_names = types_at(types_col, i, row)?;
            let height = f64_at(height_col, i, row, "height")?;
            let weight = f64_at(weight_col, i, row, "weight")?;

            records.push(build_record(row, name, &region, &type_names, height, weight)?);
        }
        offset += batch.num_rows();
    }

    Ok(Table::new(records))
}

// -- Arrow helpers --

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn string_at(col: &ArrayRef, i: usize, row: usize, name: &str) -> Result<String, LoadError> {
    if col.is_null(i) {
        return Err(invalid(row, format!("null '{name}'")));
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(i).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(i).to_string()),
        other => Err(invalid(
            row,
            format!("'{name}' has type {other:?}, expected Utf8"),
        )),
    }
}

fn f64_at(col: &ArrayRef, i: usize, row: usize, name: &str) -> Result<f64, LoadError> {
    if col.is_null(i) {
        return Err(invalid(row, format!("null '{name}'")));
    }
    match col.data_type() {
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(i)),
        DataType::Float32 => Ok(col.as_primitive::<Float32Type>().value(i) as f64),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(i) as f64),
        DataType::Int32 => Ok(col.as_primitive::<Int32Type>().value(i) as f64),
        other => Err(invalid(
            row,
            format!("'{name}' has type {other:?}, expected a number"),
        )),
    }
}

fn types_at(col: &ArrayRef, i: usize, row: usize) -> Result<Vec<String>, LoadError> {
    if col.is_null(i) {
        return Err(invalid(row, "null 'types'"));
    }
    let values = match col.data_type() {
        DataType::List(_) => col.as_list::<i32>().value(i),
        DataType::LargeList(_) => col.as_list::<i64>().value(i),
        DataType::Utf8 | DataType::LargeUtf8 => {
            return parse_type_list(&string_at(col, i, row, "types")?, row);
        }
        other => {
            return Err(invalid(
                row,
                format!("'types' has type {other:?}, expected List<Utf8>"),
            ));
        }
    };
    (0..values.len())
        .map(|j| string_at(&values, j, row, "types"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{Float64Array, ListBuilder, StringArray, StringBuilder};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_python_and_json_encoded_type_lists() {
        assert_eq!(
            parse_type_list("['grass', 'poison']", 0).unwrap(),
            vec!["grass", "poison"]
        );
        assert_eq!(parse_type_list(r#"["fire"]"#, 0).unwrap(), vec!["fire"]);
        assert_eq!(
            parse_type_list("water/ flying", 0).unwrap(),
            vec!["water", "flying"]
        );
        assert!(matches!(
            parse_type_list("['grass'", 3),
            Err(LoadError::InvalidRow { row: 3, .. })
        ));
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "poke.csv",
            "id,name,region,types,height,weight\n\
             1,bulbasaur,Kanto,\"['grass', 'poison']\",0.7,6.9\n\
             4,charmander,kanto,\"['fire']\",0.6,8.5\n\
             152,chikorita,Johto,\"['grass']\",0.9,6.4\n",
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records[0].name.as_deref(), Some("bulbasaur"));
        assert_eq!(
            table.records[0].types,
            vec![PokeType::Grass, PokeType::Poison]
        );
        assert_eq!(table.records[1].region, Region::Kanto);
        assert_eq!(table.records[2].region, Region::Johto);
        assert_eq!(table.records[2].height, 0.9);
    }

    #[test]
    fn csv_without_required_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "poke.csv", "region,types,height\nKanto,fire,0.6\n");
        match load_table(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "weight"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unknown_vocabulary_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "poke.csv",
            "region,types,height,weight\nKanto,\"['fire']\",0.6,8.5\nKanto,\"['shadow']\",1.0,2.0\n",
        );
        match load_table(&path) {
            Err(LoadError::UnknownType { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "shadow");
            }
            other => panic!("expected UnknownType, got {other:?}"),
        }

        let path = write_file(
            &dir,
            "region.csv",
            "region,types,height,weight\nGalar,\"['fire']\",0.6,8.5\n",
        );
        assert!(matches!(
            load_table(&path),
            Err(LoadError::UnknownRegion { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_non_positive_measurements_and_too_many_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "zero.csv",
            "region,types,height,weight\nKanto,\"['fire']\",0.0,8.5\n",
        );
        assert!(matches!(
            load_table(&path),
            Err(LoadError::InvalidRow { row: 0, .. })
        ));

        let path = write_file(
            &dir,
            "three.csv",
            "region,types,height,weight\nKanto,\"['fire', 'water', 'ice']\",1.0,8.5\n",
        );
        assert!(matches!(
            load_table(&path),
            Err(LoadError::InvalidRow { row: 0, .. })
        ));
    }

    #[test]
    fn missing_file_and_unknown_extension() {
        assert!(matches!(
            load_table(Path::new("/definitely/not/here.csv")),
            Err(LoadError::Io { .. })
        ));
        assert!(matches!(
            load_table(Path::new("data.xlsx")),
            Err(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_json_with_list_or_encoded_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "poke.json",
            r#"[
                {"region": "Hoenn", "types": ["water", "ground"], "height": 0.4, "weight": 7.6},
                {"name": "torchic", "region": "Hoenn", "types": "['fire']", "height": 0.4, "weight": 2.5}
            ]"#,
        );
        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.records[0].types,
            vec![PokeType::Water, PokeType::Ground]
        );
        assert_eq!(table.records[1].name.as_deref(), Some("torchic"));
        assert_eq!(table.records[1].types, vec![PokeType::Fire]);
    }

    #[test]
    fn loads_parquet_with_list_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poke.parquet");

        let mut types = ListBuilder::new(StringBuilder::new());
        types.values().append_value("steel");
        types.values().append_value("psychic");
        types.append(true);
        types.values().append_value("dragon");
        types.append(true);
        let types = types.finish();

        let schema = Arc::new(Schema::new(vec![
            Field::new("region", DataType::Utf8, false),
            Field::new("types", types.data_type().clone(), true),
            Field::new("height", DataType::Float64, false),
            Field::new("weight", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Sinnoh", "Unova"])),
                Arc::new(types),
                Arc::new(Float64Array::from(vec![0.5, 1.6])),
                Arc::new(Float64Array::from(vec![60.5, 46.0])),
            ],
        )
        .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].region, Region::Sinnoh);
        assert_eq!(
            table.records[0].types,
            vec![PokeType::Steel, PokeType::Psychic]
        );
        assert_eq!(table.records[1].types, vec![PokeType::Dragon]);
        assert_eq!(table.records[1].weight, 46.0);
    }

    #[test]
    fn bundled_dataset_loads() {
        let table = load_table(Path::new(crate::config::DATA_PATH)).unwrap();
        assert!(!table.is_empty());
        for region in Region::ALL {
            assert!(table.records.iter().any(|r| r.region == region), "{region}");
        }
        for ptype in PokeType::ALL {
            assert!(table.records.iter().any(|r| r.types.contains(&ptype)), "{ptype}");
        }
    }

    #[test]
    fn cache_loads_once_and_reuses_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "poke.csv",
            "region,types,height,weight\nKanto,\"['fire']\",0.6,8.5\n",
        );

        let cache = TableCache::new();
        let first = cache.get_or_load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");

        let cache = TableCache::new();
        assert!(cache.get_or_load(&path).is_err());

        std::fs::write(&path, "region,types,height,weight\nUnova,fire,1.0,2.0\n").unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
    }
}

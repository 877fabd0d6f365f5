use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{EmployeeRecord, EmployeeTable, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a file into an [`EmployeeTable`].
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: String,
        message: String,
    },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

pub type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an employee table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`             – comma-separated with a header row
/// * `.tsv` / `.tab`    – tab-separated with a header row
/// * `.json`            – `[{ "Department": "Sales", "JobLevel": 2, ... }, ...]`
/// * `.parquet` / `.pq` – flat Parquet file with one column per field
pub fn load_file(path: &Path) -> Result<EmployeeTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" | "tab" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedExtension(other.to_string())),
    };

    let table = EmployeeTable::new(records, path.display().to_string());
    log::info!("Loaded {} employee records from {}", table.len(), table.source);
    Ok(table)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect the required columns absent from `present`, in canonical order.
fn missing_columns(present: &[&str]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|req| !present.contains(req))
        .map(|req| req.to_string())
        .collect()
}

fn ensure_columns(present: &[&str]) -> Result<()> {
    let missing = missing_columns(present);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataLoadError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// Delimited (CSV / TSV) loader
// ---------------------------------------------------------------------------

/// Header row with column names, one employee per line.
/// Only the required columns are read; the rest are skipped by name.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<EmployeeRecord>> {
    let file = open(path)?;
    parse_delimited(file, delimiter)
}

fn parse_delimited<R: std::io::Read>(input: R, delimiter: u8) -> Result<Vec<EmployeeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    ensure_columns(&headers.iter().collect::<Vec<_>>())?;

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<EmployeeRecord>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|err| csv_row_error(row, &headers, err))?;
        records.push(record);
    }
    Ok(records)
}

fn csv_row_error(row: usize, headers: &csv::StringRecord, err: csv::Error) -> DataLoadError {
    match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => {
            let column = de
                .field()
                .and_then(|idx| headers.get(idx as usize))
                .unwrap_or("?")
                .to_string();
            DataLoadError::InvalidValue {
                row,
                column,
                message: de.kind().to_string(),
            }
        }
        _ => DataLoadError::Csv(err),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// The keys of the first record play the role of a header row.
fn load_json(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<EmployeeRecord>> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = match root {
        JsonValue::Array(rows) => rows,
        _ => return Err(DataLoadError::Malformed("expected top-level JSON array".into())),
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, value) in rows.into_iter().enumerate() {
        let row = i + 1;
        let obj = match value {
            JsonValue::Object(obj) => obj,
            _ => return Err(DataLoadError::Malformed(format!("row {row} is not a JSON object"))),
        };

        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        let missing = missing_columns(&keys);
        if !missing.is_empty() {
            if row == 1 {
                return Err(DataLoadError::MissingColumns(missing));
            }
            return Err(DataLoadError::InvalidValue {
                row,
                column: missing.join(", "),
                message: "missing value".into(),
            });
        }

        let record: EmployeeRecord = serde_json::from_value(JsonValue::Object(obj)).map_err(|err| {
            DataLoadError::InvalidValue {
                row,
                column: "?".into(),
                message: err.to_string(),
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file, as written by **Pandas** (`df.to_parquet()`) or
/// **Polars** (`df.write_parquet()`).
///
/// Text columns may be plain, large, view or dictionary-encoded strings
/// (pandas `category`); `JobLevel` and `WorkLifeBalance` any integer type;
/// `MonthlyIncome` any integer or float type. Each column is cast once per
/// batch to `Utf8` / `Int64` / `Float64`.
fn load_parquet(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    ensure_columns(&names)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let columns = ParquetColumns::locate(&schema, &batch)?;
        let offset = records.len();
        for row in 0..batch.num_rows() {
            records.push(columns.record_at(row, offset + row + 1)?);
        }
    }
    Ok(records)
}

/// Target representation of a required column.
#[derive(Debug, Clone, Copy)]
enum ColumnKind {
    Text,
    Integer,
    Number,
}

impl ColumnKind {
    fn target(self) -> DataType {
        match self {
            ColumnKind::Text => DataType::Utf8,
            ColumnKind::Integer => DataType::Int64,
            ColumnKind::Number => DataType::Float64,
        }
    }

    /// Whether `source` holds values of this kind (looking through dictionaries).
    fn accepts(self, source: &DataType) -> bool {
        let values = match source {
            DataType::Dictionary(_, values) => values.as_ref(),
            other => other,
        };
        match self {
            ColumnKind::Text => matches!(
                values,
                DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
            ),
            ColumnKind::Integer => values.is_integer(),
            ColumnKind::Number => values.is_integer() || values.is_floating(),
        }
    }
}

/// The required columns of one record batch, cast to their target types.
struct ParquetColumns {
    department: ArrayRef,
    job_level: ArrayRef,
    attrition: ArrayRef,
    over_time: ArrayRef,
    work_life_balance: ArrayRef,
    monthly_income: ArrayRef,
}

impl ParquetColumns {
    fn locate(schema: &Schema, batch: &RecordBatch) -> Result<Self> {
        let column = |name: &str, kind: ColumnKind| -> Result<ArrayRef> {
            let col = batch.column(schema.index_of(name)?);
            if !kind.accepts(col.data_type()) {
                return Err(DataLoadError::Malformed(format!(
                    "column '{name}' has type {:?}, expected {:?} values",
                    col.data_type(),
                    kind
                )));
            }
            Ok(cast(col, &kind.target())?)
        };
        Ok(ParquetColumns {
            department: column("Department", ColumnKind::Text)?,
            job_level: column("JobLevel", ColumnKind::Integer)?,
            attrition: column("Attrition", ColumnKind::Text)?,
            over_time: column("OverTime", ColumnKind::Text)?,
            work_life_balance: column("WorkLifeBalance", ColumnKind::Integer)?,
            monthly_income: column("MonthlyIncome", ColumnKind::Number)?,
        })
    }

    fn record_at(&self, idx: usize, row: usize) -> Result<EmployeeRecord> {
        Ok(EmployeeRecord {
            department: string_at(&self.department, idx, row, "Department")?,
            job_level: int_at(&self.job_level, idx, row, "JobLevel")?,
            attrition: string_at(&self.attrition, idx, row, "Attrition")?,
            over_time: string_at(&self.over_time, idx, row, "OverTime")?,
            work_life_balance: int_at(&self.work_life_balance, idx, row, "WorkLifeBalance")?,
            monthly_income: float_at(&self.monthly_income, idx, row, "MonthlyIncome")?,
        })
    }
}

// -- Arrow cell helpers (columns already cast by `ParquetColumns::locate`) --

fn check_not_null(col: &ArrayRef, idx: usize, row: usize, name: &str) -> Result<()> {
    if col.is_null(idx) {
        Err(DataLoadError::InvalidValue {
            row,
            column: name.to_string(),
            message: "null value".into(),
        })
    } else {
        Ok(())
    }
}

fn string_at(col: &ArrayRef, idx: usize, row: usize, name: &str) -> Result<String> {
    check_not_null(col, idx, row, name)?;
    Ok(col.as_string::<i32>().value(idx).to_string())
}

fn int_at(col: &ArrayRef, idx: usize, row: usize, name: &str) -> Result<i64> {
    check_not_null(col, idx, row, name)?;
    Ok(col.as_primitive::<Int64Type>().value(idx))
}

fn float_at(col: &ArrayRef, idx: usize, row: usize, name: &str) -> Result<f64> {
    check_not_null(col, idx, row, name)?;
    Ok(col.as_primitive::<Float64Type>().value(idx))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{
        DictionaryArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
        LargeStringArray, StringArray, StringViewArray,
    };
    use arrow::datatypes::Int32Type;
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::record;

    const CSV: &str = "\
Age,Attrition,Department,JobLevel,MonthlyIncome,OverTime,WorkLifeBalance
41,Yes,Sales,2,5993,Yes,1
49,No,Research & Development,2,5130,No,3
37,Yes,Research & Development,1,2090,Yes,3
";

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut tmp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(tmp, "{contents}").unwrap();
        tmp
    }

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let tmp = temp_file(".csv", CSV);
        let table = load_file(tmp.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[0], record("Sales", 2, "Yes", "Yes", 1, 5993.0));
        assert_eq!(table.records()[2].department, "Research & Development");
    }

    #[test]
    fn loads_tab_separated() {
        let tmp = temp_file(".tsv", &CSV.replace(',', "\t"));
        let table = load_file(tmp.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[1].monthly_income, 5130.0);
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let tmp = temp_file(".csv", "Department,JobLevel,Attrition,OverTime,WorkLifeBalance,MonthlyIncome\n");
        let table = load_file(tmp.path()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn reports_every_missing_column() {
        let tmp = temp_file(".csv", "Department,Attrition,MonthlyIncome\nSales,Yes,100\n");
        let err = load_file(tmp.path()).unwrap_err();
        match err {
            DataLoadError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["JobLevel", "OverTime", "WorkLifeBalance"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_cell_names_row_and_column() {
        let csv = "Department,JobLevel,Attrition,OverTime,WorkLifeBalance,MonthlyIncome\n\
                   Sales,2,No,No,3,100\n\
                   Sales,two,No,No,3,100\n";
        let tmp = temp_file(".csv", csv);
        let err = load_file(tmp.path()).unwrap_err();
        match err {
            DataLoadError::InvalidValue { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "JobLevel");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let tmp = temp_file(".xlsx", CSV);
        let err = load_file(tmp.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn loads_records_oriented_json() {
        let json = r#"[
            {"Department": "Sales", "JobLevel": 2, "Attrition": "Yes", "OverTime": "No",
             "WorkLifeBalance": 3, "MonthlyIncome": 4200, "EmployeeNumber": 7},
            {"Department": "Human Resources", "JobLevel": 1, "Attrition": "No", "OverTime": "Yes",
             "WorkLifeBalance": 2, "MonthlyIncome": 2500.5}
        ]"#;
        let tmp = temp_file(".json", json);
        let table = load_file(tmp.path()).unwrap();
        assert_eq!(
            table.records(),
            &[
                record("Sales", 2, "Yes", "No", 3, 4200.0),
                record("Human Resources", 1, "No", "Yes", 2, 2500.5),
            ]
        );
    }

    #[test]
    fn json_must_be_an_array() {
        let err = parse_json(r#"{"Department": "Sales"}"#).unwrap_err();
        assert!(matches!(err, DataLoadError::Malformed(_)));
    }

    #[test]
    fn json_first_row_acts_as_header() {
        let err = parse_json(r#"[{"Department": "Sales", "JobLevel": 1}]"#).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumns(cols) if cols.len() == 4));
    }

    #[test]
    fn json_later_row_missing_a_key_names_row_and_column() {
        let json = r#"[
            {"Department": "Sales", "JobLevel": 2, "Attrition": "Yes", "OverTime": "No",
             "WorkLifeBalance": 3, "MonthlyIncome": 4200},
            {"Department": "Sales", "JobLevel": 1, "Attrition": "No",
             "WorkLifeBalance": 2, "MonthlyIncome": 2500}
        ]"#;
        let err = parse_json(json).unwrap_err();
        match err {
            DataLoadError::InvalidValue { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "OverTime");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
        RecordBatch::try_from_iter(columns).unwrap()
    }

    fn parquet_file(batch: &RecordBatch) -> NamedTempFile {
        let tmp = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(tmp.reopen().unwrap(), batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        tmp
    }

    #[test]
    fn loads_parquet() {
        let tmp = parquet_file(&batch(vec![
            ("Department", Arc::new(StringArray::from(vec!["Sales", "Research & Development"])) as ArrayRef),
            ("JobLevel", Arc::new(Int64Array::from(vec![3, 1])) as ArrayRef),
            ("Attrition", Arc::new(StringArray::from(vec!["No", "Yes"])) as ArrayRef),
            ("OverTime", Arc::new(StringArray::from(vec!["Yes", "No"])) as ArrayRef),
            ("WorkLifeBalance", Arc::new(Int64Array::from(vec![4, 2])) as ArrayRef),
            ("MonthlyIncome", Arc::new(Float64Array::from(vec![8000.0, 2100.0])) as ArrayRef),
        ]));

        let table = load_file(tmp.path()).unwrap();
        assert_eq!(
            table.records(),
            &[
                record("Sales", 3, "No", "Yes", 4, 8000.0),
                record("Research & Development", 1, "Yes", "No", 2, 2100.0),
            ]
        );
    }

    #[test]
    fn loads_parquet_with_category_and_narrow_types() {
        let department: DictionaryArray<Int32Type> =
            ["Sales", "Human Resources", "Sales"].into_iter().collect();
        let tmp = parquet_file(&batch(vec![
            ("Department", Arc::new(department) as ArrayRef),
            ("JobLevel", Arc::new(Int32Array::from(vec![2, 1, 5])) as ArrayRef),
            ("Attrition", Arc::new(LargeStringArray::from(vec!["Yes", "No", "No"])) as ArrayRef),
            ("OverTime", Arc::new(StringArray::from(vec!["No", "No", "Yes"])) as ArrayRef),
            ("WorkLifeBalance", Arc::new(Int16Array::from(vec![1, 4, 3])) as ArrayRef),
            ("MonthlyIncome", Arc::new(Float32Array::from(vec![4200.5, 2500.0, 19999.0])) as ArrayRef),
        ]));

        let table = load_file(tmp.path()).unwrap();
        assert_eq!(
            table.records(),
            &[
                record("Sales", 2, "Yes", "No", 1, 4200.5),
                record("Human Resources", 1, "No", "No", 4, 2500.0),
                record("Sales", 5, "No", "Yes", 3, 19999.0),
            ]
        );
    }

    #[test]
    fn string_view_and_integer_income_columns_are_normalised() {
        let input = batch(vec![
            ("Department", Arc::new(StringViewArray::from(vec!["Sales", "Research & Development"])) as ArrayRef),
            ("JobLevel", Arc::new(Int64Array::from(vec![2, 3])) as ArrayRef),
            ("Attrition", Arc::new(StringArray::from(vec!["No", "Yes"])) as ArrayRef),
            ("OverTime", Arc::new(StringViewArray::from(vec!["Yes", "No"])) as ArrayRef),
            ("WorkLifeBalance", Arc::new(Int32Array::from(vec![3, 2])) as ArrayRef),
            ("MonthlyIncome", Arc::new(Int64Array::from(vec![5993, 5130])) as ArrayRef),
        ]);

        let columns = ParquetColumns::locate(input.schema().as_ref(), &input).unwrap();
        assert_eq!(
            columns.record_at(1, 2).unwrap(),
            record("Research & Development", 3, "Yes", "No", 2, 5130.0)
        );
        assert_eq!(columns.monthly_income.data_type(), &DataType::Float64);
        assert_eq!(columns.over_time.data_type(), &DataType::Utf8);
    }

    #[test]
    fn null_parquet_cell_names_row_and_column() {
        let tmp = parquet_file(&batch(vec![
            ("Department", Arc::new(StringArray::from(vec![Some("Sales"), None])) as ArrayRef),
            ("JobLevel", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
            ("Attrition", Arc::new(StringArray::from(vec!["No", "Yes"])) as ArrayRef),
            ("OverTime", Arc::new(StringArray::from(vec!["No", "No"])) as ArrayRef),
            ("WorkLifeBalance", Arc::new(Int64Array::from(vec![3, 3])) as ArrayRef),
            ("MonthlyIncome", Arc::new(Float64Array::from(vec![1000.0, 2000.0])) as ArrayRef),
        ]));

        let err = load_file(tmp.path()).unwrap_err();
        match err {
            DataLoadError::InvalidValue { row, column, message } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Department");
                assert_eq!(message, "null value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn text_income_column_is_rejected() {
        let input = batch(vec![
            ("Department", Arc::new(StringArray::from(vec!["Sales"])) as ArrayRef),
            ("JobLevel", Arc::new(Int64Array::from(vec![1])) as ArrayRef),
            ("Attrition", Arc::new(StringArray::from(vec!["No"])) as ArrayRef),
            ("OverTime", Arc::new(StringArray::from(vec!["No"])) as ArrayRef),
            ("WorkLifeBalance", Arc::new(Int64Array::from(vec![3])) as ArrayRef),
            ("MonthlyIncome", Arc::new(StringArray::from(vec!["1000"])) as ArrayRef),
        ]);
        let err = ParquetColumns::locate(input.schema().as_ref(), &input)
            .err()
            .unwrap();
        assert!(
            matches!(&err, DataLoadError::Malformed(msg) if msg.contains("MonthlyIncome")),
            "{err}"
        );
    }

    #[test]
    fn parquet_schema_is_checked_before_rows() {
        let tmp = parquet_file(&batch(vec![(
            "Department",
            Arc::new(StringArray::from(vec!["Sales"])) as ArrayRef,
        )]));

        let err = load_file(tmp.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumns(cols) if cols.len() == 5));
    }
}

//! CSV codec for datasets.
//!
//! Reading infers one type per column: when every present cell parses as an
//! integer the column is `int64`, otherwise when every present cell parses as
//! a number it is `float64`, otherwise it is `string`. Empty cells are missing
//! values. A column with no present cells is read as `float64`.
//!
//! Writing emits a header row followed by one record per row; missing values
//! become empty cells and floats always carry a decimal point, so a dataset
//! written here reads back with the same column types.

use crate::Result;
use etl_core::{Column, ColumnType, DataValue, Dataset};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Reads a dataset from CSV with a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for record in reader.records() {
        let record = record?;
        for (column, cell) in cells.iter_mut().zip(record.iter()) {
            column.push((!cell.is_empty()).then(|| cell.to_string()));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| infer_column(name, cells))
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::new(columns)?)
}

/// Reads a dataset from a CSV file.
pub fn read_csv_file(path: &Path) -> Result<Dataset> {
    read_csv(File::open(path)?)
}

/// Writes a dataset as CSV with a header row.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if dataset.column_count() == 0 {
        writer.flush()?;
        return Ok(());
    }

    writer.write_record(dataset.column_names())?;
    for index in 0..dataset.row_count() {
        if let Some(row) = dataset.row(index) {
            writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Picks the narrowest column type that admits every present cell.
fn infer_column(name: String, cells: Vec<Option<String>>) -> Result<Column> {
    let present = || cells.iter().flatten();

    let column_type = if present().next().is_none() {
        ColumnType::Float64
    } else if present().all(|c| c.trim().parse::<i64>().is_ok()) {
        ColumnType::Int64
    } else if present().all(|c| c.trim().parse::<f64>().is_ok()) {
        ColumnType::Float64
    } else {
        ColumnType::String
    };

    let values: Vec<DataValue> = cells
        .iter()
        .map(|cell| match (cell, column_type) {
            (None, _) => DataValue::Null,
            (Some(c), ColumnType::Int64) => c.trim().parse().map_or(DataValue::Null, DataValue::Int),
            (Some(c), ColumnType::Float64) => {
                c.trim().parse().map_or(DataValue::Null, DataValue::Float)
            }
            (Some(c), ColumnType::String) => DataValue::String(c.clone()),
        })
        .collect();

    Ok(Column::new(name, column_type, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use etl_core::DatasetBuilder;
    use pretty_assertions::assert_eq;

    const RAW: &str = "id,nome,idade,salario
1,Mariana,26,50000
2,Gabriel,,60000
3,Carlos,35,
4,,28,70000
5,Ana,-6,80000
seis,Francisco,40,90000
7,Helena,unknown,100000
";

    #[test]
    fn test_read_infers_column_types() {
        let dataset = read_csv(RAW.as_bytes()).unwrap();

        assert_eq!(dataset.row_count(), 7);
        assert_eq!(dataset.column_names(), vec!["id", "nome", "idade", "salario"]);

        let types: Vec<ColumnType> = dataset.columns().iter().map(Column::column_type).collect();
        assert_eq!(
            types,
            vec![
                ColumnType::String,
                ColumnType::String,
                ColumnType::String,
                ColumnType::Int64
            ]
        );
    }

    #[test]
    fn test_read_maps_empty_cells_to_null() {
        let dataset = read_csv(RAW.as_bytes()).unwrap();

        assert_eq!(dataset.column("nome").unwrap().null_count(), 1);
        assert_eq!(dataset.column("idade").unwrap().null_count(), 1);
        assert_eq!(dataset.column("salario").unwrap().values()[2], DataValue::Null);
    }

    #[test]
    fn test_read_float_column() {
        let dataset = read_csv("v\n1\n2.5\n".as_bytes()).unwrap();
        let column = dataset.column("v").unwrap();

        assert_eq!(column.column_type(), ColumnType::Float64);
        assert_eq!(column.values()[0], DataValue::Float(1.0));
    }

    #[test]
    fn test_read_ragged_rows_fails() {
        let result = read_csv("a,b\n1,2\n3\n".as_bytes());
        assert!(matches!(result, Err(crate::ParserError::CsvError(_))));
    }

    #[test]
    fn test_read_header_only() {
        let dataset = read_csv("a,b\n".as_bytes()).unwrap();
        assert_eq!(dataset.row_count(), 0);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_write_keeps_types_stable() {
        let dataset = DatasetBuilder::new()
            .int64("id", [Some(1), Some(2)])
            .float64("salario", [Some(50000.0), None])
            .string("nome", [Some("Ana"), Some("Caio")])
            .build()
            .unwrap();

        let mut buffer = Vec::new();
        write_csv(&dataset, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text, "id,salario,nome\n1,50000.0,Ana\n2,,Caio\n");

        let reread = read_csv(text.as_bytes()).unwrap();
        assert_eq!(reread, dataset);
    }

    #[test]
    fn test_file_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, RAW).unwrap();

        let dataset = read_csv_file(&path).unwrap();
        assert_eq!(dataset.row_count(), 7);
        assert!(read_csv_file(&dir.path().join("missing.csv")).is_err());
    }
}

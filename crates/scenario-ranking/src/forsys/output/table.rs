use std::collections::BTreeMap;
use std::io::Read;

use super::ForsysOutputError;

/// The engine returns three tables; project rows live in the second.
pub const PROJECT_OUTPUT_INDEX: usize = 1;

/// A named-column numeric table with equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForsysTable {
    columns: BTreeMap<String, Vec<f64>>,
    row_count: usize,
}

impl ForsysTable {
    pub fn from_columns<I, K>(columns: I) -> Result<Self, ForsysOutputError>
    where
        I: IntoIterator<Item = (K, Vec<f64>)>,
        K: Into<String>,
    {
        let mut table = Self::default();
        for (index, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if index == 0 {
                table.row_count = values.len();
            } else if values.len() != table.row_count {
                return Err(ForsysOutputError::RaggedColumn {
                    column: name,
                    expected: table.row_count,
                    found: values.len(),
                });
            }
            if table.columns.contains_key(&name) {
                return Err(ForsysOutputError::DuplicateColumn(name));
            }
            table.columns.insert(name, values);
        }
        Ok(table)
    }

    /// Reads a header row followed by numeric rows. Every cell must parse.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ForsysOutputError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let mut values: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            for ((column, cell), bucket) in headers.iter().zip(record.iter()).zip(&mut values) {
                let value = cell
                    .parse::<f64>()
                    .map_err(|_| ForsysOutputError::InvalidCell {
                        column: column.clone(),
                        row,
                        value: cell.to_string(),
                    })?;
                bucket.push(value);
            }
        }

        Self::from_columns(headers.into_iter().zip(values))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column(&self, name: &str) -> Result<&[f64], ForsysOutputError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ForsysOutputError::UnknownColumn(name.to_string()))
    }
}

/// Raw result of one engine invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForsysRawOutput {
    tables: Vec<ForsysTable>,
}

impl ForsysRawOutput {
    pub fn new(tables: Vec<ForsysTable>) -> Self {
        Self { tables }
    }

    /// Wraps a lone project output table at its expected position.
    pub fn from_project_output(table: ForsysTable) -> Self {
        Self {
            tables: vec![ForsysTable::default(), table, ForsysTable::default()],
        }
    }

    pub fn project_output(&self) -> Result<&ForsysTable, ForsysOutputError> {
        self.tables
            .get(PROJECT_OUTPUT_INDEX)
            .ok_or(ForsysOutputError::MissingProjectOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_tables_are_read_column_wise() {
        let table = ForsysTable::from_csv_reader(
            "proj_id, treatment_rank ,ETrt_area\n1,1,10.5\n2,2,5\n".as_bytes(),
        )
        .expect("csv parses");

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("treatment_rank").expect("trimmed header"), &[1.0, 2.0]);
        assert_eq!(table.column("ETrt_area").expect("present"), &[10.5, 5.0]);
    }

    #[test]
    fn csv_cells_must_be_numeric() {
        let error = ForsysTable::from_csv_reader("proj_id,ETrt_area\n1,\n".as_bytes())
            .expect_err("empty cell rejected");
        assert_eq!(
            error.to_string(),
            "column, ETrt_area, row 0: \"\" is not a number"
        );
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let error = ForsysTable::from_columns([("a", vec![1.0, 2.0]), ("b", vec![1.0])])
            .expect_err("ragged");
        assert!(matches!(
            error,
            ForsysOutputError::RaggedColumn {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn missing_project_output_is_reported() {
        let raw = ForsysRawOutput::new(vec![ForsysTable::default()]);
        assert!(matches!(
            raw.project_output(),
            Err(ForsysOutputError::MissingProjectOutput)
        ));
    }
}

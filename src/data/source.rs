use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::constants::data::{DEFAULT_INDEX_NAME, DELIMITER_CANDIDATES, SUPPORTED_EXTENSIONS};
use crate::error::{GraphError, Result};

/// One named numeric column plotted against the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesColumn {
    pub name: String,
    /// `None` marks a missing cell
    pub values: Vec<Option<f64>>,
}

impl SeriesColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Iterate over the present values only
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }
}

/// Ordered table: one index column plus N series columns of equal length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    index_name: String,
    index: Vec<f64>,
    series: Vec<SeriesColumn>,
}

impl DataTable {
    /// Build a table, checking column lengths and series name uniqueness
    pub fn new(index_name: impl Into<String>, index: Vec<f64>, series: Vec<SeriesColumn>) -> Result<Self> {
        let table = Self {
            index_name: index_name.into(),
            index,
            series,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check the structural invariants of the table
    pub fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            return Err(GraphError::NoSeries);
        }
        for (i, column) in self.series.iter().enumerate() {
            if column.values.len() != self.index.len() {
                return Err(GraphError::Validation(format!(
                    "series '{}' has {} values but the index has {}",
                    column.name,
                    column.values.len(),
                    self.index.len()
                )));
            }
            if self.series[..i].iter().any(|c| c.name == column.name) {
                return Err(GraphError::Validation(format!(
                    "duplicate series name '{}'",
                    column.name
                )));
            }
        }
        if let Some(x) = self.index.iter().find(|x| !x.is_finite()) {
            return Err(GraphError::Validation(format!("index value {} is not finite", x)));
        }
        Ok(())
    }

    /// Load a delimited text file: leftmost column is the index, the rest are series
    pub fn load(path: &Path) -> Result<Self> {
        profiling::scope!("DataTable::load");

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(GraphError::UnsupportedFormat { extension });
        }

        let separator = if extension == "tsv" {
            b'\t'
        } else {
            sniff_delimiter(path)?
        };

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;

        let table = Self::from_dataframe(&df)?;
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            series = table.series_count(),
            "Loaded tabular source"
        );
        Ok(table)
    }

    /// Convert a materialized DataFrame, dropping rows without an index value
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let columns = df.get_columns();
        let (index_column, series_columns) = columns.split_first().ok_or(GraphError::EmptyDataset)?;
        if series_columns.is_empty() {
            return Err(GraphError::NoSeries);
        }

        let raw_index = column_as_f64(index_column)?;
        let keep: Vec<bool> = raw_index.iter().map(Option::is_some).collect();
        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            tracing::warn!(dropped, "Dropped rows without a numeric index value");
        }

        let index: Vec<f64> = raw_index.into_iter().flatten().collect();
        if index.is_empty() {
            return Err(GraphError::EmptyDataset);
        }

        let mut series = Vec::with_capacity(series_columns.len());
        for column in series_columns {
            let values = column_as_f64(column)?
                .into_iter()
                .zip(&keep)
                .filter_map(|(v, keep)| keep.then_some(v))
                .collect();
            series.push(SeriesColumn::new(column.name().as_str(), values));
        }

        let index_name = match index_column.name().as_str().trim() {
            "" => DEFAULT_INDEX_NAME.to_string(),
            name => name.to_string(),
        };

        Self::new(index_name, index, series)
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn index(&self) -> &[f64] {
        &self.index
    }

    pub fn series(&self) -> &[SeriesColumn] {
        &self.series
    }

    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|c| c.name.as_str())
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Numeric view of a column; unparsable and non-finite cells are missing
fn column_as_f64(column: &Column) -> Result<Vec<Option<f64>>> {
    let series = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

/// Pick the most frequent candidate delimiter on the header line
fn sniff_delimiter(path: &Path) -> Result<u8> {
    let mut header = String::new();
    BufReader::new(File::open(path)?).read_line(&mut header)?;

    let best = DELIMITER_CANDIDATES
        .iter()
        .map(|&d| (d, header.bytes().filter(|&b| b == d).count()))
        .fold((b',', 0), |best, cur| if cur.1 > best.1 { cur } else { best });
    Ok(best.0)
}

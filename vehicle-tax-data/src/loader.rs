//! CSV loader for batches of vehicles.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so their order does not matter.
//!
//! | Column | Required | Type | Notes |
//! |-------------|----------|---------|---------------------------------------|
//! | `name` | yes | string | Free text, must not be blank |
//! | `power_kw` | yes | decimal | Engine power, `,` thousands allowed |
//! | `weight_kg` | yes | decimal | Vehicle weight, `,` thousands allowed |
//!
//! ```csv
//! name,power_kw,weight_kg
//! Compact,100,2500
//! "Van, long",150,"3,100"
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use vehicle_tax_core::{CombinedTaxResult, TaxResultAggregator};

/// Errors that can occur when loading vehicle data.
#[derive(Debug, Error)]
pub enum VehicleLoaderError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("line {line}: invalid {column} '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {0}: vehicle name is empty")]
    EmptyName(u64),
}

impl From<csv::Error> for VehicleLoaderError {
    fn from(err: csv::Error) -> Self {
        VehicleLoaderError::CsvParse(err.to_string())
    }
}

/// Row exactly as it appears in the file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    power_kw: String,
    weight_kg: String,
}

/// One vehicle ready to be taxed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRecord {
    pub name: String,
    pub power_kw: Decimal,
    pub weight_kg: Decimal,
}

impl VehicleRecord {
    /// Computes this vehicle's monthly tax.
    pub fn tax(
        &self,
        aggregator: &TaxResultAggregator<'_>,
    ) -> CombinedTaxResult {
        aggregator.compute_combined(self.power_kw, self.weight_kg)
    }
}

/// Loader for vehicle input data from CSV files.
pub struct VehicleLoader;

impl VehicleLoader {
    /// Parses vehicle records from any CSV reader.
    ///
    /// Every row must parse; the first bad row aborts the load and is
    /// reported with the file line its record starts on (the header is
    /// line 1).
    pub fn parse<R: Read>(reader: R) -> Result<Vec<VehicleRecord>, VehicleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();

        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map_or(0, csv::Position::line);
            let row: CsvRow = record.deserialize(Some(&headers))?;
            records.push(Self::convert(row, line)?);
        }

        debug!(count = records.len(), "parsed vehicle records");
        Ok(records)
    }

    /// Opens `path` and parses it with [`VehicleLoader::parse`].
    pub fn load_from_file(path: &Path) -> Result<Vec<VehicleRecord>, VehicleLoaderError> {
        let file = File::open(path).map_err(|source| VehicleLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(file)
    }

    fn convert(
        row: CsvRow,
        line: u64,
    ) -> Result<VehicleRecord, VehicleLoaderError> {
        if row.name.is_empty() {
            return Err(VehicleLoaderError::EmptyName(line));
        }
        Ok(VehicleRecord {
            power_kw: parse_number(&row.power_kw, "power_kw", line)?,
            weight_kg: parse_number(&row.weight_kg, "weight_kg", line)?,
            name: row.name,
        })
    }
}

/// Parses a decimal cell, dropping `,` thousands separators.
fn parse_number(
    cell: &str,
    column: &'static str,
    line: u64,
) -> Result<Decimal, VehicleLoaderError> {
    let normalized = cell.trim().replace(',', "");
    normalized.parse::<Decimal>().map_err(|e| {
        warn!(line, column, value = %cell, "invalid number: {}", e);
        VehicleLoaderError::InvalidNumber {
            line,
            column,
            value: cell.to_string(),
        }
    })
}

//! Reading a recorded load signal from a delimited text file.
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::config::ValidationError;
use crate::error::{RainflowError, Result};

/// Location and layout of the recorded signal.
#[derive(Debug, Deserialize)]
pub struct SignalConfig {
    /// Path to the delimited file holding the samples.
    pub path: String,
    /// Column holding the samples, by header name or zero-based index.
    pub column: Column,
    pub parse_config: ParseConfig,
}

/// Selects the sample column of a signal file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Index(usize),
    Name(String),
}

#[derive(Debug, Deserialize)]
pub struct ParseConfig {
    /// Number of leading rows that are not samples. The last of them names the columns.
    pub header: usize,
    pub delimiter: String,
}

impl ParseConfig {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.delimiter.is_empty() {
            return Err(ValidationError::new("delimiter must not be empty"));
        }
        if self.delimiter.len() != 1 || !self.delimiter.is_ascii() {
            return Err(ValidationError::new(&format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> std::result::Result<u8, ValidationError> {
        self.validate()?;
        Ok(self.delimiter.as_bytes()[0])
    }
}

impl SignalConfig {
    /// Validates the signal section.
    ///
    /// The file must exist, the delimiter must be usable and a column given by name
    /// needs at least one header row to be looked up in.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.parse_config.validate()?;
        if self.path.trim().is_empty() {
            return Err(ValidationError::new("path must not be empty"));
        }
        if !Path::new(&self.path).exists() {
            return Err(ValidationError::new(&format!(
                "signal file does not exist: {}",
                self.path
            )));
        }
        if let Column::Name(name) = &self.column {
            if name.trim().is_empty() {
                return Err(ValidationError::new("column name must not be empty"));
            }
            if self.parse_config.header == 0 {
                return Err(ValidationError::new(&format!(
                    "column '{}' is given by name but header is 0",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Reads the configured column of the signal file as `f64` samples.
    pub fn read_signal(&self) -> Result<Vec<f64>> {
        info!(path = %self.path, "reading signal");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.parse_config.delimiter_byte()?)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut records = reader.records();
        let mut names = None;
        for _ in 0..self.parse_config.header {
            match records.next() {
                Some(record) => names = Some(record?),
                None => break,
            }
        }

        let index = match &self.column {
            Column::Index(index) => *index,
            Column::Name(name) => names
                .as_ref()
                .and_then(|row| row.iter().position(|field| field == name.as_str()))
                .ok_or_else(|| RainflowError::MissingColumn(name.clone()))?,
        };

        let mut samples = Vec::new();
        for record in records {
            let record = record?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            let field = record
                .get(index)
                .ok_or(RainflowError::ShortRow {
                    line,
                    column: index,
                })?;
            let value = field.parse::<f64>().map_err(|_| RainflowError::ParseValue {
                line,
                value: field.to_owned(),
            })?;
            samples.push(value);
        }

        debug!(samples = samples.len(), column = index, "signal read");
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal_config(column: Column, header: usize) -> SignalConfig {
        SignalConfig {
            path: "tests/signal.csv".to_string(),
            column,
            parse_config: ParseConfig {
                header,
                delimiter: ",".into(),
            },
        }
    }

    #[test]
    fn test_read_signal_by_name() {
        let config = signal_config(Column::Name("load".into()), 1);
        assert!(config.validate().is_ok());
        let samples = config.read_signal().expect("Failed to read signal");
        assert_eq!(
            samples,
            vec![-5.0, -5.0, -3.0, -9.0, -9.0, 5.0, -3.0, 9.0, 3.0, 7.0]
        );
    }

    #[test]
    fn test_read_signal_by_index() {
        let config = signal_config(Column::Index(0), 1);
        let samples = config.read_signal().expect("Failed to read signal");
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[9], 0.9);
    }

    #[test]
    fn test_read_signal_missing_column() {
        let config = signal_config(Column::Name("strain".into()), 1);
        assert!(matches!(
            config.read_signal(),
            Err(RainflowError::MissingColumn(name)) if name == "strain"
        ));
    }

    #[test]
    fn test_read_signal_unparsable_header_row() {
        // without skipping the header its names are read as samples
        let config = signal_config(Column::Index(1), 0);
        assert!(matches!(
            config.read_signal(),
            Err(RainflowError::ParseValue { line: 1, .. })
        ));
    }

    #[test]
    fn test_read_signal_short_row() {
        let mut config = signal_config(Column::Name("load".into()), 1);
        config.path = "tests/short_row.csv".into();
        assert!(matches!(
            config.read_signal(),
            Err(RainflowError::ShortRow { line: 4, column: 1 })
        ));
    }

    #[test]
    fn test_read_signal_rejects_bad_delimiter() {
        for delimiter in ["", "::", "→"] {
            let mut config = signal_config(Column::Index(1), 1);
            config.parse_config.delimiter = delimiter.into();
            assert!(config.parse_config.delimiter_byte().is_err());
            assert!(matches!(
                config.read_signal(),
                Err(RainflowError::InvalidConfig(_))
            ));
        }
        let config = signal_config(Column::Index(1), 1);
        assert_eq!(config.parse_config.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_validate_signal_config() {
        assert!(signal_config(Column::Name("load".into()), 0).validate().is_err());

        let mut config = signal_config(Column::Index(1), 1);
        config.parse_config.delimiter = "::".into();
        assert!(config.validate().is_err());

        let mut config = signal_config(Column::Index(1), 1);
        config.path = "tests/does_not_exist.csv".into();
        assert!(config.validate().is_err());
    }
}

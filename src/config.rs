//! A module for loading and validating the configuration of a rainflow counting run.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::signal::SignalConfig;

/// Represents an error that can occur during validation of configuration data.
#[derive(Debug)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a given message.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error.
    pub fn new(message: &str) -> ValidationError {
        ValidationError {
            message: message.to_owned(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Represents the configuration for a rainflow counting run.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub signal: SignalConfig,
    /// Quantize the signal to integers before counting.
    pub quantize: Option<Quantize>,
    /// Aggregate the counted cycles into a range histogram.
    pub histogram: Option<Histogram>,
    pub output: Output,
}

impl Config {
    /// Validates the entire configuration.
    ///
    /// This method checks the validity of each section of the configuration,
    /// including that the signal file exists.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.signal.validate()?;
        if let Some(quantize) = &self.quantize {
            quantize.validate()?;
        }
        if let Some(histogram) = &self.histogram {
            histogram.validate()?;
        }
        self.output.validate()?;
        Ok(())
    }
}

/// Scaling applied before rounding the signal to `i32` samples.
#[derive(Debug, Deserialize)]
pub struct Quantize {
    /// Factor every sample is multiplied by before rounding. Must be finite and greater than 0.
    pub scale: f64,
}

impl Quantize {
    /// Validates that `scale` is a finite positive number.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclecount::config::Quantize;
    ///
    /// assert!(Quantize { scale: 100.0 }.validate().is_ok());
    /// assert!(Quantize { scale: 0.0 }.validate().is_err());
    /// assert!(Quantize { scale: f64::NAN }.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ValidationError::new(&format!(
                "scale must be a finite number greater than 0.0, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct Histogram {
    /// Number of equal-width range bins. Must be greater than 0.
    pub bins: usize,
}

impl Histogram {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bins == 0 {
            return Err(ValidationError::new("bins must be greater than 0"));
        }
        Ok(())
    }
}

/// Where and how the counted cycles are written.
#[derive(Debug, Deserialize)]
pub struct Output {
    /// The output format. Valid values are "JSON" and "CSV".
    pub format: String,
    /// Output file. Results go to stdout when absent.
    #[serde(default)]
    pub path: Option<String>,
}

impl Output {
    /// Validates the `Output` section.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclecount::config::Output;
    ///
    /// let output = Output { format: String::from("JSON"), path: None };
    /// assert!(output.validate().is_ok());
    ///
    /// let output = Output { format: String::from("XML"), path: None };
    /// assert!(output.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "JSON" | "CSV" => Ok(()),
            _ => Err(ValidationError::new(&format!(
                "format must be JSON or CSV, got {}",
                self.format
            ))),
        }?;
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err(ValidationError::new("path must not be empty when given"));
            }
        }
        Ok(())
    }
}

/// Loads the configuration from a YAML or TOML file.
///
/// Files ending in `.toml` are parsed as TOML, everything else as YAML.
///
/// # Errors
///
/// This function will return an error if reading or parsing the configuration file fails.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Config> {
    let path = config_path.as_ref();
    let content = fs::read_to_string(path)?;
    let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Column;

    #[test]
    fn test_load_config() {
        let config_path = "tests/config.yaml";
        let config = load_config(config_path).expect("Failed to load config");
        assert!(
            config.validate().is_ok(),
            "Expected Ok(()) but got Err with {:?}",
            config.validate()
        );
        assert_eq!(config.signal.column, Column::Name("load".into()));
        assert_eq!(config.quantize.map(|q| q.scale), Some(10.0));
        assert_eq!(config.histogram.map(|h| h.bins), Some(3));
        assert_eq!(config.output.format, "JSON");
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_load_toml_config() {
        let config = load_config("tests/config.toml").expect("Failed to load config");
        assert!(config.validate().is_ok());
        assert_eq!(config.signal.column, Column::Index(1));
        assert!(config.quantize.is_none());
        assert_eq!(config.output.format, "CSV");
    }

    #[test]
    fn test_load_missing_config() {
        assert!(load_config("tests/missing.yaml").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_sections() {
        let mut config = load_config("tests/config.yaml").expect("Failed to load config");
        config.histogram = Some(Histogram { bins: 0 });
        assert!(config.validate().is_err());

        config.histogram = None;
        config.quantize = Some(Quantize { scale: -1.0 });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scale"));
    }
}

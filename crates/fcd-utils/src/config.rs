//! # Device Configuration
//!
//! Name and capacity of the device a binary should create.
//!
//! Values come from the environment and can be overridden by command-line
//! flags:
//!
//! - `FCD_DEVICE_NAME`: device name (default: `fcd`)
//! - `FCD_CAPACITY`: buffer size in bytes (default: 512)

use std::env;

/// Default device name
pub const DEFAULT_NAME: &str = "fcd";

/// Default buffer size, matching the reference device
pub const DEFAULT_CAPACITY: usize = 512;

/// Settings for one faux device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig
{
    pub name: String,
    pub capacity: usize,
}

impl Default for DeviceConfig
{
    fn default() -> Self
    {
        Self {
            name: DEFAULT_NAME.to_string(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl DeviceConfig
{
    /// Read `FCD_DEVICE_NAME` and `FCD_CAPACITY`
    ///
    /// ## Errors
    ///
    /// `InvalidCapacity` if `FCD_CAPACITY` is set but not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError>
    {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    ///
    /// ## Errors
    ///
    /// Same as [`DeviceConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(name) = lookup("FCD_DEVICE_NAME") {
            config.name = name;
        }
        if let Some(raw) = lookup("FCD_CAPACITY") {
            config.capacity = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidCapacity(raw.clone()))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides, then re-validate
    ///
    /// ## Errors
    ///
    /// See [`DeviceConfig::validate`].
    pub fn with_overrides(mut self, name: Option<String>, capacity: Option<usize>) -> Result<Self, ConfigError>
    {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(capacity) = capacity {
            self.capacity = capacity;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the settings can build a device
    ///
    /// ## Errors
    ///
    /// - `EmptyName` for an empty device name
    /// - `InvalidCapacity` for a zero capacity
    pub fn validate(&self) -> Result<(), ConfigError>
    {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity("0".to_string()));
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError
{
    /// Capacity is not a positive integer
    #[error("Invalid capacity: {0:?} (expected a positive number of bytes)")]
    InvalidCapacity(String),

    /// Device name is empty
    #[error("Device name must not be empty")]
    EmptyName,
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_defaults()
    {
        let config = DeviceConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, DeviceConfig::default());
        assert_eq!(config.capacity, 512);
        assert_eq!(config.name, "fcd");
    }

    #[test]
    fn test_from_lookup()
    {
        let config = DeviceConfig::from_lookup(|key| match key {
            "FCD_DEVICE_NAME" => Some("scratch".to_string()),
            "FCD_CAPACITY" => Some(" 4096 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.name, "scratch");
        assert_eq!(config.capacity, 4096);
    }

    #[test]
    fn test_bad_capacity()
    {
        let err = DeviceConfig::from_lookup(|key| (key == "FCD_CAPACITY").then(|| "lots".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::InvalidCapacity("lots".to_string()));

        let err = DeviceConfig::from_lookup(|key| (key == "FCD_CAPACITY").then(|| "0".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCapacity(_)));
    }

    #[test]
    fn test_overrides()
    {
        let config = DeviceConfig::default()
            .with_overrides(Some("dev0".to_string()), Some(64))
            .unwrap();
        assert_eq!(config.name, "dev0");
        assert_eq!(config.capacity, 64);

        assert_eq!(
            DeviceConfig::default().with_overrides(Some(String::new()), None),
            Err(ConfigError::EmptyName)
        );
    }
}

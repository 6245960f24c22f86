// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! TOML configuration for reading and writing Versit data.
//!
//! ```toml
//! [writer]
//! folding = 75          # or false to disable folding
//! folding_style = "tab" # or "space"
//!
//! [importer]
//! extended_properties = true
//!
//! [exporter]
//! product_id = "-//Example Corp//Calendar//EN"
//! extended_properties = true
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de;

use crate::writer::{FoldingStyle, WriteOptions};

/// Product identifier written into exported calendars unless configured.
pub const DEFAULT_PRODUCT_ID: &str = "-//pimkit//pimkit-versit//EN";

/// Errors from loading a configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file at {}: {source}", .path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The content is not a valid configuration.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration of the crate, every section optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersitConfig {
    /// Writer options.
    pub writer: WriterConfig,

    /// Importer options.
    pub importer: ImporterConfig,

    /// Exporter options.
    pub exporter: ExporterConfig,
}

impl VersitConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or has unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = content.parse()?;
        tracing::debug!("loaded config");
        Ok(config)
    }
}

impl FromStr for VersitConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}

/// The `[writer]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Line width in octets, or `false` for no folding.
    pub folding: Folding,

    /// Continuation character of folded lines.
    pub folding_style: FoldingStyle,
}

impl WriterConfig {
    /// Writer options for this section.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions::default()
            .folding(self.folding.0)
            .folding_style(self.folding_style)
    }
}

/// The `[importer]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImporterConfig {
    /// Keep properties no mapping claims as extended details.
    pub extended_properties: bool,
}

/// The `[exporter]` section.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExporterConfig {
    /// Value of the `PRODID` property.
    pub product_id: String,

    /// Write extended details back as properties.
    pub extended_properties: bool,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            extended_properties: false,
        }
    }
}

/// Folding width: a number of octets, or `false` to disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Folding(pub Option<usize>);

impl Default for Folding {
    fn default() -> Self {
        Self(WriteOptions::default().folding)
    }
}

impl<'de> serde::Deserialize<'de> for Folding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FoldingVisitor;

        impl de::Visitor<'_> for FoldingVisitor {
            type Value = Folding;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a line width of at least 2 octets, or false")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value {
                    Ok(Folding::default())
                } else {
                    Ok(Folding(None))
                }
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match usize::try_from(value) {
                    Ok(width) if width >= 2 => Ok(Folding(Some(width))),
                    _ => Err(de::Error::invalid_value(de::Unexpected::Signed(value), &self)),
                }
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match usize::try_from(value) {
                    Ok(width) if width >= 2 => Ok(Folding(Some(width))),
                    _ => Err(de::Error::invalid_value(de::Unexpected::Unsigned(value), &self)),
                }
            }
        }

        deserializer.deserialize_any(FoldingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config = VersitConfig::from_toml_str("").unwrap();
        assert_eq!(config, VersitConfig::default());
        assert_eq!(config.writer.folding, Folding(Some(75)));
        assert_eq!(config.writer.folding_style, FoldingStyle::Space);
        assert!(!config.importer.extended_properties);
        assert_eq!(config.exporter.product_id, DEFAULT_PRODUCT_ID);
    }

    #[test]
    fn parses_all_sections() {
        let config = VersitConfig::from_toml_str(
            r#"
[writer]
folding = 40
folding_style = "tab"

[importer]
extended_properties = true

[exporter]
product_id = "-//Example//EN"
extended_properties = true
"#,
        )
        .unwrap();
        assert_eq!(
            config.writer.write_options(),
            WriteOptions::default()
                .folding(Some(40))
                .folding_style(FoldingStyle::Tab)
        );
        assert!(config.importer.extended_properties);
        assert_eq!(config.exporter.product_id, "-//Example//EN");
        assert!(config.exporter.extended_properties);
    }

    #[test]
    fn folding_can_be_disabled() {
        let config = VersitConfig::from_toml_str("[writer]\nfolding = false\n").unwrap();
        assert_eq!(config.writer.write_options().folding, None);
    }

    #[test]
    fn rejects_bad_values() {
        for src in [
            "[writer]\nfolding = 1\n",
            "[writer]\nfolding = -3\n",
            "[writer]\nfolding = \"wide\"\n",
            "[writer]\nfolding_style = \"dots\"\n",
            "[unknown]\nkey = 1\n",
        ] {
            assert!(
                matches!(VersitConfig::from_toml_str(src), Err(ConfigError::Parse(_))),
                "{src}"
            );
        }
    }
}

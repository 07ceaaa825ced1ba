//! Static reference catalogs consumed by the engine
//!
//! One immutable table holds the level taxonomy, the program catalog, the
//! fallback trend catalog and the theme/company tallies. Built-in defaults
//! live in [`defaults`]; any section can be overridden from a TOML file.

pub mod defaults;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{is_valid_level, LevelId, TrendCategory};

/// Coarse grouping of levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelGroup {
    /// Levels 1-3
    Material,
    /// Levels 4-6
    Exchange,
    /// Levels 7-9
    Abstract,
}

/// One row of the level taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub id: LevelId,
    pub name: String,
    /// Display color as `#rrggbb`
    pub color: String,
    pub group: LevelGroup,
}

/// The fixed nine-level taxonomy, referenced by id everywhere else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTaxonomy(Vec<LevelInfo>);

impl LevelTaxonomy {
    pub fn new(levels: Vec<LevelInfo>) -> Self {
        Self(levels)
    }

    pub fn get(&self, id: LevelId) -> Option<&LevelInfo> {
        self.0.iter().find(|l| l.id == id)
    }

    /// Display name, or `Level N` for ids missing from the table
    pub fn name(&self, id: LevelId) -> String {
        self.get(id)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| format!("Level {id}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelInfo> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LevelTaxonomy {
    fn default() -> Self {
        defaults::levels()
    }
}

/// Educational program scored by the relevance scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub key: String,
    pub name: String,
    pub url: String,
    pub keywords: Vec<String>,
    pub levels: Vec<LevelId>,
}

/// Synthetic trend used when the reports carry no structural shifts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackTrend {
    pub id: String,
    pub name: String,
    pub levels: Vec<LevelId>,
    pub category: TrendCategory,
    pub momentum: i64,
    #[serde(default)]
    pub rationale: Option<String>,
}

/// Named frequency count (theme or company)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub name: String,
    pub count: u64,
}

/// All reference data in one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub levels: LevelTaxonomy,
    pub programs: Vec<Program>,
    pub fallback_trends: Vec<FallbackTrend>,
    pub themes: Vec<TallyEntry>,
    pub companies: Vec<TallyEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            levels: defaults::levels(),
            programs: defaults::programs(),
            fallback_trends: defaults::fallback_trends(),
            themes: defaults::themes(),
            companies: defaults::companies(),
        }
    }
}

impl Catalog {
    /// Load a catalog from TOML; missing sections keep their built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = toml::from_str(&content)?;
        catalog.validate()?;

        tracing::info!(
            path = %path.display(),
            programs = catalog.programs.len(),
            fallback_trends = catalog.fallback_trends.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Look up a program by key
    pub fn program(&self, key: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.key == key)
    }

    /// Validate ids and level references
    pub fn validate(&self) -> Result<()> {
        let mut seen_levels = HashSet::new();
        for level in self.levels.iter() {
            if !is_valid_level(level.id) {
                return Err(Error::config(format!("level id {} outside 1-9", level.id)));
            }
            if !seen_levels.insert(level.id) {
                return Err(Error::config(format!("duplicate level id {}", level.id)));
            }
        }

        let mut seen_programs = HashSet::new();
        for program in &self.programs {
            if !seen_programs.insert(program.key.as_str()) {
                return Err(Error::config(format!("duplicate program key '{}'", program.key)));
            }
            if let Some(bad) = program.levels.iter().find(|l| !is_valid_level(**l)) {
                return Err(Error::config(format!(
                    "program '{}' references level {bad}",
                    program.key
                )));
            }
        }

        for trend in &self.fallback_trends {
            if let Some(bad) = trend.levels.iter().find(|l| !is_valid_level(**l)) {
                return Err(Error::config(format!(
                    "fallback trend '{}' references level {bad}",
                    trend.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.levels.len(), 9);
        assert_eq!(catalog.fallback_trends.len(), 8);
    }

    #[test]
    fn test_taxonomy_names() {
        let levels = LevelTaxonomy::default();
        assert_eq!(levels.name(1), "Resources");
        assert_eq!(levels.name(9), "Capital");
        assert_eq!(levels.name(12), "Level 12");
    }

    #[test]
    fn test_duplicate_program_key_rejected() {
        let mut catalog = Catalog::default();
        let first = catalog.programs[0].clone();
        catalog.programs.push(first);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"
[[programs]]
key = "robotics"
name = "Robotics"
url = "https://programs.example.edu/robotics"
keywords = ["robot"]
levels = [3, 6]
"#,
        )
        .unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.programs.len(), 1);
        assert_eq!(catalog.levels.len(), 9);
        assert!(catalog.program("robotics").is_some());
    }

    #[test]
    fn test_invalid_level_in_toml() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"
[[fallback_trends]]
id = "x"
name = "X"
levels = [11]
category = "emerging"
momentum = 5
"#,
        )
        .unwrap();

        assert!(Catalog::from_file(file.path()).is_err());
    }
}

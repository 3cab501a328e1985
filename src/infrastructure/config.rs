//! Rule file loading and discovery

use crate::error::{Result, SpriteTagsError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up when no rule file is given
pub const RULE_FILE_NAME: &str = "spritetags.toml";

/// Environment variable pointing at a rule file
pub const RULES_ENV: &str = "SPRITETAGS_RULES";

/// One declared callback. Exactly one of `name` and `function` must be set;
/// `function` has its registry suffix stripped to get the name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub name: Option<String>,
    pub function: Option<String>,

    /// Tags that must all be present for the rule to fire
    #[serde(default)]
    pub when: Vec<String>,

    /// Tags that must all be absent
    #[serde(default)]
    pub unless: Vec<String>,

    /// Regex over tag names; any match blocks the rule
    pub unless_matching: Option<String>,

    #[serde(default)]
    pub add: Vec<String>,

    #[serde(default)]
    pub remove: Vec<String>,
}

/// Parsed contents of a rule file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    #[serde(default)]
    pub adjust: Vec<RuleSpec>,

    #[serde(default, rename = "default")]
    pub defaults: Vec<RuleSpec>,
}

impl RuleFile {
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a rule file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpriteTagsError::RuleFileNotFound(path.to_path_buf())
            } else {
                SpriteTagsError::Io(e)
            }
        })?;

        let file = Self::parse(&contents)?;
        debug!(
            path = %path.display(),
            adjust = file.adjust.len(),
            default = file.defaults.len(),
            "Loaded rule file"
        );
        Ok(file)
    }

    /// Locate the rule file to use.
    ///
    /// An explicit path wins, then `SPRITETAGS_RULES`, then the nearest
    /// `spritetags.toml` walking up from the current directory. Returns `None`
    /// when nothing was asked for and nothing was found.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            return Self::require(path.to_path_buf()).map(Some);
        }

        if let Ok(env_path) = std::env::var(RULES_ENV) {
            return Self::require(PathBuf::from(env_path)).map(Some);
        }

        let current_dir = std::env::current_dir()?;
        Ok(Self::discover_from(&current_dir))
    }

    /// Nearest `spritetags.toml` in `start` or one of its parents
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(RULE_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    fn require(path: PathBuf) -> Result<PathBuf> {
        if path.is_file() {
            Ok(path)
        } else {
            Err(SpriteTagsError::RuleFileNotFound(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_rule_file() {
        let file = RuleFile::parse(
            r#"
            [[adjust]]
            name = "eileen"
            when = ["happy"]
            remove = ["sad"]

            [[default]]
            function = "eileen_default_attributes"
            add = ["blush"]
            "#,
        )
        .unwrap();

        assert_eq!(file.adjust.len(), 1);
        assert_eq!(file.adjust[0].name.as_deref(), Some("eileen"));
        assert_eq!(file.adjust[0].remove, vec!["sad"]);
        assert_eq!(file.defaults.len(), 1);
        assert_eq!(
            file.defaults[0].function.as_deref(),
            Some("eileen_default_attributes")
        );
        assert!(file.defaults[0].when.is_empty());
    }

    #[test]
    fn test_parse_empty_file() {
        assert_eq!(RuleFile::parse("").unwrap(), RuleFile::default());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let result = RuleFile::parse("[[adjust]]\nname = \"eileen\"\nreplace = [\"x\"]\n");
        assert!(matches!(result, Err(SpriteTagsError::TomlDeserialize(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = RuleFile::load(&temp.path().join("missing.toml"));
        match result.unwrap_err() {
            SpriteTagsError::RuleFileNotFound(_) => {}
            other => panic!("Expected RuleFileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(RULE_FILE_NAME);
        fs::write(&path, "[[default]]\nname = \"lucy\"\nadd = [\"wave\"]\n").unwrap();

        let file = RuleFile::load(&path).unwrap();
        assert_eq!(file.defaults[0].add, vec!["wave"]);
    }

    #[test]
    fn test_discover_from_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("game").join("images");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(RULE_FILE_NAME), "").unwrap();

        let found = RuleFile::discover_from(&nested).unwrap();
        assert_eq!(found, temp.path().join(RULE_FILE_NAME));
    }

    #[test]
    fn test_discover_from_prefers_nearest() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("game");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(RULE_FILE_NAME), "").unwrap();
        fs::write(nested.join(RULE_FILE_NAME), "").unwrap();

        let found = RuleFile::discover_from(&nested).unwrap();
        assert_eq!(found, nested.join(RULE_FILE_NAME));
    }

    #[test]
    fn test_discover_explicit_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = RuleFile::discover(Some(&missing)).unwrap_err();
        assert!(matches!(err, SpriteTagsError::RuleFileNotFound(_)));
    }

    #[test]
    fn test_discover_explicit_present() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rules.toml");
        fs::write(&path, "").unwrap();
        assert_eq!(RuleFile::discover(Some(&path)).unwrap(), Some(path));
    }
}

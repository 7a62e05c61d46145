//! Built-in rule sets selectable by name.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::RuleSetError;
use crate::rules::RuleFile;

/// Named, built-in rule sets.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumString,
    EnumIter,
    Display,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Preset {
    /// Imports tmux-intray's `internal/storage` package next to its `cmd`
    /// import and replaces the status command's raw field indexes with the
    /// `storage.Field*` constants.
    #[default]
    StorageFields,
}

impl Preset {
    /// Returns the preset's rule document.
    #[must_use]
    pub fn rule_file(self) -> RuleFile {
        match self {
            Self::StorageFields => RuleFile::storage_fields(),
        }
    }

    /// Looks a preset up by name, listing the known names on failure.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::UnknownPreset`] when no preset matches.
    pub fn named(name: &str) -> Result<Self, RuleSetError> {
        name.parse().map_err(|_| {
            let known: Vec<String> = Self::iter().map(|preset| preset.to_string()).collect();
            RuleSetError::unknown_preset(format!("{name} (known: {})", known.join(", ")))
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("storage-fields")]
    #[case("Storage-Fields")]
    fn parses_preset_names(#[case] name: &str) {
        assert_eq!(Preset::named(name).expect("preset"), Preset::StorageFields);
    }

    #[test]
    fn unknown_name_lists_known_presets() {
        let error = Preset::named("nope").expect_err("unknown preset");
        assert_eq!(
            error.to_string(),
            "unknown preset: nope (known: storage-fields)"
        );
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(Preset::StorageFields.to_string(), "storage-fields");
    }
}

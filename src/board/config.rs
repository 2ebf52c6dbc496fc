//! Board configuration.

use super::domain::ColumnRemovalPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for board behaviour.
///
/// # Examples
///
/// ```
/// use kanban_board::board::config::BoardConfig;
/// use kanban_board::board::domain::ColumnRemovalPolicy;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.generated_column_prefix, "column-");
///
/// let strict = BoardConfig::strict();
/// assert_eq!(strict.column_removal, ColumnRemovalPolicy::RequireEmpty);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Prefix for generated column names; the column count plus one is
    /// appended.
    pub generated_column_prefix: String,
    /// Removal policy applied by [`BoardStore::remove_column`].
    ///
    /// [`BoardStore::remove_column`]: super::services::BoardStore::remove_column
    pub column_removal: ColumnRemovalPolicy,
    /// Column counted as work in progress by the progress metric.
    pub progress_column: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            generated_column_prefix: "column-".to_owned(),
            column_removal: ColumnRemovalPolicy::DiscardTasks,
            progress_column: "In progress".to_owned(),
        }
    }
}

impl BoardConfig {
    /// Creates a configuration that refuses to remove columns still holding
    /// tasks.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            column_removal: ColumnRemovalPolicy::RequireEmpty,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields take their default
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::Parse`] when the document is not valid
    /// configuration JSON.
    pub fn from_json(document: &str) -> Result<Self, BoardConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Returns the generated name for the column at the given one-based
    /// position.
    #[must_use]
    pub fn generated_column_name(&self, position: usize) -> String {
        format!("{}{position}", self.generated_column_prefix)
    }
}

/// Errors returned while loading board configuration.
#[derive(Debug, Error)]
pub enum BoardConfigError {
    /// The configuration document could not be parsed.
    #[error("invalid board configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

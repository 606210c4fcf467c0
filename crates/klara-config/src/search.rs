//! Source walk settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Honor `.gitignore` and `.klaraignore` while walking the root.
    #[serde(default)]
    pub respect_gitignore: bool,
}

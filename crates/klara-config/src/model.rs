//! Local model server settings.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_name() -> String {
    "klaradvn".to_string()
}

fn default_modelfile() -> String {
    "template.modelfile".to_string()
}

/// Default request timeout. Generation of a full test module can be slow.
const fn default_timeout_secs() -> u64 {
    600
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Base URL of the Ollama server.
    #[serde(default = "default_host")]
    pub host: String,

    /// Model used for generation and created by `create-model`.
    #[serde(default = "default_name")]
    pub name: String,

    /// Modelfile passed to `ollama create`.
    #[serde(default = "default_modelfile")]
    pub modelfile: String,

    /// Timeout for one generation request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            name: default_name(),
            modelfile: default_modelfile(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    /// `host` without a trailing slash, ready for path joins.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }
}

use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Backend used for fallback text generation.
///
/// Selected through `LLM_KIND`. Only a local Ollama runtime is wired today;
/// new backends extend this enum and the match in
/// [`crate::generator::LazyGenerator`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

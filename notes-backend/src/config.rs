use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "NOTES_AGENT_HOST";
    pub const PORT: &str = "NOTES_AGENT_PORT";
    pub const NOTES_DIR: &str = "NOTES_DIR";
    /// Maximum stored note size in bytes. "0" disables the cap.
    pub const MAX_NOTE_BYTES: &str = "NOTES_MAX_NOTE_BYTES";
    pub const MAX_PROMPT_CHARS: &str = "MAX_PROMPT_CHARS";
    pub const MAX_RESPONSE_CHARS: &str = "MAX_RESPONSE_CHARS";
    pub const AI_ENDPOINT: &str = "AI_ENDPOINT";
    pub const AI_MODEL: &str = "AI_MODEL";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    /// Used when GOOGLE_API_KEY is unset (non-Gemini providers)
    pub const AI_API_KEY: &str = "AI_API_KEY";
    pub const AI_TEMPERATURE: &str = "AI_TEMPERATURE";
    pub const MAX_TOOL_ROUNDS: &str = "AGENT_MAX_TOOL_ROUNDS";
    pub const MAX_CONCURRENCY: &str = "AGENT_MAX_CONCURRENCY";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 8000;
    pub const NOTES_DIR: &str = "notes";
    pub const MAX_NOTE_BYTES: usize = 1024 * 1024;
    pub const MAX_PROMPT_CHARS: usize = 10_000;
    pub const MAX_RESPONSE_CHARS: usize = 100_000;
    pub const AI_ENDPOINT: &str =
        "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
    pub const AI_MODEL: &str = "gemini-2.0-flash-lite";
    pub const AI_TEMPERATURE: f32 = 0.0;
    pub const MAX_TOOL_ROUNDS: usize = 15;
    pub const MAX_CONCURRENCY: usize = 4;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub notes_dir: PathBuf,
    pub max_note_bytes: Option<usize>,
    pub max_prompt_chars: usize,
    pub max_response_chars: usize,
    pub ai_endpoint: String,
    pub ai_model: String,
    pub ai_api_key: Option<String>,
    pub ai_temperature: f32,
    pub max_tool_rounds: usize,
    pub max_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let max_note_bytes = match parse_or(env_vars::MAX_NOTE_BYTES, defaults::MAX_NOTE_BYTES) {
            0 => None,
            n => Some(n),
        };

        let ai_api_key = env::var(env_vars::GOOGLE_API_KEY)
            .or_else(|_| env::var(env_vars::AI_API_KEY))
            .ok()
            .filter(|k| !k.trim().is_empty());

        Self {
            host: env::var(env_vars::HOST).unwrap_or_else(|_| defaults::HOST.to_string()),
            port: parse_or(env_vars::PORT, defaults::PORT),
            notes_dir: env::var(env_vars::NOTES_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(defaults::NOTES_DIR)),
            max_note_bytes,
            max_prompt_chars: parse_or(env_vars::MAX_PROMPT_CHARS, defaults::MAX_PROMPT_CHARS),
            max_response_chars: parse_or(
                env_vars::MAX_RESPONSE_CHARS,
                defaults::MAX_RESPONSE_CHARS,
            ),
            ai_endpoint: env::var(env_vars::AI_ENDPOINT)
                .unwrap_or_else(|_| defaults::AI_ENDPOINT.to_string()),
            ai_model: env::var(env_vars::AI_MODEL)
                .unwrap_or_else(|_| defaults::AI_MODEL.to_string()),
            ai_api_key,
            ai_temperature: parse_or(env_vars::AI_TEMPERATURE, defaults::AI_TEMPERATURE),
            max_tool_rounds: parse_or(env_vars::MAX_TOOL_ROUNDS, defaults::MAX_TOOL_ROUNDS).max(1),
            max_concurrency: parse_or(env_vars::MAX_CONCURRENCY, defaults::MAX_CONCURRENCY).max(1),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            notes_dir: PathBuf::from(defaults::NOTES_DIR),
            max_note_bytes: Some(defaults::MAX_NOTE_BYTES),
            max_prompt_chars: defaults::MAX_PROMPT_CHARS,
            max_response_chars: defaults::MAX_RESPONSE_CHARS,
            ai_endpoint: defaults::AI_ENDPOINT.to_string(),
            ai_model: defaults::AI_MODEL.to_string(),
            ai_api_key: None,
            ai_temperature: defaults::AI_TEMPERATURE,
            max_tool_rounds: defaults::MAX_TOOL_ROUNDS,
            max_concurrency: defaults::MAX_CONCURRENCY,
        }
    }
}

/// Read and parse an env var, falling back to `default` when unset or invalid
fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!(
                    "[CONFIG] Invalid value '{}' for {}, using default {}",
                    raw,
                    key,
                    default
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_request_limits() {
        let config = Config::default();
        assert_eq!(config.max_prompt_chars, 10_000);
        assert_eq!(config.max_response_chars, 100_000);
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        // SAFETY: test-local variable name, not read by other tests
        unsafe { env::set_var("NOTES_TEST_PARSE_OR", "not-a-number") };
        assert_eq!(parse_or("NOTES_TEST_PARSE_OR", 42usize), 42);

        unsafe { env::set_var("NOTES_TEST_PARSE_OR", " 7 ") };
        assert_eq!(parse_or("NOTES_TEST_PARSE_OR", 42usize), 7);

        unsafe { env::remove_var("NOTES_TEST_PARSE_OR") };
        assert_eq!(parse_or("NOTES_TEST_PARSE_OR", 42usize), 42);
    }
}

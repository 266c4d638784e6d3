//! Request gate. Bounds what goes into the agent and what comes back out.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    EmptyPrompt,
    PromptTooLong { len: usize, max: usize },
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::EmptyPrompt => write!(f, "Prompt cannot be empty"),
            GateError::PromptTooLong { max, .. } => write!(
                f,
                "Prompt is too long. Maximum length is {} characters.",
                max
            ),
        }
    }
}

impl std::error::Error for GateError {}

/// A prompt that passed [`RequestGate::accept`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPrompt(String);

impl ValidatedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RequestGate {
    max_prompt_chars: usize,
    max_response_chars: usize,
}

impl RequestGate {
    pub fn new(max_prompt_chars: usize, max_response_chars: usize) -> Self {
        Self {
            max_prompt_chars,
            max_response_chars,
        }
    }

    pub fn max_prompt_chars(&self) -> usize {
        self.max_prompt_chars
    }

    /// Lengths are counted in chars, not bytes.
    pub fn accept(&self, prompt: &str) -> Result<ValidatedPrompt, GateError> {
        if prompt.trim().is_empty() {
            return Err(GateError::EmptyPrompt);
        }
        let len = prompt.chars().count();
        if len > self.max_prompt_chars {
            return Err(GateError::PromptTooLong {
                len,
                max: self.max_prompt_chars,
            });
        }
        Ok(ValidatedPrompt(prompt.to_string()))
    }

    /// Truncate the agent's answer to the response cap. Never fails.
    pub fn bound_response(&self, mut response: String) -> String {
        if let Some((cut, _)) = response.char_indices().nth(self.max_response_chars) {
            log::warn!(
                "[GATE] Truncating response from {} bytes to {} chars",
                response.len(),
                self.max_response_chars
            );
            response.truncate(cut);
        }
        response
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        use crate::config::defaults;
        Self::new(defaults::MAX_PROMPT_CHARS, defaults::MAX_RESPONSE_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_rejected() {
        let gate = RequestGate::default();
        assert_eq!(gate.accept(""), Err(GateError::EmptyPrompt));
        assert_eq!(gate.accept("  \n\t "), Err(GateError::EmptyPrompt));
    }

    #[test]
    fn test_prompt_length_boundary() {
        let gate = RequestGate::default();
        let exact = "a".repeat(10_000);
        assert_eq!(gate.accept(&exact).unwrap().as_str(), exact);

        let over = "a".repeat(10_001);
        assert_eq!(
            gate.accept(&over),
            Err(GateError::PromptTooLong {
                len: 10_001,
                max: 10_000
            })
        );
    }

    #[test]
    fn test_prompt_length_counts_chars() {
        let gate = RequestGate::new(3, 10);
        assert!(gate.accept("✓✓✓").is_ok());
        assert!(gate.accept("✓✓✓✓").is_err());
    }

    #[test]
    fn test_response_truncated_not_rejected() {
        let gate = RequestGate::default();
        let long = "b".repeat(100_005);
        let bounded = gate.bound_response(long);
        assert_eq!(bounded.chars().count(), 100_000);

        let exact = "c".repeat(100_000);
        assert_eq!(gate.bound_response(exact.clone()), exact);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let gate = RequestGate::new(10, 2);
        assert_eq!(gate.bound_response("éèê".to_string()), "éè");
        assert_eq!(gate.bound_response("é".to_string()), "é");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(GateError::EmptyPrompt.to_string(), "Prompt cannot be empty");
        assert_eq!(
            GateError::PromptTooLong { len: 5, max: 4 }.to_string(),
            "Prompt is too long. Maximum length is 4 characters."
        );
    }
}

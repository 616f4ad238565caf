use anyhow::Context as _;
use serde::Deserialize;

/// Default prefix for bot commands
fn default_command_prefix() -> String {
    "!".to_string()
}

/// Default poll duration in milliseconds (1 minute)
fn default_poll_timeout_ms() -> u64 {
    60_000
}

/// Default maximum number of votes per poll (0 = unbounded)
fn default_poll_max_count() -> usize {
    0
}

#[derive(Deserialize, Clone)]
pub struct Params {
    pub discord_token: String,

    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    // Poll Collector Configuration
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    #[serde(default = "default_poll_max_count")]
    pub poll_max_count: usize,
}

/// Mask sensitive strings by showing only first and last few characters
fn mask_token(s: &str) -> String {
    const VISIBLE_CHARS: usize = 4;

    if s.len() <= VISIBLE_CHARS * 2 {
        if s.is_empty() {
            return "<empty>".to_string();
        }
        return format!("{}***", &s[..1]);
    }

    format!(
        "{}***{}",
        &s[..VISIBLE_CHARS],
        &s[s.len() - VISIBLE_CHARS..]
    )
}

impl std::fmt::Debug for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("discord_token", &mask_token(&self.discord_token))
            .field("command_prefix", &self.command_prefix)
            .field("poll_timeout_ms", &self.poll_timeout_ms)
            .field("poll_max_count", &self.poll_max_count)
            .finish()
    }
}

impl Params {
    pub fn new() -> anyhow::Result<Params> {
        envy::from_env::<Params>().context("Failed to load configuration")
    }

    /// Strip the poll command from a message, returning the question
    pub fn parse_poll_command<'a>(&self, content: &'a str) -> Option<&'a str> {
        let rest = content.strip_prefix(self.command_prefix.as_str())?;
        let question = rest.strip_prefix("poll")?;
        // "!pollster" is not a poll
        if !question.is_empty() && !question.starts_with(char::is_whitespace) {
            return None;
        }
        let question = question.trim();
        (!question.is_empty()).then_some(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params() -> Params {
        Params {
            discord_token: "MTExMjIyMzMzNDQ0NTU1NjY2Nzc3ODg4OTk5".to_string(),
            command_prefix: default_command_prefix(),
            poll_timeout_ms: default_poll_timeout_ms(),
            poll_max_count: default_poll_max_count(),
        }
    }

    #[rstest]
    #[case::long_string("MTExMjIyMzMzNDQ0NTU1NjY2Nzc3ODg4OTk5", "MTEx***OTk5")]
    #[case::short_string("short", "s***")]
    #[case::empty_string("", "<empty>")]
    fn test_mask_token(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(mask_token(input), expected);
    }

    #[test]
    fn test_params_debug_masks_sensitive_data() {
        let debug_output = format!("{:?}", params());

        assert!(debug_output.contains("MTEx***OTk5"));
        assert!(!debug_output.contains("MTExMjIyMzMzNDQ0NTU1NjY2Nzc3ODg4OTk5"));
        assert!(debug_output.contains("poll_timeout_ms: 60000"));
    }

    #[rstest]
    #[case("!poll Pizza tonight?", Some("Pizza tonight?"))]
    #[case("!poll    spaced  ", Some("spaced"))]
    #[case("!poll", None)]
    #[case("!pollster now", None)]
    #[case("?poll question", None)]
    #[case("hello", None)]
    fn test_parse_poll_command(#[case] content: &str, #[case] expected: Option<&str>) {
        assert_eq!(params().parse_poll_command(content), expected);
    }
}

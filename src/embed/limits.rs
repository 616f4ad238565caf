//! Discord embed limits and the string checks shared by every setter
//!
//! Lengths are counted in characters rather than bytes, so multibyte text is
//! measured the way Discord measures it.

use url::Url;

use super::error::EmbedError;

pub const TITLE_MAX: usize = 256;
pub const DESCRIPTION_MAX: usize = 2048;
pub const FOOTER_TEXT_MAX: usize = 2048;
pub const AUTHOR_NAME_MAX: usize = 256;
pub const FIELD_NAME_MAX: usize = 256;
pub const FIELD_VALUE_MAX: usize = 1024;
pub const FIELDS_MAX: usize = 25;

/// Scheme prefix for files uploaded alongside the message
pub const ATTACHMENT_SCHEME: &str = "attachment://";

/// Reject `value` if it is longer than `limit` characters
pub fn check_length(what: &'static str, value: &str, limit: usize) -> Result<(), EmbedError> {
    let len = value.chars().count();
    if len > limit {
        return Err(EmbedError::RangeViolation {
            what,
            limit: limit as u64,
            actual: len as u64,
        });
    }
    Ok(())
}

/// Require a strict `http://` or `https://` URL
pub fn check_url(what: &'static str, value: &str) -> Result<(), EmbedError> {
    if is_well_formed_url(value) {
        Ok(())
    } else {
        Err(EmbedError::FormatViolation {
            what,
            value: value.to_string(),
        })
    }
}

/// Require a strict URL or an `attachment://` reference
pub fn check_media_url(what: &'static str, value: &str) -> Result<(), EmbedError> {
    if value.starts_with(ATTACHMENT_SCHEME) {
        return Ok(());
    }
    check_url(what, value)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_host_char(c: char) -> bool {
    is_word_char(c) || c == '.' || c == '-'
}

fn is_url_char(c: char) -> bool {
    is_host_char(c) || "~:/?#[]@!$&'()*+,;=".contains(c)
}

/// Strict URL check
///
/// Accepts `http(s)://` followed by a dotted host and at least one more
/// character, drawn only from unreserved/reserved URL punctuation. Whitespace,
/// percent signs and non-ASCII characters are rejected. The result must also
/// parse as a URL.
fn is_well_formed_url(value: &str) -> bool {
    let rest = match value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    if !rest.chars().all(is_url_char) {
        return false;
    }

    // All characters are ASCII from here, so byte offsets equal char offsets
    let host_run = rest.chars().take_while(|c| is_host_char(*c)).count();

    // A dot after the first host character, followed by a label character,
    // and still something left over for the tail.
    let dotted = rest[..host_run]
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '.')
        .is_some_and(|(dot, _)| dot + 2 <= host_run && dot + 2 < rest.len());

    dotted && Url::parse(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com", true)]
    #[case("http://example.com/path?q=1#frag", true)]
    #[case("https://cdn.discordapp.com/avatars/1/a.png", true)]
    #[case("https://a.bc", true)]
    #[case("https://a.b", false)]
    #[case("https://localhost/", false)]
    #[case("ftp://example.com", false)]
    #[case("example.com", false)]
    #[case("https://exa mple.com", false)]
    #[case("https://example", false)]
    #[case("https://example.com/ümlaut", false)]
    #[case("", false)]
    fn test_is_well_formed_url(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_well_formed_url(input), expected, "url: {input:?}");
    }

    #[test]
    fn test_check_media_url_accepts_attachment() {
        assert!(check_media_url("Image URL", "attachment://chart.png").is_ok());
        assert!(matches!(
            check_media_url("Image URL", "attachments://chart.png"),
            Err(EmbedError::FormatViolation { .. })
        ));
    }

    #[test]
    fn test_check_length_counts_characters() {
        let title = "é".repeat(TITLE_MAX);
        assert!(check_length("Embed titles", &title, TITLE_MAX).is_ok());

        let err = check_length("Embed titles", &format!("{title}é"), TITLE_MAX).unwrap_err();
        assert_eq!(
            err,
            EmbedError::RangeViolation {
                what: "Embed titles",
                limit: 256,
                actual: 257,
            }
        );
    }
}

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

use super::color::ColorInput;
use super::error::EmbedError;
use super::limits::{
    AUTHOR_NAME_MAX, DESCRIPTION_MAX, FIELD_NAME_MAX, FIELD_VALUE_MAX, FIELDS_MAX,
    FOOTER_TEXT_MAX, TITLE_MAX, check_length, check_media_url, check_url,
};
use super::payload::{EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia, EmbedPayload};

/// Placeholder used for omitted field names and values
pub const ZERO_WIDTH_SPACE: &str = "\u{200B}";

/// Fluent, validating builder for [`EmbedPayload`]
///
/// Every setter checks its arguments before touching the builder, so a failed
/// call leaves the embed exactly as it was.
///
/// ```ignore
/// let mut embed = EmbedBuilder::new();
/// embed
///     .set_title("Poll")?
///     .set_color("#5865F2")?
///     .add_field(Some("Yes"), Some("👍"), true)?;
/// channel_id.send_message(&http, CreateMessage::new().embed(embed.build().into())).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbedBuilder {
    payload: EmbedPayload,
    rng: Option<StdRng>,
}

impl EmbedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose random colors come from a seeded generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            payload: EmbedPayload::default(),
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// Start from loosely typed embed data
    ///
    /// Each present key goes through the matching setter, so wrong JSON types
    /// fail with [`EmbedError::TypeMismatch`] and out-of-bounds values with
    /// the setter's own error. `null` values and unknown keys are skipped.
    pub fn from_value(data: &Value) -> Result<Self, EmbedError> {
        let data = as_object(data)?;
        let mut builder = Self::new();

        if let Some(title) = get_str(data, "title")? {
            builder.set_title(title)?;
        }
        if let Some(description) = get_str(data, "description")? {
            builder.set_description(description)?;
        }
        if let Some(url) = get_str(data, "url")? {
            builder.set_url(url)?;
        }
        match data.get("timestamp") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => {
                builder.set_timestamp_str(s)?;
            }
            Some(Value::Number(n)) => {
                let millis = n
                    .as_i64()
                    .ok_or_else(|| EmbedError::InvalidDate(n.to_string()))?;
                builder.set_timestamp_millis(millis)?;
            }
            Some(other) => return Err(EmbedError::type_mismatch("string", other)),
        }
        if let Some(color) = data.get("color").filter(|v| !v.is_null()) {
            builder.set_color(ColorInput::try_from(color)?)?;
        }
        if let Some(footer) = get_object(data, "footer")? {
            let text = get_str(footer, "text")?.unwrap_or_default();
            builder.set_footer(text, get_str(footer, "icon_url")?)?;
        }
        if let Some(image) = get_object(data, "image")? {
            builder.set_image(get_str(image, "url")?.unwrap_or_default())?;
        }
        if let Some(thumbnail) = get_object(data, "thumbnail")? {
            builder.set_thumbnail(get_str(thumbnail, "url")?.unwrap_or_default())?;
        }
        if let Some(author) = get_object(data, "author")? {
            builder.set_author(
                get_str(author, "name")?.unwrap_or_default(),
                get_str(author, "url")?,
                get_str(author, "icon_url")?,
            )?;
        }
        match data.get("fields") {
            None | Some(Value::Null) => {}
            Some(Value::Array(fields)) => {
                for field in fields {
                    let field = as_object(field)?;
                    let inline = match field.get("inline") {
                        None | Some(Value::Null) => false,
                        Some(Value::Bool(b)) => *b,
                        Some(other) => return Err(EmbedError::type_mismatch("boolean", other)),
                    };
                    builder.add_field(get_str(field, "name")?, get_str(field, "value")?, inline)?;
                }
            }
            Some(other) => return Err(EmbedError::type_mismatch("array", other)),
        }

        Ok(builder)
    }

    pub fn set_title(&mut self, title: &str) -> Result<&mut Self, EmbedError> {
        check_length("Embed titles", title, TITLE_MAX)?;
        self.payload.title = Some(title.to_string());
        Ok(self)
    }

    pub fn set_description(&mut self, description: &str) -> Result<&mut Self, EmbedError> {
        check_length("Embed descriptions", description, DESCRIPTION_MAX)?;
        self.payload.description = Some(description.to_string());
        Ok(self)
    }

    pub fn set_url(&mut self, url: &str) -> Result<&mut Self, EmbedError> {
        check_url("Embed URL", url)?;
        self.payload.url = Some(url.to_string());
        Ok(self)
    }

    /// Stamp the embed with the current time
    pub fn set_timestamp_now(&mut self) -> &mut Self {
        self.set_timestamp(Utc::now())
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) -> &mut Self {
        self.payload.timestamp = Some(timestamp);
        self
    }

    /// Parse an RFC 3339 or RFC 2822 date string
    pub fn set_timestamp_str(&mut self, timestamp: &str) -> Result<&mut Self, EmbedError> {
        let parsed = DateTime::parse_from_rfc3339(timestamp)
            .or_else(|_| DateTime::parse_from_rfc2822(timestamp))
            .map_err(|_| EmbedError::InvalidDate(timestamp.to_string()))?;
        Ok(self.set_timestamp(parsed.with_timezone(&Utc)))
    }

    /// Milliseconds since the Unix epoch
    pub fn set_timestamp_millis(&mut self, millis: i64) -> Result<&mut Self, EmbedError> {
        let timestamp = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| EmbedError::InvalidDate(millis.to_string()))?;
        Ok(self.set_timestamp(timestamp))
    }

    /// Set the sidebar color
    ///
    /// Random picks draw from the builder's seeded generator when it was
    /// created with [`EmbedBuilder::with_seed`], otherwise from the thread RNG.
    pub fn set_color(&mut self, color: impl Into<ColorInput>) -> Result<&mut Self, EmbedError> {
        let color = color.into();
        let value = match self.rng.as_mut() {
            Some(rng) => color.resolve(rng)?,
            None => color.resolve(&mut rand::thread_rng())?,
        };
        self.payload.color = Some(value);
        Ok(self)
    }

    /// Set the sidebar color, drawing random picks from `rng`
    pub fn set_color_with<R: Rng + ?Sized>(
        &mut self,
        color: impl Into<ColorInput>,
        rng: &mut R,
    ) -> Result<&mut Self, EmbedError> {
        self.payload.color = Some(color.into().resolve(rng)?);
        Ok(self)
    }

    pub fn set_footer(&mut self, text: &str, icon_url: Option<&str>) -> Result<&mut Self, EmbedError> {
        check_length("Embed footer texts", text, FOOTER_TEXT_MAX)?;
        if let Some(icon_url) = icon_url {
            check_media_url("Footer icon URL", icon_url)?;
        }

        self.payload.footer = Some(EmbedFooter {
            text: text.to_string(),
            icon_url: icon_url.map(str::to_string),
        });
        Ok(self)
    }

    pub fn set_image(&mut self, url: &str) -> Result<&mut Self, EmbedError> {
        check_media_url("Image URL", url)?;
        self.payload.image = Some(EmbedMedia {
            url: url.to_string(),
        });
        Ok(self)
    }

    pub fn set_thumbnail(&mut self, url: &str) -> Result<&mut Self, EmbedError> {
        check_media_url("Thumbnail URL", url)?;
        self.payload.thumbnail = Some(EmbedMedia {
            url: url.to_string(),
        });
        Ok(self)
    }

    pub fn set_author(
        &mut self,
        name: &str,
        url: Option<&str>,
        icon_url: Option<&str>,
    ) -> Result<&mut Self, EmbedError> {
        check_length("Embed author names", name, AUTHOR_NAME_MAX)?;
        if let Some(url) = url {
            check_url("Author URL", url)?;
        }
        if let Some(icon_url) = icon_url {
            check_media_url("Author icon URL", icon_url)?;
        }

        self.payload.author = Some(EmbedAuthor {
            name: name.to_string(),
            url: url.map(str::to_string),
            icon_url: icon_url.map(str::to_string),
        });
        Ok(self)
    }

    /// Append a field; `None` name or value becomes a zero-width space
    pub fn add_field(
        &mut self,
        name: Option<&str>,
        value: Option<&str>,
        inline: bool,
    ) -> Result<&mut Self, EmbedError> {
        if self.payload.fields.len() >= FIELDS_MAX {
            return Err(EmbedError::RangeViolation {
                what: "Embed fields",
                limit: FIELDS_MAX as u64,
                actual: self.payload.fields.len() as u64 + 1,
            });
        }

        let name = name.unwrap_or(ZERO_WIDTH_SPACE);
        let value = value.unwrap_or(ZERO_WIDTH_SPACE);
        check_length("Embed field names", name, FIELD_NAME_MAX)?;
        check_length("Embed field values", value, FIELD_VALUE_MAX)?;

        self.payload.fields.push(EmbedField {
            name: name.to_string(),
            value: value.to_string(),
            inline,
        });
        Ok(self)
    }

    /// Append a spacer field with no visible name or value
    pub fn add_blank_field(&mut self, inline: bool) -> Result<&mut Self, EmbedError> {
        self.add_field(None, None, inline)
    }

    pub fn fields_len(&self) -> usize {
        self.payload.fields.len()
    }

    /// Snapshot of the embed as built so far
    pub fn build(&self) -> EmbedPayload {
        self.payload.clone()
    }

    pub fn into_payload(self) -> EmbedPayload {
        self.payload
    }
}

impl From<EmbedBuilder> for EmbedPayload {
    fn from(builder: EmbedBuilder) -> Self {
        builder.into_payload()
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, EmbedError> {
    value
        .as_object()
        .ok_or_else(|| EmbedError::type_mismatch("object", value))
}

fn get_str<'a>(object: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, EmbedError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(EmbedError::type_mismatch("string", other)),
    }
}

fn get_object<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, EmbedError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_object(value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(256, true)]
    #[case(257, false)]
    fn test_set_title_length(#[case] len: usize, #[case] ok: bool) {
        let mut embed = EmbedBuilder::new();
        let result = embed.set_title(&"a".repeat(len)).map(|_| ());
        if ok {
            assert!(result.is_ok());
            assert_eq!(embed.build().title.unwrap().len(), len);
        } else {
            assert!(matches!(result, Err(EmbedError::RangeViolation { limit: 256, .. })));
            assert!(embed.build().title.is_none());
        }
    }

    #[rstest]
    #[case(2048, true)]
    #[case(2049, false)]
    fn test_set_description_length(#[case] len: usize, #[case] ok: bool) {
        let mut embed = EmbedBuilder::new();
        assert_eq!(embed.set_description(&"d".repeat(len)).is_ok(), ok);
    }

    #[test]
    fn test_failed_setter_keeps_previous_value() {
        let mut embed = EmbedBuilder::new();
        embed.set_url("https://example.com").unwrap();

        let err = embed.set_url("not a url").unwrap_err();
        assert!(matches!(err, EmbedError::FormatViolation { .. }));
        assert_eq!(embed.build().url.as_deref(), Some("https://example.com"));
    }

    #[rstest]
    #[case(0xFFFFFF_i64, Some(0xFFFFFF))]
    #[case(0x1000000_i64, None)]
    fn test_set_color_int(#[case] input: i64, #[case] expected: Option<u32>) {
        let mut embed = EmbedBuilder::new();
        let ok = embed.set_color(input).is_ok();
        assert_eq!(ok, expected.is_some());
        assert_eq!(embed.build().color, expected);
    }

    #[test]
    fn test_set_color_hex_and_format_error() {
        let mut embed = EmbedBuilder::new();
        embed.set_color("#abcdef").unwrap();
        assert_eq!(embed.build().color, Some(0xABCDEF));

        assert!(matches!(
            embed.set_color("zzzzzz"),
            Err(EmbedError::FormatViolation { .. })
        ));
        assert_eq!(embed.build().color, Some(0xABCDEF));
    }

    #[test]
    fn test_seeded_random_color_is_reproducible() {
        let mut first = EmbedBuilder::with_seed(7);
        let mut second = EmbedBuilder::with_seed(7);
        first.set_color(ColorInput::Random).unwrap();
        second.set_color("RANDOM").unwrap();
        assert_eq!(first.build().color, second.build().color);
    }

    #[test]
    fn test_add_field_limit_and_order() {
        let mut embed = EmbedBuilder::new();
        for i in 0..25 {
            let name = format!("name {i}");
            embed.add_field(Some(&name), Some("v"), i % 2 == 0).unwrap();
        }

        let err = embed.add_field(Some("extra"), Some("v"), false).unwrap_err();
        assert!(matches!(err, EmbedError::RangeViolation { limit: 25, .. }));

        let payload = embed.build();
        assert_eq!(payload.fields.len(), 25);
        for (i, field) in payload.fields.iter().enumerate() {
            assert_eq!(field.name, format!("name {i}"));
            assert_eq!(field.inline, i % 2 == 0);
        }
    }

    #[test]
    fn test_add_field_defaults_to_zero_width_space() {
        let mut embed = EmbedBuilder::new();
        embed.add_blank_field(true).unwrap();

        let field = &embed.build().fields[0];
        assert_eq!(field.name, ZERO_WIDTH_SPACE);
        assert_eq!(field.value, ZERO_WIDTH_SPACE);
        assert!(field.inline);
    }

    #[rstest]
    #[case(257, 1, false)]
    #[case(256, 1025, false)]
    #[case(256, 1024, true)]
    fn test_add_field_lengths(#[case] name_len: usize, #[case] value_len: usize, #[case] ok: bool) {
        let mut embed = EmbedBuilder::new();
        let result = embed.add_field(Some(&"n".repeat(name_len)), Some(&"v".repeat(value_len)), false);
        assert_eq!(result.is_ok(), ok);
        assert_eq!(embed.fields_len(), usize::from(ok));
    }

    #[rstest]
    #[case("2024-01-01T00:00:00Z", true)]
    #[case("Mon, 01 Jan 2024 00:00:00 +0000", true)]
    #[case("yesterday", false)]
    fn test_set_timestamp_str(#[case] input: &str, #[case] ok: bool) {
        let mut embed = EmbedBuilder::new();
        let result = embed.set_timestamp_str(input).map(|_| ());
        if ok {
            assert!(result.is_ok());
            assert!(embed.build().timestamp.is_some());
        } else {
            assert_eq!(result.unwrap_err(), EmbedError::InvalidDate(input.to_string()));
        }
    }

    #[test]
    fn test_set_timestamp_millis_out_of_range() {
        let mut embed = EmbedBuilder::new();
        assert!(matches!(
            embed.set_timestamp_millis(i64::MAX),
            Err(EmbedError::InvalidDate(_))
        ));
        embed.set_timestamp_millis(0).unwrap();
        assert_eq!(embed.build().timestamp.unwrap().timestamp(), 0);
    }

    #[test]
    fn test_set_author_validates_each_url() {
        let mut embed = EmbedBuilder::new();
        assert!(
            embed
                .set_author("me", Some("attachment://me.png"), None)
                .is_err(),
            "author url does not accept attachments"
        );
        embed
            .set_author("me", Some("https://example.com"), Some("attachment://me.png"))
            .unwrap();
        let author = embed.build().author.unwrap();
        assert_eq!(author.icon_url.as_deref(), Some("attachment://me.png"));
    }

    #[test]
    fn test_from_value_routes_through_setters() {
        let data = json!({
            "title": "Hello",
            "color": "#010203",
            "footer": { "text": "bye", "icon_url": "attachment://f.png" },
            "fields": [ { "name": "a", "value": "b", "inline": true }, {} ],
            "unknown": 1
        });

        let payload = EmbedBuilder::from_value(&data).unwrap().build();
        assert_eq!(payload.title.as_deref(), Some("Hello"));
        assert_eq!(payload.color, Some(0x010203));
        assert_eq!(payload.footer.unwrap().text, "bye");
        assert_eq!(payload.fields.len(), 2);
        assert_eq!(payload.fields[1].name, ZERO_WIDTH_SPACE);
    }

    #[rstest]
    #[case(json!("not an object"))]
    #[case(json!({ "title": 5 }))]
    #[case(json!({ "color": false }))]
    #[case(json!({ "fields": [ { "inline": "yes" } ] }))]
    #[case(json!({ "author": "me" }))]
    fn test_from_value_type_mismatch(#[case] data: Value) {
        assert!(matches!(
            EmbedBuilder::from_value(&data),
            Err(EmbedError::TypeMismatch { .. })
        ));
    }
}

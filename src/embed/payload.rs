use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serenity::builder::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter};
use serenity::model::{Colour, Timestamp};

/// Finished embed, ready to hand to the message send API
///
/// # JSON Structure
///
/// Serializes to Discord's embed object. Unset optional fields are omitted.
///
/// ```json
/// {
///   "title": "Poll",
///   "color": 11259375,
///   "footer": { "text": "Ends soon", "icon_url": "attachment://clock.png" },
///   "fields": [ { "name": "A", "value": "1", "inline": true } ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Image or thumbnail reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedMedia {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl From<EmbedPayload> for CreateEmbed {
    fn from(payload: EmbedPayload) -> Self {
        let mut embed = CreateEmbed::new();

        if let Some(title) = payload.title {
            embed = embed.title(title);
        }
        if let Some(description) = payload.description {
            embed = embed.description(description);
        }
        if let Some(url) = payload.url {
            embed = embed.url(url);
        }
        if let Some(timestamp) = payload.timestamp {
            embed = embed.timestamp(Timestamp::from(timestamp));
        }
        if let Some(color) = payload.color {
            embed = embed.colour(Colour::new(color));
        }
        if let Some(footer) = payload.footer {
            let mut create = CreateEmbedFooter::new(footer.text);
            if let Some(icon_url) = footer.icon_url {
                create = create.icon_url(icon_url);
            }
            embed = embed.footer(create);
        }
        if let Some(image) = payload.image {
            embed = embed.image(image.url);
        }
        if let Some(thumbnail) = payload.thumbnail {
            embed = embed.thumbnail(thumbnail.url);
        }
        if let Some(author) = payload.author {
            let mut create = CreateEmbedAuthor::new(author.name);
            if let Some(url) = author.url {
                create = create.url(url);
            }
            if let Some(icon_url) = author.icon_url {
                create = create.icon_url(icon_url);
            }
            embed = embed.author(create);
        }

        embed.fields(
            payload
                .fields
                .into_iter()
                .map(|field| (field.name, field.value, field.inline)),
        )
    }
}

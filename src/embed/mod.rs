mod builder;
mod color;
mod error;
mod limits;
mod payload;

// Re-export public API
pub use builder::{EmbedBuilder, ZERO_WIDTH_SPACE};
pub use color::{COLOR_MAX, ColorInput, NamedColor, PALETTE, RANDOM, parse_hex, random_color};
pub use error::EmbedError;
pub use limits::{
    ATTACHMENT_SCHEME, AUTHOR_NAME_MAX, DESCRIPTION_MAX, FIELD_NAME_MAX, FIELD_VALUE_MAX,
    FIELDS_MAX, FOOTER_TEXT_MAX, TITLE_MAX,
};
pub use payload::{EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia, EmbedPayload};

/// Alternate name for [`EmbedBuilder`]
pub type RichEmbed = EmbedBuilder;

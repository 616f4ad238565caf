//! Embed colors: integer, hex string, or a random pick from a named palette

use rand::Rng;
use serde_json::Value;

use super::error::EmbedError;

/// Largest value a 24-bit RGB color can hold
pub const COLOR_MAX: u32 = 0xFF_FF_FF;

/// Sentinel string selecting a random palette color
pub const RANDOM: &str = "RANDOM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub value: u32,
}

const fn named(name: &'static str, value: u32) -> NamedColor {
    NamedColor { name, value }
}

/// Colors eligible for [`ColorInput::Random`], in a fixed order
pub const PALETTE: [NamedColor; 87] = [
    named("amaranth", 0xE52B50),
    named("amber", 0xFFBF00),
    named("amethyst", 0x9966CC),
    named("apricot", 0xFBCEB1),
    named("aquamarine", 0x7FFFD4),
    named("azure", 0x007FFF),
    named("baby blue", 0x89CFF0),
    named("beige", 0xF5F5DC),
    named("black", 0x000000),
    named("blue", 0x0000FF),
    named("blue-green", 0x0095B6),
    named("blue-violet", 0x8A2BE2),
    named("blush", 0xDE5D83),
    named("brick red", 0xCB4154),
    named("bronze", 0xCD7F32),
    named("brown", 0x964B00),
    named("burgundy", 0x800020),
    named("byzantium", 0x702963),
    named("carmine", 0x960018),
    named("cerise", 0xDE3163),
    named("cerulean", 0x007BA7),
    named("champagne", 0xF7E7CE),
    named("chartreuse", 0x7FFF00),
    named("chocolate", 0x7B3F00),
    named("cobalt blue", 0x0047AB),
    named("coffee", 0x6F4E37),
    named("copper", 0xB87333),
    named("coral", 0xFF7F50),
    named("crimson", 0xDC143C),
    named("cyan", 0x00FFFF),
    named("desert sand", 0xEDC9AF),
    named("electric blue", 0x7DF9FF),
    named("emerald", 0x50C878),
    named("erin", 0x00FF3F),
    named("gold", 0xFFD700),
    named("gray", 0x808080),
    named("green", 0x008000),
    named("harlequin", 0x3FFF00),
    named("indigo", 0x4B0082),
    named("ivory", 0xFFFFF0),
    named("jade", 0x00A86B),
    named("jungle green", 0x29AB87),
    named("lavender", 0xB57EDC),
    named("lemon", 0xFFF700),
    named("lilac", 0xC8A2C8),
    named("lime", 0xBFFF00),
    named("magenta", 0xFF00FF),
    named("magenta rose", 0xFF00AF),
    named("maroon", 0x800000),
    named("mauve", 0xE0B0FF),
    named("navy blue", 0x000080),
    named("ochre", 0xCC7722),
    named("olive", 0x808000),
    named("orange", 0xFF6600),
    named("orange-red", 0xFF4500),
    named("orchid", 0xDA70D6),
    named("peach", 0xFFE5B4),
    named("pear", 0xD1E231),
    named("periwinkle", 0xCCCCFF),
    named("persian blue", 0x1C39BB),
    named("pink", 0xFD6C9E),
    named("plum", 0x8E4585),
    named("prussian blue", 0x003153),
    named("puce", 0xCC8899),
    named("purple", 0x800080),
    named("raspberry", 0xE30B5C),
    named("red", 0xFF0000),
    named("red-violet", 0xC71585),
    named("rose", 0xFF007F),
    named("ruby", 0xE0115F),
    named("salmon", 0xFA8072),
    named("sangria", 0x92000A),
    named("sapphire", 0x0F52BA),
    named("scarlet", 0xFF2400),
    named("silver", 0xC0C0C0),
    named("slate gray", 0x708090),
    named("spring bud", 0xA7FC00),
    named("spring green", 0x00FF7F),
    named("tan", 0xD2B48C),
    named("taupe", 0x483C32),
    named("teal", 0x008080),
    named("turquoise", 0x40E0D0),
    named("ultramarine", 0x3F00FF),
    named("violet", 0x7F00FF),
    named("viridian", 0x40826D),
    named("white", 0xFFFFFF),
    named("yellow", 0xFFFF00),
];

/// Pick a palette color uniformly at random
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> NamedColor {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}

/// Argument accepted by [`EmbedBuilder::set_color`](super::EmbedBuilder::set_color)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorInput {
    /// Raw RGB integer, must lie in `0..=0xFFFFFF`
    Int(i64),
    /// `#RRGGBB` or `RRGGBB`
    Hex(String),
    /// Uniform pick from [`PALETTE`]
    #[default]
    Random,
}

impl ColorInput {
    /// Resolve to an RGB integer, drawing from `rng` for [`ColorInput::Random`]
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<u32, EmbedError> {
        match self {
            ColorInput::Int(value) => u32::try_from(*value)
                .ok()
                .filter(|v| *v <= COLOR_MAX)
                .ok_or(EmbedError::RangeViolation {
                    what: "Embed colors",
                    limit: COLOR_MAX as u64,
                    actual: value.unsigned_abs(),
                }),
            ColorInput::Hex(hex) => parse_hex(hex),
            ColorInput::Random => Ok(random_color(rng).value),
        }
    }
}

/// Parse `#RRGGBB` or `RRGGBB` (either case) into an RGB integer
pub fn parse_hex(input: &str) -> Result<u32, EmbedError> {
    let digits = input.strip_prefix('#').unwrap_or(input);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EmbedError::FormatViolation {
            what: "Embed color",
            value: input.to_string(),
        });
    }

    u32::from_str_radix(digits, 16).map_err(|_| EmbedError::FormatViolation {
        what: "Embed color",
        value: input.to_string(),
    })
}

impl From<u32> for ColorInput {
    fn from(value: u32) -> Self {
        ColorInput::Int(value.into())
    }
}

impl From<i64> for ColorInput {
    fn from(value: i64) -> Self {
        ColorInput::Int(value)
    }
}

impl From<i32> for ColorInput {
    fn from(value: i32) -> Self {
        ColorInput::Int(value.into())
    }
}

impl From<&str> for ColorInput {
    fn from(value: &str) -> Self {
        if value == RANDOM {
            ColorInput::Random
        } else {
            ColorInput::Hex(value.to_string())
        }
    }
}

impl From<String> for ColorInput {
    fn from(value: String) -> Self {
        ColorInput::from(value.as_str())
    }
}

impl TryFrom<&Value> for ColorInput {
    type Error = EmbedError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(ColorInput::from(s.as_str())),
            Value::Number(n) => match n.as_i64() {
                Some(int) => Ok(ColorInput::Int(int)),
                // Fractional or beyond i64
                None => Err(EmbedError::FormatViolation {
                    what: "Embed color",
                    value: n.to_string(),
                }),
            },
            other => Err(EmbedError::type_mismatch("string' or 'number", other)),
        }
    }
}

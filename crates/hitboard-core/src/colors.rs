// Team color lookup: static primary/secondary pairs keyed by club name.
//
// The palette is built once at start-up (optionally with config overrides)
// and then passed by reference to whoever needs colors. Lookups never fail:
// unknown names resolve to the reserved default entry.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Color types
// ---------------------------------------------------------------------------

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn hex(packed: u32) -> Self {
        Rgb {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) string.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError {
                input: s.to_string(),
            });
        }
        let packed = u32::from_str_radix(digits, 16).map_err(|_| ColorParseError {
            input: s.to_string(),
        })?;
        Ok(Rgb::hex(packed))
    }

    /// Fully opaque RGBA version of this color.
    pub const fn opaque(self) -> Rgba {
        Rgba {
            rgb: self,
            alpha: 1.0,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: expected #RRGGBB")]
pub struct ColorParseError {
    pub input: String,
}

/// An RGB color with an opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    /// Same hue with a different opacity.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Rgba {
            rgb: self.rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Blend this color over an opaque background.
    ///
    /// Terminals have no alpha channel, so translucent bars are drawn as the
    /// composited color.
    pub fn composite_over(self, background: Rgb) -> Rgb {
        let a = self.alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * a + bg as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.rgb.r, background.r),
            g: mix(self.rgb.g, background.g),
            b: mix(self.rgb.b, background.b),
        }
    }
}

// ---------------------------------------------------------------------------
// TeamColors
// ---------------------------------------------------------------------------

/// Primary (bar fill) and secondary (bar border) colors for one club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamColors {
    pub primary: Rgb,
    pub secondary: Rgb,
}

/// Reserved key for the entry used by unrecognized team names.
pub const DEFAULT_TEAM_KEY: &str = "default";

const DEFAULT_COLORS: TeamColors = TeamColors {
    primary: Rgb::hex(0x999999),
    secondary: Rgb::hex(0x666666),
};

/// Club colors by full display name as the stats API reports it.
const MLB_TEAM_COLORS: &[(&str, u32, u32)] = &[
    ("Arizona Diamondbacks", 0xA71930, 0xE3D4AD),
    ("Athletics", 0x003831, 0xEFB21E),
    ("Atlanta Braves", 0xCE1141, 0x13274F),
    ("Baltimore Orioles", 0xDF4601, 0x000000),
    ("Boston Red Sox", 0xBD3039, 0x0C2340),
    ("Chicago Cubs", 0x0E3386, 0xCC3433),
    ("Chicago White Sox", 0x27251F, 0xC4CED4),
    ("Cincinnati Reds", 0xC6011F, 0x000000),
    ("Cleveland Guardians", 0x00385D, 0xE50022),
    ("Colorado Rockies", 0x333366, 0xC4CED4),
    ("Detroit Tigers", 0x0C2340, 0xFA4616),
    ("Houston Astros", 0x002D62, 0xEB6E1F),
    ("Kansas City Royals", 0x004687, 0xBD9B60),
    ("Los Angeles Angels", 0xBA0021, 0x003263),
    ("Los Angeles Dodgers", 0x005A9C, 0xEF3E42),
    ("Miami Marlins", 0x00A3E0, 0xEF3340),
    ("Milwaukee Brewers", 0x12284B, 0xFFC52F),
    ("Minnesota Twins", 0x002B5C, 0xD31145),
    ("New York Mets", 0x002D72, 0xFF5910),
    ("New York Yankees", 0x003087, 0xC4CED3),
    ("Oakland Athletics", 0x003831, 0xEFB21E),
    ("Philadelphia Phillies", 0xE81828, 0x002D72),
    ("Pittsburgh Pirates", 0x27251F, 0xFDB827),
    ("San Diego Padres", 0x2F241D, 0xFFC425),
    ("San Francisco Giants", 0xFD5A1E, 0x27251F),
    ("Seattle Mariners", 0x0C2C56, 0x005C5C),
    ("St. Louis Cardinals", 0xC41E3A, 0x0C2340),
    ("Tampa Bay Rays", 0x092C5C, 0x8FBCE6),
    ("Texas Rangers", 0x003278, 0xC0111F),
    ("Toronto Blue Jays", 0x134A8E, 0x1D2D5C),
    ("Washington Nationals", 0xAB0003, 0x14225A),
];

// ---------------------------------------------------------------------------
// TeamPalette
// ---------------------------------------------------------------------------

/// Immutable team-name -> colors lookup.
#[derive(Debug, Clone)]
pub struct TeamPalette {
    entries: HashMap<String, TeamColors>,
    fallback: TeamColors,
}

impl Default for TeamPalette {
    fn default() -> Self {
        Self::mlb()
    }
}

impl TeamPalette {
    /// The built-in table of all major league clubs.
    pub fn mlb() -> Self {
        let entries = MLB_TEAM_COLORS
            .iter()
            .map(|&(name, primary, secondary)| {
                (
                    name.to_string(),
                    TeamColors {
                        primary: Rgb::hex(primary),
                        secondary: Rgb::hex(secondary),
                    },
                )
            })
            .collect();
        TeamPalette {
            entries,
            fallback: DEFAULT_COLORS,
        }
    }

    /// Apply additional or replacement entries. An override keyed by
    /// [`DEFAULT_TEAM_KEY`] replaces the fallback pair.
    pub fn with_overrides(mut self, overrides: &HashMap<String, TeamColors>) -> Self {
        for (name, colors) in overrides {
            if name == DEFAULT_TEAM_KEY {
                self.fallback = *colors;
            } else {
                self.entries.insert(name.clone(), *colors);
            }
        }
        self
    }

    /// Colors for a team. Unknown names get the fallback pair.
    pub fn colors_for(&self, team: &str) -> TeamColors {
        self.entries.get(team).copied().unwrap_or(self.fallback)
    }

    /// Whether the team has its own entry.
    pub fn is_known(&self, team: &str) -> bool {
        self.entries.contains_key(team)
    }

    /// The pair handed out for unrecognized teams.
    pub fn fallback(&self) -> TeamColors {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

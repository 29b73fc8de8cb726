use thiserror::Error;

use crate::color::{Color, ColorSet};

/// Atomic mana payment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManaSymbol {
    /// White mana {W}
    White,
    /// Blue mana {U}
    Blue,
    /// Black mana {B}
    Black,
    /// Red mana {R}
    Red,
    /// Green mana {G}
    Green,
    /// Colorless mana {C}
    Colorless,
    /// Generic mana {1}, {2}, etc.
    Generic(u32),
    /// Snow mana {S}
    Snow,
    /// Life payment for Phyrexian costs {W/P}
    Life(u8),
    /// Variable mana {X}, {Y}, {Z}
    X,
}

impl ManaSymbol {
    /// The color of a colored symbol, `None` for everything else.
    pub fn color(self) -> Option<Color> {
        match self {
            ManaSymbol::White => Some(Color::White),
            ManaSymbol::Blue => Some(Color::Blue),
            ManaSymbol::Black => Some(Color::Black),
            ManaSymbol::Red => Some(Color::Red),
            ManaSymbol::Green => Some(Color::Green),
            _ => None,
        }
    }

    fn parse(part: &str) -> Option<Self> {
        if let Some(color) = part.chars().next().and_then(Color::from_letter)
            && part.len() == 1
        {
            return Some(match color {
                Color::White => ManaSymbol::White,
                Color::Blue => ManaSymbol::Blue,
                Color::Black => ManaSymbol::Black,
                Color::Red => ManaSymbol::Red,
                Color::Green => ManaSymbol::Green,
            });
        }
        match part {
            "C" => Some(ManaSymbol::Colorless),
            "S" => Some(ManaSymbol::Snow),
            "P" => Some(ManaSymbol::Life(2)),
            "X" | "Y" | "Z" => Some(ManaSymbol::X),
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                digits.parse().ok().map(ManaSymbol::Generic)
            }
            _ => None,
        }
    }

    fn text(self) -> String {
        match self {
            ManaSymbol::Colorless => "C".to_string(),
            ManaSymbol::Generic(n) => n.to_string(),
            ManaSymbol::Snow => "S".to_string(),
            ManaSymbol::Life(_) => "P".to_string(),
            ManaSymbol::X => "X".to_string(),
            colored => colored
                .color()
                .map(|c| c.letter().to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManaCostError {
    #[error("unknown mana symbol '{{{0}}}' in mana cost")]
    UnknownSymbol(String),
    #[error("unbalanced braces in mana cost '{0}'")]
    Unbalanced(String),
    #[error("unexpected text '{0}' between mana symbols")]
    StrayText(String),
}

/// Represents a mana cost as a sequence of pips, where each pip is a list of
/// alternative payment options (disjunction).
///
/// Examples:
/// - `{2}{W}{W}` = `[[Generic(2)], [White], [White]]`
/// - `{W/U}` (hybrid) = `[[White, Blue]]`
/// - `{2/W}` (twobrid) = `[[Generic(2), White]]`
/// - `{W/P}` (phyrexian) = `[[White, Life(2)]]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManaCost {
    pips: Vec<Vec<ManaSymbol>>,
}

impl ManaCost {
    /// Creates an empty mana cost.
    pub fn new() -> Self {
        Self { pips: Vec::new() }
    }

    /// Parses an oracle-style cost such as `{2}{W/U}{G/P}`.
    ///
    /// Face separators (`{1}{U} // {3}{U}`) and whitespace between symbols
    /// are skipped, so the pips of every face end up in one cost.
    pub fn parse(text: &str) -> Result<Self, ManaCostError> {
        let mut pips = Vec::new();
        let mut rest = text;

        loop {
            rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
            if rest.is_empty() {
                break;
            }
            let Some(body) = rest.strip_prefix('{') else {
                let stray: String = rest.chars().take_while(|c| *c != '{').collect();
                return Err(ManaCostError::StrayText(stray));
            };
            let Some(end) = body.find('}') else {
                return Err(ManaCostError::Unbalanced(text.to_string()));
            };
            let symbol = &body[..end];
            if symbol.contains('{') {
                return Err(ManaCostError::Unbalanced(text.to_string()));
            }

            let pip = symbol
                .split('/')
                .map(|part| {
                    ManaSymbol::parse(part)
                        .ok_or_else(|| ManaCostError::UnknownSymbol(symbol.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            pips.push(pip);
            rest = &body[end + 1..];
        }

        Ok(Self { pips })
    }

    /// Returns the pips in this mana cost.
    pub fn pips(&self) -> &[Vec<ManaSymbol>] {
        &self.pips
    }

    /// Colors of pips that are exactly one colored symbol (`{W}`, `{U}`, ...).
    ///
    /// Hybrid and Phyrexian pips are not counted here; their colors reach a
    /// card's identity through its declared color identity.
    pub fn single_color_pips(&self) -> ColorSet {
        self.pips
            .iter()
            .filter_map(|pip| match pip.as_slice() {
                [symbol] => symbol.color(),
                _ => None,
            })
            .collect()
    }

    /// Format the mana cost in oracle-style syntax (e.g., "{2}{W}{W}").
    pub fn to_oracle(&self) -> String {
        let mut out = String::new();
        for pip in &self.pips {
            let parts: Vec<String> = pip.iter().map(|s| s.text()).collect();
            out.push('{');
            out.push_str(&parts.join("/"));
            out.push('}');
        }
        out
    }

    /// Returns true if this mana cost is empty (costs nothing).
    pub fn is_empty(&self) -> bool {
        self.pips.is_empty()
    }
}

impl std::str::FromStr for ManaCost {
    type Err = ManaCostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serialization")]
impl serde::Serialize for ManaCost {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_oracle())
    }
}

#[cfg(feature = "serialization")]
impl<'de> serde::Deserialize<'de> for ManaCost {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

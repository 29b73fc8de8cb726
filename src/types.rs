use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Supertype {
    Basic,
    Legendary,
    Snow,
    World,
}

impl Supertype {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "Basic" => Some(Supertype::Basic),
            "Legendary" => Some(Supertype::Legendary),
            "Snow" => Some(Supertype::Snow),
            "World" => Some(Supertype::World),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardType {
    Land,
    Creature,
    Artifact,
    Enchantment,
    Planeswalker,
    Instant,
    Sorcery,
    Battle,
    Kindred, // Formerly Tribal
}

impl CardType {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "Land" => Some(CardType::Land),
            "Creature" => Some(CardType::Creature),
            "Artifact" => Some(CardType::Artifact),
            "Enchantment" => Some(CardType::Enchantment),
            "Planeswalker" => Some(CardType::Planeswalker),
            "Instant" => Some(CardType::Instant),
            "Sorcery" => Some(CardType::Sorcery),
            "Battle" => Some(CardType::Battle),
            "Kindred" | "Tribal" => Some(CardType::Kindred),
            _ => None,
        }
    }
}

/// One face of a type line: `Legendary Creature — Human Wizard`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeLineFace {
    pub supertypes: Vec<Supertype>,
    pub card_types: Vec<CardType>,
    /// Subtypes are kept as printed; the corpus introduces new ones every set.
    pub subtypes: Vec<String>,
}

impl TypeLineFace {
    fn parse(face: &str) -> Self {
        let (types, subtypes) = match face.split_once('—') {
            Some((left, right)) => (left, Some(right)),
            None => match face.split_once(" - ") {
                Some((left, right)) => (left, Some(right)),
                None => (face, None),
            },
        };

        let mut parsed = TypeLineFace::default();
        for word in types.split_whitespace() {
            if let Some(supertype) = Supertype::parse(word) {
                parsed.supertypes.push(supertype);
            } else if let Some(card_type) = CardType::parse(word) {
                parsed.card_types.push(card_type);
            }
        }
        if let Some(subtypes) = subtypes {
            parsed.subtypes = subtypes.split_whitespace().map(str::to_string).collect();
        }
        parsed
    }
}

/// A parsed type line. The printed text is kept alongside the parsed faces.
///
/// Queries answer across every face of a multi-face card, so
/// `Legendary Enchantment // Legendary Creature` has both Enchantment and
/// Creature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeLine {
    text: String,
    faces: Vec<TypeLineFace>,
}

impl TypeLine {
    /// Parses a free-text type line. Never fails; unknown words are ignored.
    pub fn parse(text: &str) -> Self {
        let faces = text
            .split("//")
            .map(str::trim)
            .filter(|face| !face.is_empty())
            .map(TypeLineFace::parse)
            .collect();
        Self {
            text: text.trim().to_string(),
            faces,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn faces(&self) -> &[TypeLineFace] {
        &self.faces
    }

    pub fn has_supertype(&self, supertype: Supertype) -> bool {
        self.faces.iter().any(|f| f.supertypes.contains(&supertype))
    }

    pub fn has_card_type(&self, card_type: CardType) -> bool {
        self.faces.iter().any(|f| f.card_types.contains(&card_type))
    }

    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.faces
            .iter()
            .any(|f| f.subtypes.iter().any(|s| s == subtype))
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl From<&str> for TypeLine {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for TypeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(feature = "serialization")]
impl serde::Serialize for TypeLine {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serialization")]
impl<'de> serde::Deserialize<'de> for TypeLine {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}

//! Plain-text decklist import.
//!
//! Accepts the loose formats deck sites export: section headers, `N`/`Nx`
//! quantity prefixes, `SB:` markers, set and collector suffixes. Names are
//! left unresolved; [`ParsedDecklist::resolve`] matches them against a
//! corpus.

use thiserror::Error;

use crate::corpus::CardCorpus;
use crate::deck::{DeckEntry, DeckRole};

/// Longest accepted import, in characters.
pub const MAX_IMPORT_CHARS: usize = 6000;

/// Most non-blank lines an import may have.
pub const MAX_IMPORT_LINES: usize = 110;

const TYPE_GROUP_HEADERS: &[&str] = &[
    "creatures",
    "instants",
    "sorceries",
    "enchantments",
    "artifacts",
    "planeswalkers",
    "lands",
    "land",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Deck list is empty.")]
    Empty,
    #[error("Deck list too long.")]
    TooLong,
    #[error("Deck list contains unsupported characters.")]
    UnsupportedCharacters,
    #[error("Deck import limited to {MAX_IMPORT_LINES} cards.")]
    TooManyLines,
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(
            c,
            ':' | '\'' | '"' | '(' | ')' | ',' | '.' | '-' | '!' | '/' | '\\' | '&'
        )
}

/// Screens raw user input before parsing. Returns the trimmed, non-blank lines.
pub fn screen_import(raw: &str) -> Result<Vec<String>, ImportError> {
    let normalized = raw.replace("\r\n", "\n");
    let normalized = normalized.trim();

    if normalized.is_empty() {
        return Err(ImportError::Empty);
    }
    if normalized.chars().count() > MAX_IMPORT_CHARS {
        return Err(ImportError::TooLong);
    }
    if !normalized.chars().all(is_allowed_char) {
        return Err(ImportError::UnsupportedCharacters);
    }

    let lines: Vec<String> = normalized
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if lines.len() > MAX_IMPORT_LINES {
        return Err(ImportError::TooManyLines);
    }
    Ok(lines)
}

/// One card line of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedEntry {
    pub quantity: u32,
    pub card_name: String,
    pub role: DeckRole,
    pub raw_line: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing was left once quantities and suffixes were stripped.
    EmptyAfterClean,
    /// The cleaned name turned out to be a section header.
    HeaderLike,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDecklist {
    pub entries: Vec<ImportedEntry>,
    pub skipped: Vec<SkippedLine>,
}

/// What a header line means for the lines after it.
enum Header {
    Role(DeckRole),
    Comment,
}

fn header_kind(line: &str) -> Option<Header> {
    let raw = line.trim().to_lowercase();
    if raw.is_empty() || raw.starts_with('#') || raw.starts_with("//") || raw.starts_with("==") {
        return Some(Header::Comment);
    }

    let word = strip_counts(raw.trim_end_matches(':'));
    match word.as_str() {
        "commander" | "commanders" => Some(Header::Role(DeckRole::Commander)),
        "sideboard" | "companions" => Some(Header::Role(DeckRole::Sideboard)),
        "deck" | "main" | "mainboard" | "maybeboard" | "considering" => {
            Some(Header::Role(DeckRole::Mainboard))
        }
        w if TYPE_GROUP_HEADERS.contains(&w) => Some(Header::Role(DeckRole::Mainboard)),
        _ => None,
    }
}

/// Removes `(N)` count groups: `Creatures (30)` becomes `creatures`.
fn strip_counts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        match after.find(')') {
            Some(close)
                if close > 0 && after[..close].bytes().all(|b| b.is_ascii_digit()) =>
            {
                out.push_str(&rest[..open]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out.trim().trim_end_matches(':').trim().to_string()
}

/// Splits a `SB:`/`MB:` style marker off the front of a line.
fn role_prefix(line: &str) -> Option<(DeckRole, &str)> {
    let (marker, rest) = line.split_once(':')?;
    let role = match marker.trim().to_ascii_lowercase().as_str() {
        "sb" | "sideboard" => DeckRole::Sideboard,
        "mb" | "maybeboard" => DeckRole::Mainboard,
        _ => return None,
    };
    Some((role, rest.trim_start()))
}

/// Splits `2 Sol Ring` / `2x Sol Ring` into quantity and name.
fn split_quantity(line: &str) -> (Option<u32>, &str) {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return (None, line);
    }
    let (digits, rest) = line.split_at(digits_end);
    // Only overflow can fail here; an absurd count stays absurd.
    let quantity = Some(digits.parse::<u32>().unwrap_or(u32::MAX));

    let trimmed = rest.trim_start();
    let mut chars = trimmed.chars();
    if matches!(chars.next(), Some('x' | 'X'))
        && chars.next().is_some_and(char::is_whitespace)
    {
        let name = trimmed[1..].trim_start();
        if !name.is_empty() {
            return (quantity, name);
        }
    }
    if rest.starts_with(char::is_whitespace) && !trimmed.is_empty() {
        return (quantity, trimmed);
    }
    (None, line)
}

/// Strips a trailing run of ASCII digits, returning the remainder if any
/// digits were removed.
fn strip_trailing_number(text: &str) -> Option<&str> {
    let stripped = text.trim_end_matches(|c: char| c.is_ascii_digit());
    (stripped.len() < text.len()).then_some(stripped)
}

fn clean_card_name(name: &str) -> String {
    let mut name = name.trim();

    if let Some((front, _)) = name.split_once("//") {
        name = front.trim();
    }
    if let Some((_, rest)) = role_prefix(name) {
        name = rest.trim();
    }

    // Set code and collector number: "Sol Ring (C21) 263".
    if let Some(before) = strip_trailing_number(name.trim_end()) {
        let before = before.trim_end();
        if let Some(inner) = before.strip_suffix(')')
            && let Some(open) = inner.rfind('(')
        {
            let code = &inner[open + 1..];
            if !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric()) {
                name = inner[..open].trim_end();
            }
        }
    }

    // Bare trailing number: "Sol Ring 263".
    if let Some(before) = strip_trailing_number(name.trim_end())
        && before.ends_with(char::is_whitespace)
    {
        name = before.trim_end();
    }

    name.trim_matches('"').trim().to_string()
}

/// Parses decklist text into entries. Lines are read top to bottom; headers
/// and `SB:`/`MB:` markers switch the role for the lines that follow.
pub fn parse_decklist(text: &str) -> ParsedDecklist {
    let mut parsed = ParsedDecklist::default();
    let mut role = DeckRole::Mainboard;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match header_kind(line) {
            Some(Header::Role(next)) => {
                role = next;
                continue;
            }
            Some(Header::Comment) => continue,
            None => {}
        }

        let mut body = line
            .strip_prefix(['-', '*'])
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .map(str::trim_start)
            .unwrap_or(line);
        if let Some((next, rest)) = role_prefix(body) {
            role = next;
            body = rest;
        }

        let (quantity, name_part) = split_quantity(body);
        let card_name = clean_card_name(name_part);

        if card_name.is_empty() {
            parsed.skipped.push(SkippedLine {
                line: line.to_string(),
                reason: SkipReason::EmptyAfterClean,
            });
            continue;
        }
        if header_kind(&card_name).is_some() {
            parsed.skipped.push(SkippedLine {
                line: line.to_string(),
                reason: SkipReason::HeaderLike,
            });
            continue;
        }

        parsed.entries.push(ImportedEntry {
            quantity: quantity.filter(|q| *q > 0).unwrap_or(1),
            card_name,
            role,
            raw_line: line.to_string(),
        });
    }

    parsed
}

impl ParsedDecklist {
    /// Matches entry names against the corpus by case-insensitive name.
    ///
    /// Returns the deck entries for every name found, and the names that
    /// were not.
    pub fn resolve(&self, corpus: &CardCorpus) -> (Vec<DeckEntry>, Vec<String>) {
        let mut entries = Vec::with_capacity(self.entries.len());
        let mut missing = Vec::new();
        for entry in &self.entries {
            match corpus.find_by_name(&entry.card_name) {
                Some(card) => entries.push(DeckEntry::new(card.id.clone(), entry.role, entry.quantity)),
                None => missing.push(entry.card_name.clone()),
            }
        }
        (entries, missing)
    }
}

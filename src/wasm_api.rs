//! WASM-facing API for browser integration.
//!
//! Wraps a [`DeckValidator`] and a [`CardCorpus`] so the deck builder can
//! check a deck before submitting it.

use wasm_bindgen::prelude::*;

use crate::card::Card;
use crate::corpus::CardCorpus;
use crate::deck::DeckEntry;
use crate::identity::card_color_identity;
use crate::ids::CardId;
use crate::rules::CommanderRules;
use crate::validator::{DeckValidator, ValidationError, ValidationReport};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct WasmDeckValidator {
    corpus: CardCorpus,
    validator: DeckValidator,
}

#[wasm_bindgen]
impl WasmDeckValidator {
    /// Build a validator over `cards` (an array of card records). `rules`
    /// may be omitted for the built-in tables.
    #[wasm_bindgen(constructor)]
    pub fn new(cards: JsValue, rules: JsValue) -> Result<WasmDeckValidator, JsValue> {
        let cards: Vec<Card> = serde_wasm_bindgen::from_value(cards)
            .map_err(|e| JsValue::from_str(&format!("invalid cards payload: {e}")))?;
        let rules = if rules.is_undefined() || rules.is_null() {
            CommanderRules::default()
        } else {
            serde_wasm_bindgen::from_value(rules)
                .map_err(|e| JsValue::from_str(&format!("invalid rules payload: {e}")))?
        };
        let validator =
            DeckValidator::new(rules).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            corpus: cards.into_iter().collect(),
            validator,
        })
    }

    #[wasm_bindgen(js_name = cardCount)]
    pub fn card_count(&self) -> usize {
        self.corpus.len()
    }

    /// Validate a list of `{ card, role, quantity }` entries.
    ///
    /// Returns `{ valid, reason?, kind? }`. Unknown card ids are an error,
    /// not an illegal deck.
    #[wasm_bindgen(js_name = validate)]
    pub fn validate(&self, entries: JsValue) -> Result<JsValue, JsValue> {
        let entries: Vec<DeckEntry> = serde_wasm_bindgen::from_value(entries)
            .map_err(|e| JsValue::from_str(&format!("invalid entries payload: {e}")))?;
        let result = match self.validator.validate_deck(&entries, &self.corpus) {
            Ok(()) => Ok(()),
            Err(ValidationError::Violation(violation)) => Err(violation),
            Err(ValidationError::Input(err)) => return Err(JsValue::from_str(&err.to_string())),
        };
        serde_wasm_bindgen::to_value(&ValidationReport::from(&result))
            .map_err(|e| JsValue::from_str(&format!("report encode failed: {e}")))
    }

    /// Color identity of one card as WUBRG letters ("C" when colorless).
    #[wasm_bindgen(js_name = cardIdentity)]
    pub fn card_identity(&self, card_id: &str) -> Result<String, JsValue> {
        let card = self
            .corpus
            .get(&CardId::from(card_id))
            .ok_or_else(|| JsValue::from_str(&format!("unknown card id: {card_id}")))?;
        Ok(card_color_identity(card).to_string())
    }
}

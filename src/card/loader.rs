//! Card loading from CSV files and command-line specs
//!
//! CSV layout: `name,principal,apr_percent` with a header row.

use std::io::Read;
use std::path::Path;

use log::debug;

use super::{default_card_name, CardInput};
use crate::error::ProjectionError;

/// Load cards from a CSV file
pub fn load_cards<P: AsRef<Path>>(path: P) -> Result<Vec<CardInput>, ProjectionError> {
    let path = path.as_ref();
    debug!("Loading cards from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_cards_from_reader(file)
}

/// Load cards from any CSV reader
pub fn load_cards_from_reader<R: Read>(reader: R) -> Result<Vec<CardInput>, ProjectionError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cards = Vec::new();
    for result in rdr.deserialize() {
        let mut card: CardInput = result?;
        if card.name.is_empty() {
            card.name = default_card_name(cards.len());
        }
        card.validate()?;
        cards.push(card);
    }

    debug!("Loaded {} cards", cards.len());
    Ok(cards)
}

/// Parse a `NAME:PRINCIPAL:APR` spec, e.g. `Visa:1500:22.9`.
/// The name may itself contain colons; the last two fields are numeric.
pub fn parse_card_spec(spec: &str, index: usize) -> Result<CardInput, ProjectionError> {
    let invalid = || ProjectionError::InvalidCardSpec(spec.to_string());

    let mut parts = spec.rsplitn(3, ':');
    let apr = parts.next().ok_or_else(invalid)?;
    let principal = parts.next().ok_or_else(invalid)?;
    let name = parts.next().ok_or_else(invalid)?.trim();

    let principal: f64 = principal.trim().parse().map_err(|_| invalid())?;
    let apr_percent: f64 = apr.trim().parse().map_err(|_| invalid())?;

    let name = if name.is_empty() {
        default_card_name(index)
    } else {
        name.to_string()
    };

    let card = CardInput::new(name, principal, apr_percent);
    card.validate()?;
    Ok(card)
}

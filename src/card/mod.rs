//! Card data structures and card loading

mod data;
pub mod loader;

pub use data::{CardInput, DebtEntity, EntityId, default_card_name};
pub use loader::{load_cards, load_cards_from_reader, parse_card_spec};

/// Default starting balance offered for a new card ($)
pub const DEFAULT_PRINCIPAL: f64 = 1000.0;

/// Default APR offered for a new card (percent)
pub const DEFAULT_APR_PERCENT: f64 = 20.0;

/// Maximum number of cards in one simulation
pub const MAX_CARDS: usize = 10;

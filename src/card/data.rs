use serde::{Deserialize, Serialize};

use super::{DEFAULT_APR_PERCENT, DEFAULT_PRINCIPAL};
use crate::error::ProjectionError;

/// Position of a card in the input list.
///
/// Card names are display labels and may repeat, so identity within a run is
/// the input index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub usize);

/// Label given to the card at `index` when the user leaves the name blank
pub fn default_card_name(index: usize) -> String {
    format!("Card {}", index + 1)
}

/// A card as entered by the user, APR in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInput {
    #[serde(default)]
    pub name: String,

    /// Current unpaid balance ($)
    #[serde(default = "default_principal")]
    pub principal: f64,

    /// Annual percentage rate, e.g. 20.0 for 20%
    #[serde(default = "default_apr_percent")]
    pub apr_percent: f64,
}

fn default_principal() -> f64 { DEFAULT_PRINCIPAL }
fn default_apr_percent() -> f64 { DEFAULT_APR_PERCENT }

impl CardInput {
    pub fn new(name: impl Into<String>, principal: f64, apr_percent: f64) -> Self {
        Self {
            name: name.into(),
            principal,
            apr_percent,
        }
    }

    /// Default card for the given input position
    pub fn default_at(index: usize) -> Self {
        Self::new(default_card_name(index), DEFAULT_PRINCIPAL, DEFAULT_APR_PERCENT)
    }

    /// Reject negative or non-finite balance and APR
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(ProjectionError::invalid("principal", self.principal));
        }
        if !self.apr_percent.is_finite() || self.apr_percent < 0.0 {
            return Err(ProjectionError::invalid("apr_percent", self.apr_percent));
        }
        Ok(())
    }

    /// Convert to a projection entity, turning the APR percent into a fraction.
    /// A blank name falls back to `default_card_name(index)`.
    pub fn to_entity(&self, index: usize) -> Result<DebtEntity, ProjectionError> {
        self.validate()?;
        let name = if self.name.trim().is_empty() {
            default_card_name(index)
        } else {
            self.name.clone()
        };
        DebtEntity::new(EntityId(index), name, self.principal, self.apr_percent / 100.0)
    }
}

/// One debt in a projection run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtEntity {
    pub id: EntityId,
    pub name: String,
    /// Initial unpaid balance
    pub principal: f64,
    /// Annual rate as a fraction (0.20 = 20%)
    pub annual_rate: f64,
}

impl DebtEntity {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        principal: f64,
        annual_rate: f64,
    ) -> Result<Self, ProjectionError> {
        if !principal.is_finite() || principal < 0.0 {
            return Err(ProjectionError::invalid("principal", principal));
        }
        if !annual_rate.is_finite() || annual_rate < 0.0 {
            return Err(ProjectionError::invalid("annual_rate", annual_rate));
        }
        Ok(Self {
            id,
            name: name.into(),
            principal,
            annual_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_apr_percent_to_fraction() {
        let card = CardInput::new("Visa", 1500.0, 22.9);
        let entity = card.to_entity(0).unwrap();

        assert_eq!(entity.id, EntityId(0));
        assert_eq!(entity.name, "Visa");
        assert_relative_eq!(entity.annual_rate, 0.229, epsilon = 1e-12);
        assert_eq!(entity.principal, 1500.0);
    }

    #[test]
    fn test_blank_name_uses_position() {
        let card = CardInput::new("  ", 100.0, 10.0);
        let entity = card.to_entity(3).unwrap();
        assert_eq!(entity.name, "Card 4");
    }

    #[test]
    fn test_default_card() {
        let card = CardInput::default_at(0);
        assert_eq!(card.name, "Card 1");
        assert_eq!(card.principal, 1000.0);
        assert_eq!(card.apr_percent, 20.0);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(matches!(
            CardInput::new("A", -1.0, 20.0).validate(),
            Err(ProjectionError::InvalidRange { field: "principal", .. })
        ));
        assert!(matches!(
            CardInput::new("A", 1.0, -0.5).validate(),
            Err(ProjectionError::InvalidRange { field: "apr_percent", .. })
        ));
        assert!(CardInput::new("A", f64::NAN, 1.0).validate().is_err());
        assert!(DebtEntity::new(EntityId(0), "A", 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let card: CardInput = serde_json::from_str(r#"{"name": "Amex"}"#).unwrap();
        assert_eq!(card.principal, 1000.0);
        assert_eq!(card.apr_percent, 20.0);
    }
}

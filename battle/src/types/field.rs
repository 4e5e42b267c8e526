//! Global field state

use super::conditions::{Terrain, Weather};

/// Global field state affecting both sides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldConditions {
    /// Current weather condition
    pub weather: Option<Weather>,

    /// Current terrain
    pub terrain: Option<Terrain>,

    /// Speed order inverted (slower combatants act first)
    pub speed_inverted: bool,

    /// Turn counter (0 = battle not yet advanced)
    pub turn: u32,
}

impl FieldConditions {
    /// Create a new empty field state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all field conditions, keeping the turn counter
    pub fn clear(&mut self) {
        let turn = self.turn;
        *self = Self::default();
        self.turn = turn;
    }

    /// Check if any field condition is active
    pub fn has_any_condition(&self) -> bool {
        self.weather.is_some() || self.terrain.is_some() || self.speed_inverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_empty() {
        let field = FieldConditions::new();
        assert!(field.weather.is_none());
        assert!(field.terrain.is_none());
        assert!(!field.speed_inverted);
        assert_eq!(field.turn, 0);
        assert!(!field.has_any_condition());
    }

    #[test]
    fn test_has_any_condition() {
        let mut field = FieldConditions::new();
        assert!(!field.has_any_condition());

        field.weather = Some(Weather::Rain);
        assert!(field.has_any_condition());

        field.weather = None;
        field.speed_inverted = true;
        assert!(field.has_any_condition());
    }

    #[test]
    fn test_clear_keeps_turn() {
        let mut field = FieldConditions {
            weather: Some(Weather::Sun),
            terrain: Some(Terrain::Grassy),
            speed_inverted: true,
            turn: 4,
        };

        field.clear();
        assert!(!field.has_any_condition());
        assert_eq!(field.turn, 4);
    }
}

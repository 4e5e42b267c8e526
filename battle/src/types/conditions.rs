//! Field and side conditions

/// Weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,
}

impl Weather {
    /// Parse from a condition token
    pub fn from_token(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "sunnyday" | "sun" => Some(Weather::Sun),
            "raindance" | "rain" => Some(Weather::Rain),
            "sandstorm" | "sand" => Some(Weather::Sand),
            "hail" => Some(Weather::Hail),
            "snow" => Some(Weather::Snow),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Hail => "Hail",
            Weather::Snow => "Snow",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terrain conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    /// Parse from a condition token
    pub fn from_token(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "electricterrain" | "electric" => Some(Terrain::Electric),
            "grassyterrain" | "grassy" => Some(Terrain::Grassy),
            "mistyterrain" | "misty" => Some(Terrain::Misty),
            "psychicterrain" | "psychic" => Some(Terrain::Psychic),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Misty => "Misty Terrain",
            Terrain::Psychic => "Psychic Terrain",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side conditions (hazards, screens, etc.)
///
/// Carried in the side data shape for forward compatibility; the baseline
/// effect pipeline does not yet consume them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideCondition {
    // Screens
    Reflect,
    LightScreen,
    AuroraVeil,

    // Entry hazards
    Spikes,      // Stackable 1-3
    ToxicSpikes, // Stackable 1-2
    StealthRock,
    StickyWeb,

    // Other
    Tailwind,
}

impl SideCondition {
    /// Parse from a condition token
    pub fn from_token(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "reflect" => Some(SideCondition::Reflect),
            "lightscreen" => Some(SideCondition::LightScreen),
            "auroraveil" => Some(SideCondition::AuroraVeil),
            "spikes" => Some(SideCondition::Spikes),
            "toxicspikes" => Some(SideCondition::ToxicSpikes),
            "stealthrock" => Some(SideCondition::StealthRock),
            "stickyweb" => Some(SideCondition::StickyWeb),
            "tailwind" => Some(SideCondition::Tailwind),
            _ => None,
        }
    }

    /// Check if this condition is stackable
    pub fn is_stackable(&self) -> bool {
        matches!(self, SideCondition::Spikes | SideCondition::ToxicSpikes)
    }

    /// Get maximum layers for this condition
    pub fn max_layers(&self) -> u8 {
        match self {
            SideCondition::Spikes => 3,
            SideCondition::ToxicSpikes => 2,
            _ => 1,
        }
    }

    /// Check if this is a screen
    pub fn is_screen(&self) -> bool {
        matches!(
            self,
            SideCondition::Reflect | SideCondition::LightScreen | SideCondition::AuroraVeil
        )
    }

    /// Check if this is an entry hazard
    pub fn is_hazard(&self) -> bool {
        matches!(
            self,
            SideCondition::Spikes
                | SideCondition::ToxicSpikes
                | SideCondition::StealthRock
                | SideCondition::StickyWeb
        )
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            SideCondition::Reflect => "Reflect",
            SideCondition::LightScreen => "Light Screen",
            SideCondition::AuroraVeil => "Aurora Veil",
            SideCondition::Spikes => "Spikes",
            SideCondition::ToxicSpikes => "Toxic Spikes",
            SideCondition::StealthRock => "Stealth Rock",
            SideCondition::StickyWeb => "Sticky Web",
            SideCondition::Tailwind => "Tailwind",
        }
    }
}

impl std::fmt::Display for SideCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State for a side condition (tracks layers for stackable conditions)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideConditionState {
    pub layers: u8,
}

impl SideConditionState {
    /// Create a new condition state with 1 layer
    pub fn new() -> Self {
        Self { layers: 1 }
    }

    /// Add a layer, returns true if successful
    pub fn add_layer(&mut self, condition: SideCondition) -> bool {
        if self.layers < condition.max_layers() {
            self.layers += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_from_token() {
        assert_eq!(Weather::from_token("SunnyDay"), Some(Weather::Sun));
        assert_eq!(Weather::from_token("rain"), Some(Weather::Rain));
        assert_eq!(Weather::from_token("Sandstorm"), Some(Weather::Sand));
        assert_eq!(Weather::from_token("nonsense"), None);
    }

    #[test]
    fn test_terrain_from_token() {
        assert_eq!(Terrain::from_token("Electric Terrain"), Some(Terrain::Electric));
        assert_eq!(Terrain::from_token("grassyterrain"), Some(Terrain::Grassy));
        assert_eq!(Terrain::from_token("fog"), None);
    }

    #[test]
    fn test_side_condition_from_token() {
        assert_eq!(
            SideCondition::from_token("Stealth Rock"),
            Some(SideCondition::StealthRock)
        );
        assert_eq!(
            SideCondition::from_token("light-screen"),
            Some(SideCondition::LightScreen)
        );
        assert_eq!(SideCondition::from_token("unknown"), None);
    }

    #[test]
    fn test_classification() {
        assert!(SideCondition::Reflect.is_screen());
        assert!(!SideCondition::Reflect.is_hazard());
        assert!(SideCondition::Spikes.is_hazard());
        assert!(SideCondition::Spikes.is_stackable());
        assert!(!SideCondition::StealthRock.is_stackable());
        assert!(!SideCondition::Tailwind.is_screen());
        assert!(!SideCondition::Tailwind.is_hazard());
    }

    #[test]
    fn test_layer_stacking() {
        let mut state = SideConditionState::new();
        assert_eq!(state.layers, 1);

        assert!(state.add_layer(SideCondition::Spikes));
        assert!(state.add_layer(SideCondition::Spikes));
        assert_eq!(state.layers, 3);
        assert!(!state.add_layer(SideCondition::Spikes)); // Max 3

        let mut rock = SideConditionState::new();
        assert!(!rock.add_layer(SideCondition::StealthRock)); // Max 1
    }
}

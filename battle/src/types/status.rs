//! Non-volatile status conditions

/// Non-volatile status condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusCondition {
    Burn,
    Paralysis,
    Poison,
    Toxic,
    Sleep,
    Freeze,
}

impl StatusCondition {
    /// Parse from a status token (brn, par, psn, tox, slp, frz)
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "brn" => Some(StatusCondition::Burn),
            "par" => Some(StatusCondition::Paralysis),
            "psn" => Some(StatusCondition::Poison),
            "tox" => Some(StatusCondition::Toxic),
            "slp" => Some(StatusCondition::Sleep),
            "frz" => Some(StatusCondition::Freeze),
            _ => None,
        }
    }

    /// Get the status token
    pub fn as_token(&self) -> &'static str {
        match self {
            StatusCondition::Burn => "brn",
            StatusCondition::Paralysis => "par",
            StatusCondition::Poison => "psn",
            StatusCondition::Toxic => "tox",
            StatusCondition::Sleep => "slp",
            StatusCondition::Freeze => "frz",
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCondition::Burn => "burned",
            StatusCondition::Paralysis => "paralyzed",
            StatusCondition::Poison => "poisoned",
            StatusCondition::Toxic => "badly poisoned",
            StatusCondition::Sleep => "asleep",
            StatusCondition::Freeze => "frozen",
        }
    }

    /// Speed multiplier this status applies (paralysis halves speed)
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            StatusCondition::Paralysis => 0.5,
            _ => 1.0,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionLabel {
    Infected,
    NotInfected,
}

impl PredictionLabel {
    /// Map a raw class index. Only 0 and 1 are meaningful.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(PredictionLabel::Infected),
            0 => Some(PredictionLabel::NotInfected),
            _ => None,
        }
    }

    pub fn as_class(self) -> u8 {
        match self {
            PredictionLabel::Infected => 1,
            PredictionLabel::NotInfected => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PredictionLabel::Infected => "infected",
            PredictionLabel::NotInfected => "not_infected",
        }
    }

    pub fn is_infected(self) -> bool {
        self == PredictionLabel::Infected
    }
}

impl std::fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionLabel::Infected => write!(f, "Infected"),
            PredictionLabel::NotInfected => write!(f, "Not Infected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_mapping() {
        assert_eq!(PredictionLabel::from_class(1), Some(PredictionLabel::Infected));
        assert_eq!(PredictionLabel::from_class(0), Some(PredictionLabel::NotInfected));
        assert_eq!(PredictionLabel::from_class(2), None);
        assert_eq!(PredictionLabel::Infected.as_class(), 1);
    }

    #[test]
    fn display_text() {
        assert_eq!(PredictionLabel::NotInfected.to_string(), "Not Infected");
        assert_eq!(PredictionLabel::Infected.to_string(), "Infected");
    }
}

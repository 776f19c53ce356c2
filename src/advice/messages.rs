/// Fixed text of one advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceText {
    pub title: &'static str,
    pub message: &'static str,
    pub source: &'static str,
}

const IMMEDIATE: &str = "Immediate Medical Attention";

pub const O2S_LOW: AdviceText = AdviceText {
    title: IMMEDIATE,
    message: "Oxygen saturation is below 95%. This is a sign of serious hypoxaemia.",
    source: "WHO",
};

pub const RR_HIGH: AdviceText = AdviceText {
    title: IMMEDIATE,
    message: "Breathing rate is above 24 breaths per minute. This is a sign of respiratory distress.",
    source: "Merck Manual",
};

pub const TEMP_EXTREME: AdviceText = AdviceText {
    title: IMMEDIATE,
    message: "Body temperature is above 40°C (hyperpyrexia).",
    source: "CDC",
};

pub const SBP_LOW: AdviceText = AdviceText {
    title: IMMEDIATE,
    message: "Systolic blood pressure is below 90 mmHg. This is a sign of shock.",
    source: "WHO",
};

pub const FEVER: AdviceText = AdviceText {
    title: "Consult a Doctor",
    message: "A fever above 38°C suggests an infection. Seeing a doctor is recommended.",
    source: "General Medical Guidance",
};

pub const CHRONIC_LUNG: AdviceText = AdviceText {
    title: "High Risk Factor",
    message: "A history of chronic lung disease increases the risk of complications.",
    source: "CDC",
};

pub const SELF_CARE: AdviceText = AdviceText {
    title: "Self-Care",
    message: "Positive prediction with mild signs. Rest and stay well hydrated.",
    source: "CDC",
};

pub const GENERAL_ADVICE: AdviceText = AdviceText {
    title: "General Advice",
    message: "Negative prediction. This may be a common cold. Get plenty of rest.",
    source: "CDC",
};

pub const VACCINATION: AdviceText = AdviceText {
    title: "Prevention",
    message: "Consider getting an annual flu vaccine.",
    source: "WHO",
};

/// Shown above every advice list.
pub const MEDICAL_DISCLAIMER: &str = "IMPORTANT: This prediction is not a medical diagnosis. \
     The application is predictive and educational only. For an accurate diagnosis and \
     treatment, please consult a doctor.";

/// Shown when no rule fired.
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No specific recommendations. Stay healthy!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn danger_texts_share_urgent_title() {
        for text in [O2S_LOW, RR_HIGH, TEMP_EXTREME, SBP_LOW] {
            assert_eq!(text.title, IMMEDIATE);
            assert!(!text.source.is_empty());
        }
    }

    #[test]
    fn disclaimer_points_to_a_doctor() {
        assert!(MEDICAL_DISCLAIMER.contains("not a medical diagnosis"));
        assert!(MEDICAL_DISCLAIMER.contains("consult a doctor"));
        assert!(!MEDICAL_DISCLAIMER.contains("  "));
    }
}

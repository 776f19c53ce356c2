use serde::{Deserialize, Serialize};

/// How a feature's raw form value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Real-valued vital sign (cm, kg, °C, bpm, %, /min, mmHg).
    Measurement,
    /// Non-negative whole number (season, week, days).
    Count,
    /// Yes/No answer encoded as 0/1.
    Flag,
}

/// One named column of the feature row.
///
/// The declaration order is the canonical column order used whenever a
/// classifier does not publish its own feature names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    HeightCm,
    WeightKg,
    TemperatureC,
    Pulse,
    OxygenSaturationPct,
    RespiratoryRate,
    SystolicBp,
    SeasonCode,
    WeekOfSeason,
    SymptomDurationDays,
    FluVaccinated,
    ExposedToSickPerson,
    RecentTravel,
    HasCough,
    HasCoughWithSputum,
    HasSoreThroat,
    HasRhinorrhea,
    HasSinusPain,
    HasMedicalHistory,
    HasChronicLungDisease,
}

impl FeatureField {
    pub const COUNT: usize = 20;

    pub const ALL: [FeatureField; Self::COUNT] = [
        FeatureField::HeightCm,
        FeatureField::WeightKg,
        FeatureField::TemperatureC,
        FeatureField::Pulse,
        FeatureField::OxygenSaturationPct,
        FeatureField::RespiratoryRate,
        FeatureField::SystolicBp,
        FeatureField::SeasonCode,
        FeatureField::WeekOfSeason,
        FeatureField::SymptomDurationDays,
        FeatureField::FluVaccinated,
        FeatureField::ExposedToSickPerson,
        FeatureField::RecentTravel,
        FeatureField::HasCough,
        FeatureField::HasCoughWithSputum,
        FeatureField::HasSoreThroat,
        FeatureField::HasRhinorrhea,
        FeatureField::HasSinusPain,
        FeatureField::HasMedicalHistory,
        FeatureField::HasChronicLungDisease,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureField::HeightCm => "height_cm",
            FeatureField::WeightKg => "weight_kg",
            FeatureField::TemperatureC => "temperature_c",
            FeatureField::Pulse => "pulse",
            FeatureField::OxygenSaturationPct => "oxygen_saturation_pct",
            FeatureField::RespiratoryRate => "respiratory_rate",
            FeatureField::SystolicBp => "systolic_bp",
            FeatureField::SeasonCode => "season_code",
            FeatureField::WeekOfSeason => "week_of_season",
            FeatureField::SymptomDurationDays => "symptom_duration_days",
            FeatureField::FluVaccinated => "flu_vaccinated",
            FeatureField::ExposedToSickPerson => "exposed_to_sick_person",
            FeatureField::RecentTravel => "recent_travel",
            FeatureField::HasCough => "has_cough",
            FeatureField::HasCoughWithSputum => "has_cough_with_sputum",
            FeatureField::HasSoreThroat => "has_sore_throat",
            FeatureField::HasRhinorrhea => "has_rhinorrhea",
            FeatureField::HasSinusPain => "has_sinus_pain",
            FeatureField::HasMedicalHistory => "has_medical_history",
            FeatureField::HasChronicLungDisease => "has_chronic_lung_disease",
        }
    }

    /// Legacy column names used by older form payloads and trained artifacts.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            FeatureField::HeightCm => &["heightcm", "height"],
            FeatureField::WeightKg => &["weightkg", "weight"],
            FeatureField::TemperatureC => &["as_edenroll_temp", "temp"],
            FeatureField::Pulse => &[],
            FeatureField::OxygenSaturationPct => &["o2s"],
            FeatureField::RespiratoryRate => &["rr"],
            FeatureField::SystolicBp => &["sbp"],
            FeatureField::SeasonCode => &["season"],
            FeatureField::WeekOfSeason => &["WOS", "wos"],
            FeatureField::SymptomDurationDays => &["cursympt_days", "symptom_days"],
            FeatureField::FluVaccinated => &["fluvaccine", "flu_vaccine"],
            FeatureField::ExposedToSickPerson => &["exposehuman", "expose_human"],
            FeatureField::RecentTravel => &["travel"],
            FeatureField::HasCough => &["cursympt_cough", "cough"],
            FeatureField::HasCoughWithSputum => &["cursympt_coughsputum", "cough_with_sputum"],
            FeatureField::HasSoreThroat => &["cursympt_sorethroat", "sore_throat"],
            FeatureField::HasRhinorrhea => &["cursympt_rhinorrhea", "rhinorrhea"],
            FeatureField::HasSinusPain => &["cursympt_sinuspain", "sinuspain"],
            FeatureField::HasMedicalHistory => &["medhistav"],
            FeatureField::HasChronicLungDisease => &["pastmedchronlundis"],
        }
    }

    /// Resolve a canonical name or any legacy alias.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == trimmed || f.aliases().contains(&trimmed))
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FeatureField::HeightCm
            | FeatureField::WeightKg
            | FeatureField::TemperatureC
            | FeatureField::Pulse
            | FeatureField::OxygenSaturationPct
            | FeatureField::RespiratoryRate
            | FeatureField::SystolicBp => FieldKind::Measurement,
            FeatureField::SeasonCode
            | FeatureField::WeekOfSeason
            | FeatureField::SymptomDurationDays => FieldKind::Count,
            _ => FieldKind::Flag,
        }
    }

    /// Value used when the field is absent or unusable.
    pub fn default_value(self) -> f64 {
        match self {
            // The intake form's season selector falls back to the first season.
            FeatureField::SeasonCode => 1.0,
            // Sentinel: first week of the year when no report date is known.
            FeatureField::WeekOfSeason => 1.0,
            _ => 0.0,
        }
    }
}

impl std::fmt::Display for FeatureField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully-populated patient feature row.
///
/// Built by the intake assembler; treated as read-only once handed to the
/// classifier and the advice engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub temperature_c: f64,
    pub pulse: f64,
    pub oxygen_saturation_pct: f64,
    pub respiratory_rate: f64,
    pub systolic_bp: f64,
    /// 1-4.
    pub season_code: u8,
    /// 1-indexed week of the report year.
    pub week_of_season: u32,
    pub symptom_duration_days: u32,
    pub flu_vaccinated: bool,
    pub exposed_to_sick_person: bool,
    pub recent_travel: bool,
    pub has_cough: bool,
    pub has_cough_with_sputum: bool,
    pub has_sore_throat: bool,
    pub has_rhinorrhea: bool,
    pub has_sinus_pain: bool,
    pub has_medical_history: bool,
    pub has_chronic_lung_disease: bool,
}

impl Default for FeatureRow {
    fn default() -> Self {
        Self {
            height_cm: 0.0,
            weight_kg: 0.0,
            temperature_c: 0.0,
            pulse: 0.0,
            oxygen_saturation_pct: 0.0,
            respiratory_rate: 0.0,
            systolic_bp: 0.0,
            season_code: 1,
            week_of_season: 1,
            symptom_duration_days: 0,
            flu_vaccinated: false,
            exposed_to_sick_person: false,
            recent_travel: false,
            has_cough: false,
            has_cough_with_sputum: false,
            has_sore_throat: false,
            has_rhinorrhea: false,
            has_sinus_pain: false,
            has_medical_history: false,
            has_chronic_lung_disease: false,
        }
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl FeatureRow {
    /// Numeric value of a single column (flags as 0/1).
    pub fn value(&self, field: FeatureField) -> f64 {
        match field {
            FeatureField::HeightCm => self.height_cm,
            FeatureField::WeightKg => self.weight_kg,
            FeatureField::TemperatureC => self.temperature_c,
            FeatureField::Pulse => self.pulse,
            FeatureField::OxygenSaturationPct => self.oxygen_saturation_pct,
            FeatureField::RespiratoryRate => self.respiratory_rate,
            FeatureField::SystolicBp => self.systolic_bp,
            FeatureField::SeasonCode => f64::from(self.season_code),
            FeatureField::WeekOfSeason => f64::from(self.week_of_season),
            FeatureField::SymptomDurationDays => f64::from(self.symptom_duration_days),
            FeatureField::FluVaccinated => flag(self.flu_vaccinated),
            FeatureField::ExposedToSickPerson => flag(self.exposed_to_sick_person),
            FeatureField::RecentTravel => flag(self.recent_travel),
            FeatureField::HasCough => flag(self.has_cough),
            FeatureField::HasCoughWithSputum => flag(self.has_cough_with_sputum),
            FeatureField::HasSoreThroat => flag(self.has_sore_throat),
            FeatureField::HasRhinorrhea => flag(self.has_rhinorrhea),
            FeatureField::HasSinusPain => flag(self.has_sinus_pain),
            FeatureField::HasMedicalHistory => flag(self.has_medical_history),
            FeatureField::HasChronicLungDisease => flag(self.has_chronic_lung_disease),
        }
    }

    /// Write a coerced value. Counts are truncated; flags are `value != 0`.
    pub(crate) fn set(&mut self, field: FeatureField, value: f64) {
        let count = |v: f64| v.max(0.0).trunc() as u32;
        let on = value != 0.0;
        match field {
            FeatureField::HeightCm => self.height_cm = value,
            FeatureField::WeightKg => self.weight_kg = value,
            FeatureField::TemperatureC => self.temperature_c = value,
            FeatureField::Pulse => self.pulse = value,
            FeatureField::OxygenSaturationPct => self.oxygen_saturation_pct = value,
            FeatureField::RespiratoryRate => self.respiratory_rate = value,
            FeatureField::SystolicBp => self.systolic_bp = value,
            FeatureField::SeasonCode => self.season_code = count(value).min(u32::from(u8::MAX)) as u8,
            FeatureField::WeekOfSeason => self.week_of_season = count(value),
            FeatureField::SymptomDurationDays => self.symptom_duration_days = count(value),
            FeatureField::FluVaccinated => self.flu_vaccinated = on,
            FeatureField::ExposedToSickPerson => self.exposed_to_sick_person = on,
            FeatureField::RecentTravel => self.recent_travel = on,
            FeatureField::HasCough => self.has_cough = on,
            FeatureField::HasCoughWithSputum => self.has_cough_with_sputum = on,
            FeatureField::HasSoreThroat => self.has_sore_throat = on,
            FeatureField::HasRhinorrhea => self.has_rhinorrhea = on,
            FeatureField::HasSinusPain => self.has_sinus_pain = on,
            FeatureField::HasMedicalHistory => self.has_medical_history = on,
            FeatureField::HasChronicLungDisease => self.has_chronic_lung_disease = on,
        }
    }

    /// All columns in canonical order.
    pub fn entries(&self) -> Vec<(FeatureField, f64)> {
        FeatureField::ALL
            .iter()
            .map(|&f| (f, self.value(f)))
            .collect()
    }

    /// Values laid out in the given column order.
    pub fn encode(&self, columns: &[FeatureField]) -> Vec<f64> {
        columns.iter().map(|&f| self.value(f)).collect()
    }

    pub fn field_names() -> Vec<String> {
        FeatureField::ALL.iter().map(|f| f.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_round_trips_through_its_name() {
        for field in FeatureField::ALL {
            assert_eq!(FeatureField::from_name(field.as_str()), Some(field));
        }
    }

    #[test]
    fn legacy_aliases_resolve() {
        assert_eq!(FeatureField::from_name("o2s"), Some(FeatureField::OxygenSaturationPct));
        assert_eq!(FeatureField::from_name("as_edenroll_temp"), Some(FeatureField::TemperatureC));
        assert_eq!(FeatureField::from_name("WOS"), Some(FeatureField::WeekOfSeason));
        assert_eq!(
            FeatureField::from_name("pastmedchronlundis"),
            Some(FeatureField::HasChronicLungDisease)
        );
        assert_eq!(FeatureField::from_name("cough_with_sputum"), Some(FeatureField::HasCoughWithSputum));
    }

    #[test]
    fn unknown_name_does_not_resolve() {
        assert_eq!(FeatureField::from_name("blood_type"), None);
        assert_eq!(FeatureField::from_name(""), None);
    }

    #[test]
    fn serde_name_matches_as_str() {
        for field in FeatureField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn row_values_follow_canonical_order() {
        let row = FeatureRow {
            temperature_c: 38.5,
            has_cough: true,
            ..FeatureRow::default()
        };
        let entries = row.entries();
        assert_eq!(entries.len(), FeatureField::COUNT);
        assert_eq!(entries[2], (FeatureField::TemperatureC, 38.5));
        assert_eq!(entries[13], (FeatureField::HasCough, 1.0));
    }

    #[test]
    fn encode_respects_requested_order() {
        let row = FeatureRow {
            pulse: 88.0,
            systolic_bp: 115.0,
            ..FeatureRow::default()
        };
        let encoded = row.encode(&[FeatureField::SystolicBp, FeatureField::Pulse]);
        assert_eq!(encoded, vec![115.0, 88.0]);
    }

    #[test]
    fn set_truncates_counts_and_normalises_flags() {
        let mut row = FeatureRow::default();
        row.set(FeatureField::SymptomDurationDays, 3.9);
        row.set(FeatureField::FluVaccinated, 1.0);
        row.set(FeatureField::SeasonCode, 4.0);
        assert_eq!(row.symptom_duration_days, 3);
        assert!(row.flu_vaccinated);
        assert_eq!(row.season_code, 4);
    }
}

//! Session contract between the form flow and the screening core.
//!
//! `SessionState` is an immutable value: each transition consumes the current
//! state and returns the next one. The core never keeps session state of its
//! own; the controller passes the current value in on every call.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::advice;
use crate::classifier::{ClassifierAdapter, ClassifierError, ModelCache};
use crate::intake::{assemble, CoercionNote, StageFields};
use crate::models::{AdvisoryRecord, FeatureRow, PredictionLabel};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Home,
    Vitals,
    Symptoms,
    Result,
    Detail,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Home => "home",
            Stage::Vitals => "vitals",
            Stage::Symptoms => "symptoms",
            Stage::Result => "result",
            Stage::Detail => "detail",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot {action} from the {} stage", .from.as_str())]
    InvalidTransition { from: Stage, action: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreeningError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// One user's pass through the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    session_id: Uuid,
    stage: Stage,
    vitals: StageFields,
    symptoms: StageFields,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Transitions
// ═══════════════════════════════════════════════════════════

impl SessionState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            stage: Stage::Home,
            vitals: StageFields::new(),
            symptoms: StageFields::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn vitals(&self) -> &StageFields {
        &self.vitals
    }

    pub fn symptoms(&self) -> &StageFields {
        &self.symptoms
    }

    fn require_stage(&self, stage: Stage, action: &'static str) -> Result<(), SessionError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.stage,
                action,
            })
        }
    }

    fn at(self, stage: Stage) -> Self {
        Self { stage, ..self }
    }

    pub fn start(self) -> Result<Self, SessionError> {
        self.require_stage(Stage::Home, "start the form")?;
        Ok(self.at(Stage::Vitals))
    }

    pub fn submit_vitals(self, vitals: StageFields) -> Result<Self, SessionError> {
        self.require_stage(Stage::Vitals, "submit vitals")?;
        Ok(Self {
            vitals,
            ..self.at(Stage::Symptoms)
        })
    }

    pub fn submit_symptoms(self, symptoms: StageFields) -> Result<Self, SessionError> {
        self.require_stage(Stage::Symptoms, "submit symptoms")?;
        Ok(Self {
            symptoms,
            ..self.at(Stage::Result)
        })
    }

    pub fn show_detail(self) -> Result<Self, SessionError> {
        self.require_stage(Stage::Result, "show advice")?;
        Ok(self.at(Stage::Detail))
    }

    pub fn back_to_result(self) -> Result<Self, SessionError> {
        self.require_stage(Stage::Detail, "go back to the result")?;
        Ok(self.at(Stage::Result))
    }

    /// Discard everything and begin a fresh session.
    pub fn restart(self) -> Self {
        tracing::debug!(session = %self.session_id, "Session restarted");
        Self::new()
    }

    fn has_both_stages(&self) -> bool {
        matches!(self.stage, Stage::Result | Stage::Detail)
    }
}

// ═══════════════════════════════════════════════════════════
// Screening pipeline
// ═══════════════════════════════════════════════════════════

/// A completed prediction. Advice can only be requested from here, so the
/// engine is never reached without a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub session_id: Uuid,
    pub row: FeatureRow,
    pub notes: Vec<CoercionNote>,
    pub label: PredictionLabel,
}

impl ScreeningOutcome {
    pub fn recommendations(&self) -> Vec<AdvisoryRecord> {
        advice::evaluate(&self.row, self.label)
    }
}

/// Assemble both stages, predict, and return the outcome.
pub fn run_screening(
    state: &SessionState,
    adapter: &ClassifierAdapter,
) -> Result<ScreeningOutcome, ScreeningError> {
    if !state.has_both_stages() {
        return Err(SessionError::InvalidTransition {
            from: state.stage,
            action: "run the screening",
        }
        .into());
    }

    let assembly = assemble(&state.vitals, &state.symptoms);
    if !assembly.is_clean() {
        tracing::info!(
            session = %state.session_id,
            defaulted = assembly.notes.len(),
            "Some form values were defaulted"
        );
    }

    let label = adapter.predict(&assembly.row)?;
    tracing::info!(session = %state.session_id, label = label.as_str(), "Screening complete");

    Ok(ScreeningOutcome {
        session_id: state.session_id,
        row: assembly.row,
        notes: assembly.notes,
        label,
    })
}

/// As [`run_screening`], resolving the classifier through the memoised cache.
pub fn run_screening_cached(
    state: &SessionState,
    cache: &ModelCache,
) -> Result<ScreeningOutcome, ScreeningError> {
    let adapter = cache.get()?;
    run_screening(state, &adapter)
}

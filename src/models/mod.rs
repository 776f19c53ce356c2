pub mod advisory;
pub mod feature;
pub mod prediction;

pub use advisory::{AdvisoryRecord, Severity};
pub use feature::{FeatureField, FeatureRow, FieldKind};
pub use prediction::PredictionLabel;

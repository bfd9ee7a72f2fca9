use crate::domain::AppError;

/// Source of the historical unit-price dataset text.
///
/// Read on every call; implementations hold no cached copy.
pub trait ReferenceDataStore {
    fn read_dataset(&self) -> Result<String, AppError>;

    /// Label used in logs and error messages.
    fn source_name(&self) -> String;
}

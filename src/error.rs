#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Invalid content selector: {0}")]
    InvalidSelector(String),
    #[error("No element matching '{selector}' in product page")]
    MissingContent { selector: String },
    #[error("Element matching '{selector}' has no text")]
    EmptyContent { selector: String },
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to extract product text: {0}")]
    Extraction(#[from] ExtractError),
    #[error("No forecast data found")]
    NoZones,
}

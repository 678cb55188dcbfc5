use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::error::ExtractError;

/// Node that holds the product text on forecast.weather.gov product pages
pub const DEFAULT_CONTENT_SELECTOR: &str = "#proddiff";

/// How raw input handed to the service should be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Detect an HTML product page, otherwise treat the input as bulletin text
    #[default]
    Auto,
    Html,
    Text,
}

impl InputFormat {
    /// Resolve `Auto` against the input itself
    pub fn is_html(self, input: &str) -> bool {
        match self {
            InputFormat::Auto => looks_like_html(input),
            InputFormat::Html => true,
            InputFormat::Text => false,
        }
    }
}

/// Sniff whether raw input is an HTML page rather than bulletin text
pub fn looks_like_html(input: &str) -> bool {
    let head: String = input.trim_start().chars().take(1024).collect();
    if !head.starts_with('<') {
        return false;
    }
    let head = head.to_ascii_lowercase();
    head.contains("<!doctype") || head.contains("<html") || head.contains("<pre")
}

/// Pull the bulletin text out of a product page
#[instrument(skip(html), fields(html_size = html.len()))]
pub fn extract_product_text(html: &str, selector: &str) -> Result<String, ExtractError> {
    let parsed_selector = Selector::parse(selector)
        .map_err(|e| ExtractError::InvalidSelector(format!("{selector}: {e}")))?;

    debug!("Parsing HTML document");
    let document = Html::parse_document(html);

    let element = document.select(&parsed_selector).next().ok_or_else(|| {
        error!("No element matching '{}' found in HTML", selector);
        debug!(
            "HTML preview (first 500 chars): {}",
            &html.chars().take(500).collect::<String>()
        );
        ExtractError::MissingContent {
            selector: selector.to_string(),
        }
    })?;

    let text = element.text().collect::<String>();
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyContent {
            selector: selector.to_string(),
        });
    }

    debug!("Extracted {} bytes of product text", text.len());
    Ok(text)
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::bulletin::{BulletinParser, SkippedSegment, Zone};
use crate::error::IngestError;
use crate::extractor::{self, InputFormat};

/// The most recently ingested bulletin
#[derive(Debug, Clone)]
pub struct ForecastSnapshot {
    pub received_at: DateTime<Utc>,
    pub zones: Vec<Zone>,
    pub skipped_segments: Vec<SkippedSegment>,
}

/// Navigation entry for one zone of the latest bulletin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneNavEntry {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub has_advisory: bool,
}

/// Owns the latest parsed bulletin and hands it to the presentation layer
///
/// Each successful ingest replaces the snapshot wholesale; a failed ingest leaves the
/// previous one in place.
#[derive(Clone)]
pub struct ForecastService {
    parser: BulletinParser,
    content_selector: String,
    latest: Arc<RwLock<Option<ForecastSnapshot>>>,
}

impl ForecastService {
    pub fn new(content_selector: String) -> Self {
        Self {
            parser: BulletinParser::new(),
            content_selector,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// Parse raw input (product page or bulletin text) without touching the snapshot
    #[instrument(skip(self, raw), fields(raw_size = raw.len()))]
    pub fn parse_input(
        &self,
        raw: &str,
        format: InputFormat,
    ) -> Result<ForecastSnapshot, IngestError> {
        let extracted;
        let body = if format.is_html(raw) {
            debug!("Extracting product text with selector '{}'", self.content_selector);
            extracted = extractor::extract_product_text(raw, &self.content_selector)?;
            extracted.as_str()
        } else {
            raw
        };

        let report = self.parser.parse_with_report(body);
        if report.zones.is_empty() {
            warn!(
                "Bulletin produced no zones ({} segments skipped)",
                report.skipped.len()
            );
            return Err(IngestError::NoZones);
        }

        Ok(ForecastSnapshot {
            received_at: Utc::now(),
            zones: report.zones,
            skipped_segments: report.skipped,
        })
    }

    /// Parse raw input and make it the latest bulletin
    #[instrument(skip(self, raw), fields(raw_size = raw.len()))]
    pub async fn ingest(
        &self,
        raw: &str,
        format: InputFormat,
    ) -> Result<ForecastSnapshot, IngestError> {
        let snapshot = self.parse_input(raw, format)?;
        info!(
            "Ingested bulletin with {} zones ({} segments skipped)",
            snapshot.zones.len(),
            snapshot.skipped_segments.len()
        );

        *self.latest.write().await = Some(snapshot.clone());
        Ok(snapshot)
    }

    pub async fn latest(&self) -> Option<ForecastSnapshot> {
        self.latest.read().await.clone()
    }

    /// Index, identifier and name of every zone in the latest bulletin
    pub async fn zone_index(&self) -> Option<(DateTime<Utc>, Vec<ZoneNavEntry>)> {
        let guard = self.latest.read().await;
        let snapshot = guard.as_ref()?;

        let entries = snapshot
            .zones
            .iter()
            .enumerate()
            .map(|(index, zone)| ZoneNavEntry {
                index,
                id: zone.id.clone(),
                name: zone.name.clone(),
                has_advisory: zone.has_advisory(),
            })
            .collect();

        Some((snapshot.received_at, entries))
    }

    pub async fn zone(&self, index: usize) -> Option<Zone> {
        let guard = self.latest.read().await;
        guard.as_ref()?.zones.get(index).cloned()
    }

    pub async fn zone_by_id(&self, zone_id: &str) -> Option<Zone> {
        let guard = self.latest.read().await;
        guard
            .as_ref()?
            .zones
            .iter()
            .find(|zone| zone.id == zone_id)
            .cloned()
    }
}

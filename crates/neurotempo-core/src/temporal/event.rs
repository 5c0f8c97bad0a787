//! Timestamped events - the atoms of a temporal sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A single timestamped observation.
///
/// Immutable once created: sequences only ever append events, never edit
/// them. The generic value type keeps the container reusable; all numeric
/// analysis lives on `TemporalSequence<f64>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalEvent<T> {
    /// Unique identifier, returned to ingestion callers
    pub event_id: Uuid,
    /// When the observation was made
    pub timestamp: DateTime<Utc>,
    /// The observed value
    pub value: T,
    /// Free-form annotations (source, assay, notes)
    #[serde(default = "HashMap::new")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Subject the observation belongs to, if any
    pub patient_id: Option<String>,
}

impl<T> TemporalEvent<T> {
    /// Create an event with a fresh id and no annotations.
    pub fn new(timestamp: DateTime<Utc>, value: T) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp,
            value,
            metadata: HashMap::new(),
            patient_id: None,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach a patient id.
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }
}

//! Alerts: the photometric history of one transient candidate.

use std::fmt;

use serde::Deserialize;

use crate::error::FilterResult;
use crate::Datapoint;

/// Transient identifier. Brokers hand out either integer ids or names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum TranId {
    Int(i64),
    Name(String),
}

impl fmt::Display for TranId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranId::Int(id) => write!(f, "{id}"),
            TranId::Name(name) => f.write_str(name),
        }
    }
}

/// A report bundling one candidate transient's photometric history.
///
/// Datapoints are ordered most-recent-first: `datapoints[0]` is the
/// measurement that triggered the alert.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub tran_id: Option<TranId>,
    pub datapoints: Vec<Datapoint>,
}

impl Alert {
    pub fn new(tran_id: Option<TranId>, datapoints: Vec<Datapoint>) -> Self {
        Self {
            tran_id,
            datapoints,
        }
    }

    /// Decode an alert document `{"tran_id": .., "datapoints": [..]}`.
    pub fn from_json_str(s: &str) -> FilterResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// The most recent datapoint.
    pub fn latest(&self) -> Option<&Datapoint> {
        self.datapoints.first()
    }

    pub fn len(&self) -> usize {
        self.datapoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }

    /// Datapoints carrying a PSF magnitude, in alert order.
    pub fn detections(&self) -> impl Iterator<Item = &Datapoint> {
        self.datapoints.iter().filter(|dp| dp.is_detection())
    }

    /// Julian dates of all detections, in alert order.
    pub fn detection_jds(&self) -> Vec<f64> {
        self.detections().map(|dp| dp.jd).collect()
    }

    /// Reorder datapoints by descending Julian date.
    ///
    /// The sort is stable, so datapoints sharing a date keep their order.
    pub fn sort_most_recent_first(&mut self) {
        self.datapoints
            .sort_by(|a, b| b.jd.partial_cmp(&a.jd).unwrap_or(std::cmp::Ordering::Equal));
    }
}

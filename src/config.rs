//! Filter thresholds.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FilterError, FilterResult};

/// Thresholds applied by [`crate::DecentFilter`].
///
/// Resolved once before any alert is processed and read-only afterwards.
/// Documents decoded with serde may omit any field; missing fields take the
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    // ── History ──
    /// Minimum number of detections in the alert.
    pub min_ndet: usize,
    /// Minimum duration of the detection history [days].
    pub min_tspan: f64,
    /// Maximum duration of the detection history [days].
    pub max_tspan: f64,
    /// Lower (exclusive) bound on the archival history length [days].
    pub min_archive_tspan: f64,
    /// Upper (exclusive) bound on the archival history length [days].
    pub max_archive_tspan: f64,

    // ── Image quality ──
    /// Deep-learning real/bogus threshold. Only enforced when > 0.
    pub min_drb: f64,
    /// Real/bogus threshold.
    pub min_rb: f64,
    /// Maximum source FWHM [pix].
    pub max_fwhm: f64,
    /// Maximum axis ratio (aimage / bimage).
    pub max_elong: f64,
    /// Maximum |magap - magpsf| [mag].
    pub max_magdiff: f64,
    /// Number of bad pixels in a 5x5 stamp. Reserved: validated but not
    /// enforced by any cut.
    pub max_nbad: i64,

    // ── Astrophysics ──
    /// Reject when a known solar-system object lies closer than this [arcsec].
    pub min_sso_dist: f64,
    /// Minimum |galactic latitude| [deg]. Zero or negative disables the cut.
    pub min_gal_lat: f64,
    /// Radius for the PS1 star veto [arcsec].
    pub ps1_sgveto_rad: f64,
    /// Star/galaxy score above which the nearest PS1 source counts as a star.
    pub ps1_sgveto_th: f64,
    /// Reject when all three PS1 sources fall within this radius [arcsec]...
    pub ps1_confusion_rad: f64,
    /// ...and all their star/galaxy scores are within this tolerance of 0.5.
    pub ps1_confusion_sg_tol: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_ndet: 2,
            min_tspan: 0.02,
            max_tspan: 25.0,
            min_archive_tspan: 0.0,
            max_archive_tspan: 1e5,
            min_drb: 0.0,
            min_rb: 0.3,
            max_fwhm: 5.0,
            max_elong: 1.4,
            max_magdiff: 0.4,
            max_nbad: 0,
            min_sso_dist: 20.0,
            min_gal_lat: 0.0,
            ps1_sgveto_rad: 2.0,
            ps1_sgveto_th: 0.8,
            ps1_confusion_rad: 1.0,
            ps1_confusion_sg_tol: 0.5,
        }
    }
}

impl FilterConfig {
    /// Decode a JSON document, filling unspecified thresholds with defaults.
    pub fn from_json_str(s: &str) -> FilterResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&data)?)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> FilterResult<()> {
        let floats = [
            ("min_tspan", self.min_tspan),
            ("max_tspan", self.max_tspan),
            ("min_archive_tspan", self.min_archive_tspan),
            ("max_archive_tspan", self.max_archive_tspan),
            ("min_drb", self.min_drb),
            ("min_rb", self.min_rb),
            ("max_fwhm", self.max_fwhm),
            ("max_elong", self.max_elong),
            ("max_magdiff", self.max_magdiff),
            ("min_sso_dist", self.min_sso_dist),
            ("min_gal_lat", self.min_gal_lat),
            ("ps1_sgveto_rad", self.ps1_sgveto_rad),
            ("ps1_sgveto_th", self.ps1_sgveto_th),
            ("ps1_confusion_rad", self.ps1_confusion_rad),
            ("ps1_confusion_sg_tol", self.ps1_confusion_sg_tol),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(FilterError::Config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        if self.min_ndet < 1 {
            return Err(FilterError::Config(format!(
                "min_ndet must be >= 1, got {}",
                self.min_ndet
            )));
        }
        if self.min_tspan > self.max_tspan {
            return Err(FilterError::Config(format!(
                "min_tspan must be <= max_tspan, got {} > {}",
                self.min_tspan, self.max_tspan
            )));
        }
        if self.min_archive_tspan >= self.max_archive_tspan {
            return Err(FilterError::Config(format!(
                "min_archive_tspan must be < max_archive_tspan, got {} >= {}",
                self.min_archive_tspan, self.max_archive_tspan
            )));
        }
        for (name, value) in [
            ("min_rb", self.min_rb),
            ("min_drb", self.min_drb),
            ("ps1_sgveto_th", self.ps1_sgveto_th),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FilterError::Config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if self.max_nbad < 0 {
            return Err(FilterError::Config(format!(
                "max_nbad must be >= 0, got {}",
                self.max_nbad
            )));
        }
        for (name, value) in [
            ("max_fwhm", self.max_fwhm),
            ("max_elong", self.max_elong),
            ("max_magdiff", self.max_magdiff),
            ("min_sso_dist", self.min_sso_dist),
            ("ps1_sgveto_rad", self.ps1_sgveto_rad),
            ("ps1_confusion_rad", self.ps1_confusion_rad),
            ("ps1_confusion_sg_tol", self.ps1_confusion_sg_tol),
        ] {
            if value < 0.0 {
                return Err(FilterError::Config(format!(
                    "{name} must be >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Log every resolved threshold.
    pub fn log_settings(&self) {
        if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(self) {
            for (name, value) in map {
                info!("Using {}={}", name, value);
            }
        }
    }
}

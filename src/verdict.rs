//! Outcome of filtering one alert.

use std::fmt;

use tracing::{debug, info};

use crate::galactic::TransformError;
use crate::{Key, TranId};

/// Why an alert was rejected, with the offending value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Fewer detections than `min_ndet`.
    TooFewDetections { ndet: usize },
    /// Detection history span outside `[min_tspan, max_tspan]`.
    DetectionSpan { tspan: f64 },
    /// A key needed by the cuts is missing from the latest datapoint.
    MissingKey(Key),
    /// A key needed by the cuts is null in the latest datapoint.
    NullKey(Key),
    /// Negative difference-image flux.
    NegativeSubtraction { isdiffpos: String },
    RealBogus { rb: f64 },
    DeepRealBogus { drb: f64 },
    Fwhm { fwhm: f64 },
    Elongation { elong: f64 },
    MagDiff { magdiff: f64 },
    /// Archival history length outside `(min_archive_tspan, max_archive_tspan)`.
    ArchiveSpan { archive_tspan: f64 },
    /// A known solar-system object lies within `min_sso_dist`.
    SolarSystemObject { ssdistnr: f64 },
    /// Too close to the galactic plane.
    GalacticPlane { abs_b: f64 },
    /// The galactic latitude could not be computed.
    GalacticTransform(TransformError),
    /// A star-like PS1 source sits on the transient.
    Ps1Star { distpsnr1: f64, sgscore1: f64 },
    /// Three ambiguous PS1 sources crowd the position.
    Ps1Confusion {
        max_distpsnr: f64,
        max_sg_offset: f64,
    },
}

impl Rejection {
    /// Stable diagnostic key of the failing cut.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::TooFewDetections { .. } => "nDet",
            Rejection::DetectionSpan { .. } => "tSpan",
            Rejection::MissingKey(_) => "missing",
            Rejection::NullKey(_) => "isNone",
            Rejection::NegativeSubtraction { .. } => "isdiffpos",
            Rejection::RealBogus { .. } => "rb",
            Rejection::DeepRealBogus { .. } => "drb",
            Rejection::Fwhm { .. } => "fwhm",
            Rejection::Elongation { .. } => "elong",
            Rejection::MagDiff { .. } => "magdiff",
            Rejection::ArchiveSpan { .. } => "archive_tspan",
            Rejection::SolarSystemObject { .. } => "ssdistnr",
            Rejection::GalacticPlane { .. } => "galPlane",
            Rejection::GalacticTransform(_) => "galTransform",
            Rejection::Ps1Star { .. } => "distpsnr1",
            Rejection::Ps1Confusion { .. } => "ps1Confusion",
        }
    }

    /// Datapoint key the rejection is about, when it concerns a single key.
    pub fn key(&self) -> Option<Key> {
        match self {
            Rejection::MissingKey(key) | Rejection::NullKey(key) => Some(*key),
            Rejection::NegativeSubtraction { .. } => Some(Key::Isdiffpos),
            Rejection::RealBogus { .. } => Some(Key::Rb),
            Rejection::DeepRealBogus { .. } => Some(Key::Drb),
            Rejection::Fwhm { .. } => Some(Key::Fwhm),
            Rejection::Elongation { .. } => Some(Key::Elong),
            Rejection::MagDiff { .. } => Some(Key::Magdiff),
            Rejection::SolarSystemObject { .. } => Some(Key::Ssdistnr),
            Rejection::Ps1Star { .. } => Some(Key::Distpsnr1),
            _ => None,
        }
    }

    /// Offending numeric value, if the cut is about one.
    pub fn value(&self) -> Option<f64> {
        match self {
            Rejection::TooFewDetections { ndet } => Some(*ndet as f64),
            Rejection::DetectionSpan { tspan } => Some(*tspan),
            Rejection::RealBogus { rb } => Some(*rb),
            Rejection::DeepRealBogus { drb } => Some(*drb),
            Rejection::Fwhm { fwhm } => Some(*fwhm),
            Rejection::Elongation { elong } => Some(*elong),
            Rejection::MagDiff { magdiff } => Some(*magdiff),
            Rejection::ArchiveSpan { archive_tspan } => Some(*archive_tspan),
            Rejection::SolarSystemObject { ssdistnr } => Some(*ssdistnr),
            Rejection::GalacticPlane { abs_b } => Some(*abs_b),
            Rejection::Ps1Star { distpsnr1, .. } => Some(*distpsnr1),
            _ => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooFewDetections { ndet } => write!(f, "only {ndet} detections"),
            Rejection::DetectionSpan { tspan } => {
                write!(f, "detection history is {tspan:.3} d long")
            }
            Rejection::MissingKey(key) => write!(f, "key '{key}' missing from latest datapoint"),
            Rejection::NullKey(key) => write!(f, "key '{key}' is null in latest datapoint"),
            Rejection::NegativeSubtraction { isdiffpos } => {
                write!(f, "negative subtraction (isdiffpos = {isdiffpos:?})")
            }
            Rejection::RealBogus { rb } => write!(f, "RB score {rb:.2} below threshold"),
            Rejection::DeepRealBogus { drb } => write!(f, "DRB score {drb:.2} below threshold"),
            Rejection::Fwhm { fwhm } => write!(f, "fwhm {fwhm:.2} above threshold"),
            Rejection::Elongation { elong } => write!(f, "elongation {elong:.2} above threshold"),
            Rejection::MagDiff { magdiff } => {
                write!(f, "magdiff (AP-PSF) {magdiff:.2} above threshold")
            }
            Rejection::ArchiveSpan { archive_tspan } => {
                write!(f, "archival history is {archive_tspan:.3} d long")
            }
            Rejection::SolarSystemObject { ssdistnr } => {
                write!(f, "solar-system object {ssdistnr:.1} arcsec away")
            }
            Rejection::GalacticPlane { abs_b } => {
                write!(f, "|b| = {abs_b:.4} deg, too close to the galactic plane")
            }
            Rejection::GalacticTransform(err) => write!(f, "galactic latitude unavailable: {err}"),
            Rejection::Ps1Star {
                distpsnr1,
                sgscore1,
            } => write!(
                f,
                "closest PS1 source {distpsnr1:.2} arcsec away with sgscore {sgscore1:.2}"
            ),
            Rejection::Ps1Confusion { max_distpsnr, .. } => write!(
                f,
                "three confused PS1 sources within {max_distpsnr:.2} arcsec"
            ),
        }
    }
}

/// Accept or reject, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The alert passes. Carries the latest datapoint's candidate id.
    Accept { candid: Option<u64> },
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accept { .. })
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Reject(rejection) => Some(rejection),
            Verdict::Accept { .. } => None,
        }
    }

    /// Diagnostic key of the failing cut; `None` when accepted.
    pub fn reason(&self) -> Option<&'static str> {
        self.rejection().map(Rejection::reason)
    }

    /// Emit the verdict as a diagnostic event.
    pub fn trace(&self, tran_id: Option<&TranId>) {
        let tran_id = tran_id.map(|t| t.to_string());
        match self {
            Verdict::Accept { candid } => {
                debug!(tran_id = ?tran_id, latest_pp_id = ?candid, "Alert accepted");
            }
            Verdict::Reject(rejection) => {
                info!(
                    tran_id = ?tran_id,
                    reason = rejection.reason(),
                    key = ?rejection.key().map(Key::name),
                    value = ?rejection.value(),
                    "Alert rejected: {}",
                    rejection
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_key_value() {
        let r = Rejection::MissingKey(Key::Sgscore2);
        assert_eq!(r.reason(), "missing");
        assert_eq!(r.key(), Some(Key::Sgscore2));
        assert_eq!(r.value(), None);

        let r = Rejection::TooFewDetections { ndet: 1 };
        assert_eq!(r.reason(), "nDet");
        assert_eq!(r.value(), Some(1.0));

        let r = Rejection::Ps1Star {
            distpsnr1: 1.0,
            sgscore1: 0.9,
        };
        assert_eq!(r.reason(), "distpsnr1");
        assert_eq!(r.key(), Some(Key::Distpsnr1));
        assert_eq!(r.value(), Some(1.0));
    }

    #[test]
    fn test_verdict_accessors() {
        let accept = Verdict::Accept { candid: Some(7) };
        assert!(accept.is_accepted());
        assert_eq!(accept.reason(), None);

        let reject = Verdict::Reject(Rejection::GalacticPlane { abs_b: 3.0 });
        assert!(!reject.is_accepted());
        assert_eq!(reject.reason(), Some("galPlane"));
        assert!(reject.rejection().unwrap().to_string().contains("galactic plane"));
    }

    #[test]
    fn test_trace_does_not_panic() {
        let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();
        Verdict::Accept { candid: None }.trace(None);
        Verdict::Reject(Rejection::NullKey(Key::Ra)).trace(Some(&TranId::Int(3)));
    }
}

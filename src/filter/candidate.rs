//! Image-quality and astrophysical cuts on the latest datapoint.

use crate::filter::history::check_archive_span;
use crate::filter::ps1::Ps1Neighbours;
use crate::galactic::LatitudeFn;
use crate::{Datapoint, Entry, FilterConfig, Key, Rejection};

/// Keys the latest datapoint must carry, checked in this order.
///
/// `drb` is checked separately, and only when `min_drb > 0`.
pub const REQUIRED_KEYS: [Key; 15] = [
    Key::Fwhm,
    Key::Elong,
    Key::Magdiff,
    Key::Nbad,
    Key::Distpsnr1,
    Key::Sgscore1,
    Key::Distpsnr2,
    Key::Sgscore2,
    Key::Distpsnr3,
    Key::Sgscore3,
    Key::Isdiffpos,
    Key::Ra,
    Key::Dec,
    Key::Rb,
    Key::Ssdistnr,
];

/// `isdiffpos` values flagging a negative subtraction.
const NEGATIVE_SUBTRACTION: [&str; 2] = ["f", "0"];

fn required<T: Clone>(entry: &Entry<T>, key: Key) -> Result<T, Rejection> {
    match entry {
        Entry::Present(v) => Ok(v.clone()),
        Entry::Null => Err(Rejection::NullKey(key)),
        Entry::Absent => Err(Rejection::MissingKey(key)),
    }
}

/// Values of the required keys, the only values the cuts read besides
/// `drb` and the archival history.
#[derive(Debug, Clone, PartialEq)]
struct RequiredValues {
    fwhm: f64,
    elong: f64,
    magdiff: f64,
    ps1: Ps1Neighbours,
    isdiffpos: String,
    ra: f64,
    dec: f64,
    rb: f64,
    ssdistnr: f64,
}

impl RequiredValues {
    /// Read every key of [`REQUIRED_KEYS`], in that order, and report the
    /// first one that is absent or null.
    fn read(dp: &Datapoint) -> Result<Self, Rejection> {
        let fwhm = required(&dp.fwhm, Key::Fwhm)?;
        let elong = required(&dp.elong, Key::Elong)?;
        let magdiff = required(&dp.magdiff, Key::Magdiff)?;
        // No cut reads nbad, it only has to be there.
        required(&dp.nbad, Key::Nbad)?;
        let distpsnr1 = required(&dp.distpsnr1, Key::Distpsnr1)?;
        let sgscore1 = required(&dp.sgscore1, Key::Sgscore1)?;
        let distpsnr2 = required(&dp.distpsnr2, Key::Distpsnr2)?;
        let sgscore2 = required(&dp.sgscore2, Key::Sgscore2)?;
        let distpsnr3 = required(&dp.distpsnr3, Key::Distpsnr3)?;
        let sgscore3 = required(&dp.sgscore3, Key::Sgscore3)?;
        let isdiffpos = required(&dp.isdiffpos, Key::Isdiffpos)?;
        let ra = required(&dp.ra, Key::Ra)?;
        let dec = required(&dp.dec, Key::Dec)?;
        let rb = required(&dp.rb, Key::Rb)?;
        let ssdistnr = required(&dp.ssdistnr, Key::Ssdistnr)?;
        Ok(Self {
            fwhm,
            elong,
            magdiff,
            ps1: Ps1Neighbours {
                distpsnr: [distpsnr1, distpsnr2, distpsnr3],
                sgscore: [sgscore1, sgscore2, sgscore3],
            },
            isdiffpos,
            ra,
            dec,
            rb,
            ssdistnr,
        })
    }
}

/// The candidate cut chain, resolved once from a [`FilterConfig`].
#[derive(Debug, Clone)]
pub struct CandidateCuts {
    config: FilterConfig,
    enforce_drb: bool,
    enforce_gal_lat: bool,
    latitude_fn: LatitudeFn,
}

impl CandidateCuts {
    pub fn new(config: &FilterConfig, latitude_fn: LatitudeFn) -> Self {
        Self {
            config: config.clone(),
            enforce_drb: config.min_drb > 0.0,
            enforce_gal_lat: config.min_gal_lat > 0.0,
            latitude_fn,
        }
    }

    pub fn required_keys(&self) -> &'static [Key] {
        &REQUIRED_KEYS
    }

    /// Run every cut on `dp` in order and stop at the first failure.
    pub fn evaluate(&self, dp: &Datapoint) -> Result<(), Rejection> {
        let c = &self.config;
        let v = RequiredValues::read(dp)?;

        // ── Image quality ──
        if NEGATIVE_SUBTRACTION.contains(&v.isdiffpos.as_str()) {
            return Err(Rejection::NegativeSubtraction {
                isdiffpos: v.isdiffpos,
            });
        }

        if v.rb < c.min_rb {
            return Err(Rejection::RealBogus { rb: v.rb });
        }

        if self.enforce_drb {
            let drb = required(&dp.drb, Key::Drb)?;
            if drb < c.min_drb {
                return Err(Rejection::DeepRealBogus { drb });
            }
        }

        if v.fwhm > c.max_fwhm {
            return Err(Rejection::Fwhm { fwhm: v.fwhm });
        }

        if v.elong > c.max_elong {
            return Err(Rejection::Elongation { elong: v.elong });
        }

        if v.magdiff.abs() > c.max_magdiff {
            return Err(Rejection::MagDiff { magdiff: v.magdiff });
        }

        check_archive_span(dp, c)?;

        // ── Astrophysics ──
        if 0.0 <= v.ssdistnr && v.ssdistnr < c.min_sso_dist {
            return Err(Rejection::SolarSystemObject {
                ssdistnr: v.ssdistnr,
            });
        }

        if self.enforce_gal_lat {
            let b = (self.latitude_fn)(v.ra, v.dec).map_err(Rejection::GalacticTransform)?;
            if b.abs() < c.min_gal_lat {
                return Err(Rejection::GalacticPlane { abs_b: b.abs() });
            }
        }

        let ps1 = &v.ps1;
        if ps1.is_star(c.ps1_sgveto_rad, c.ps1_sgveto_th) {
            return Err(Rejection::Ps1Star {
                distpsnr1: ps1.distpsnr[0],
                sgscore1: ps1.sgscore[0],
            });
        }
        if ps1.is_confused(c.ps1_confusion_rad, c.ps1_confusion_sg_tol) {
            return Err(Rejection::Ps1Confusion {
                max_distpsnr: ps1.max_distance(),
                max_sg_offset: ps1.max_sg_offset(),
            });
        }

        Ok(())
    }
}

//! A single photometric measurement ("datapoint") inside an alert.
//!
//! Alert records coming out of a broker are loosely typed: a key can be
//! missing from a record altogether, present with a null value, or present
//! with a value. The filter reports the first two cases differently, so every
//! optional scalar is held in an [`Entry`] rather than a plain `Option`.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Tri-state value of a datapoint key.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Entry<T> {
    /// The key does not appear in the record.
    #[default]
    Absent,
    /// The key appears with a null value.
    Null,
    /// The key carries a value.
    Present(T),
}

impl<T> Entry<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Entry::Present(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Entry::Present(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Copy> Entry<T> {
    /// The value, if present.
    pub fn get(&self) -> Option<T> {
        self.as_option().copied()
    }
}

impl<T> From<Option<T>> for Entry<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Entry::Present(v),
            None => Entry::Null,
        }
    }
}

// A key that reaches the deserializer exists in the record, so it is either
// null or a value. Keys that never show up fall back to `Absent` through
// `#[serde(default)]` on the field.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entry<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Entry::from)
    }
}

/// Integral value of a count that was written as a float (`0.0`), as
/// dataframe-based producers do.
pub fn integral_count(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < i64::MAX as f64).then_some(value as i64)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Int(i64),
    Float(f64),
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<Entry<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Count>::deserialize(deserializer)? {
        None => Entry::Null,
        Some(Count::Int(n)) => Entry::Present(n),
        Some(Count::Float(x)) => match integral_count(x) {
            Some(n) => Entry::Present(n),
            None => return Err(D::Error::custom(format!("expected an integer count, got {x}"))),
        },
    })
}

/// Names of the datapoint keys the filter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Jd,
    Magpsf,
    Isdiffpos,
    Rb,
    Drb,
    Fwhm,
    Elong,
    Nbad,
    Magdiff,
    Distpsnr1,
    Sgscore1,
    Distpsnr2,
    Sgscore2,
    Distpsnr3,
    Sgscore3,
    Ssdistnr,
    Ra,
    Dec,
    Jdstarthist,
    Jdendhist,
    Candid,
}

impl Key {
    /// Record key as it appears in alert packets.
    pub const fn name(self) -> &'static str {
        match self {
            Key::Jd => "jd",
            Key::Magpsf => "magpsf",
            Key::Isdiffpos => "isdiffpos",
            Key::Rb => "rb",
            Key::Drb => "drb",
            Key::Fwhm => "fwhm",
            Key::Elong => "elong",
            Key::Nbad => "nbad",
            Key::Magdiff => "magdiff",
            Key::Distpsnr1 => "distpsnr1",
            Key::Sgscore1 => "sgscore1",
            Key::Distpsnr2 => "distpsnr2",
            Key::Sgscore2 => "sgscore2",
            Key::Distpsnr3 => "distpsnr3",
            Key::Sgscore3 => "sgscore3",
            Key::Ssdistnr => "ssdistnr",
            Key::Ra => "ra",
            Key::Dec => "dec",
            Key::Jdstarthist => "jdstarthist",
            Key::Jdendhist => "jdendhist",
            Key::Candid => "candid",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One photometric measurement (detection or upper limit).
///
/// `jd` is always required. Everything else may be absent or null; a
/// datapoint is a detection when `magpsf` carries a value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Datapoint {
    /// Julian date of the observation.
    pub jd: f64,
    /// PSF-fit magnitude. Only detections carry one.
    #[serde(default)]
    pub magpsf: Entry<f64>,
    /// Sign of the difference-image flux ("t"/"1" positive, "f"/"0" negative).
    #[serde(default)]
    pub isdiffpos: Entry<String>,
    /// Real/bogus score of the random-forest classifier, in [0, 1].
    #[serde(default)]
    pub rb: Entry<f64>,
    /// Deep-learning real/bogus score, in [0, 1].
    #[serde(default)]
    pub drb: Entry<f64>,
    /// Source FWHM in pixels.
    #[serde(default)]
    pub fwhm: Entry<f64>,
    /// Axis ratio of the source image (aimage / bimage).
    #[serde(default)]
    pub elong: Entry<f64>,
    /// Number of bad pixels in a 5x5 stamp around the source.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub nbad: Entry<i64>,
    /// Aperture minus PSF magnitude.
    #[serde(default)]
    pub magdiff: Entry<f64>,
    /// Distance to the nearest PS1 source [arcsec].
    #[serde(default)]
    pub distpsnr1: Entry<f64>,
    /// Star/galaxy score of the nearest PS1 source (1 = star-like).
    #[serde(default)]
    pub sgscore1: Entry<f64>,
    #[serde(default)]
    pub distpsnr2: Entry<f64>,
    #[serde(default)]
    pub sgscore2: Entry<f64>,
    #[serde(default)]
    pub distpsnr3: Entry<f64>,
    #[serde(default)]
    pub sgscore3: Entry<f64>,
    /// Distance to the nearest known solar-system object [arcsec].
    /// Negative when no object was matched.
    #[serde(default)]
    pub ssdistnr: Entry<f64>,
    /// Right ascension, ICRS [deg].
    #[serde(default)]
    pub ra: Entry<f64>,
    /// Declination, ICRS [deg].
    #[serde(default)]
    pub dec: Entry<f64>,
    /// Julian date of the first archival detection at this position.
    #[serde(default)]
    pub jdstarthist: Entry<f64>,
    /// Julian date of the last archival detection at this position.
    #[serde(default)]
    pub jdendhist: Entry<f64>,
    /// Candidate identifier, carried through for diagnostics.
    #[serde(default)]
    pub candid: Entry<u64>,
}

impl Datapoint {
    /// A bare datapoint at the given Julian date with every other key absent.
    pub fn at(jd: f64) -> Self {
        Self {
            jd,
            ..Default::default()
        }
    }

    pub fn is_detection(&self) -> bool {
        self.magpsf.is_present()
    }
}

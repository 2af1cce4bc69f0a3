//! # decentfilter
//!
//! A real-time **admission filter for astronomical transient alerts**, in the
//! style of the ZTF alert stream.
//!
//! Each alert bundles the photometric history of one transient candidate.
//! The filter decides, per alert, whether the candidate is interesting enough
//! to be passed on to (expensive) downstream analysis. It only uses what the
//! alert already carries: detection history, image-quality figures,
//! real/bogus scores, the nearest known solar-system object and the three
//! nearest Pan-STARRS1 sources. No external catalog is queried.
//!
//! ## Example
//!
//! ```no_run
//! use decentfilter::{Alert, DecentFilter, FilterConfig};
//!
//! let config = FilterConfig {
//!     min_gal_lat: 14.0,
//!     ..Default::default()
//! };
//! let filter = DecentFilter::new(config).unwrap();
//!
//! let alert = decentfilter::loader::load_alert_json("alert.json").unwrap();
//! let verdict = filter.evaluate(&alert);
//! if let Some(rejection) = verdict.rejection() {
//!     println!("rejected ({}): {}", rejection.reason(), rejection);
//! }
//! ```
//!
//! ## Cut sequence
//!
//! 1. **History**: at least `min_ndet` detections spanning
//!    `[min_tspan, max_tspan]` days
//! 2. **Required keys**: the latest datapoint carries every key the cuts read
//! 3. **Image quality**: positive subtraction, `rb`/`drb`, FWHM, elongation,
//!    aperture-PSF magnitude difference, archival history length
//! 4. **Astrophysics**: solar-system objects, galactic latitude, PS1 star
//!    veto, PS1 source confusion
//!
//! Evaluation stops at the first failing cut, and the returned [`Verdict`]
//! names it.

mod alert;
pub mod config;
mod datapoint;
pub mod error;
pub mod filter;
pub mod galactic;
pub mod loader;
mod verdict;

pub use alert::*;
pub use config::FilterConfig;
pub use datapoint::*;
pub use error::{FilterError, FilterResult};
pub use filter::DecentFilter;
pub use galactic::{galactic_latitude, TransformError};
pub use verdict::*;

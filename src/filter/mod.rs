//! The admission filter.
//!
//! An alert goes through two stages:
//!
//! 1. **History gate** ([`history`]): enough detections, spread over an
//!    acceptable time span.
//! 2. **Candidate evaluation** ([`candidate`]): image-quality and
//!    astrophysical cuts on the most recent datapoint only, stopping at the
//!    first failing cut.
//!
//! [`DecentFilter::evaluate`] is a pure function of the alert and the
//! configuration and returns a [`Verdict`]. Emitting diagnostics is left to
//! the caller ([`Verdict::trace`]), or done by [`DecentFilter::process`].

pub mod candidate;
pub mod history;
pub mod ps1;

use tracing::info;

use crate::error::FilterResult;
use crate::galactic::{galactic_latitude, LatitudeFn};
use crate::{Alert, FilterConfig, Key, Rejection, Verdict};

use candidate::CandidateCuts;

/// Alert filter selecting likely genuine extragalactic transients from the
/// alert's own content, without external catalog queries.
///
/// Immutable after construction; share it freely between worker threads.
#[derive(Debug, Clone)]
pub struct DecentFilter {
    config: FilterConfig,
    cuts: CandidateCuts,
}

impl DecentFilter {
    /// Validate `config` and build a filter using the built-in galactic
    /// coordinate transform.
    pub fn new(config: FilterConfig) -> FilterResult<Self> {
        Self::with_latitude_fn(config, galactic_latitude)
    }

    /// Build a filter with an alternative galactic-latitude provider.
    pub fn with_latitude_fn(config: FilterConfig, latitude_fn: LatitudeFn) -> FilterResult<Self> {
        config.validate()?;
        config.log_settings();
        if config.max_nbad != FilterConfig::default().max_nbad {
            info!(
                "max_nbad={} is accepted for compatibility but no cut enforces it",
                config.max_nbad
            );
        }
        let cuts = CandidateCuts::new(&config, latitude_fn);
        Ok(Self { config, cuts })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Keys the latest datapoint must carry.
    pub fn required_keys(&self) -> &[Key] {
        self.cuts.required_keys()
    }

    /// Decide on `alert`.
    pub fn evaluate(&self, alert: &Alert) -> Verdict {
        if let Err(rejection) = history::check_history(alert, &self.config) {
            return Verdict::Reject(rejection);
        }
        // A passing history implies at least one datapoint.
        let Some(latest) = alert.latest() else {
            return Verdict::Reject(Rejection::TooFewDetections { ndet: 0 });
        };
        match self.cuts.evaluate(latest) {
            Ok(()) => Verdict::Accept {
                candid: latest.candid.get(),
            },
            Err(rejection) => Verdict::Reject(rejection),
        }
    }

    /// Evaluate `alert`, trace the verdict and return whether it passed.
    pub fn process(&self, alert: &Alert) -> bool {
        let verdict = self.evaluate(alert);
        verdict.trace(alert.tran_id.as_ref());
        verdict.is_accepted()
    }
}

//! Cuts on the detection history of an alert.

use crate::{Alert, Datapoint, FilterConfig, Rejection};

/// Time between the first and last of `jds`, or `None` for an empty slice.
pub fn detection_span(jds: &[f64]) -> Option<f64> {
    let (first, rest) = jds.split_first()?;
    let (min, max) = rest
        .iter()
        .fold((*first, *first), |(lo, hi), &jd| (lo.min(jd), hi.max(jd)));
    Some(max - min)
}

/// Detection count and detection time-span bounds.
///
/// `min_ndet <= n` and `min_tspan <= tspan <= max_tspan`, both inclusive.
pub fn check_history(alert: &Alert, config: &FilterConfig) -> Result<(), Rejection> {
    let jds = alert.detection_jds();
    let ndet = jds.len();
    if ndet < config.min_ndet {
        return Err(Rejection::TooFewDetections { ndet });
    }

    let Some(tspan) = detection_span(&jds) else {
        return Err(Rejection::TooFewDetections { ndet });
    };
    if !(config.min_tspan <= tspan && tspan <= config.max_tspan) {
        return Err(Rejection::DetectionSpan { tspan });
    }
    Ok(())
}

/// Archival history length of a datapoint, when both ends are known.
pub fn archive_span(dp: &Datapoint) -> Option<f64> {
    Some(dp.jdendhist.get()? - dp.jdstarthist.get()?)
}

/// Archival span cut, with both bounds exclusive. Skipped when either end
/// of the archival history is unknown.
pub fn check_archive_span(dp: &Datapoint, config: &FilterConfig) -> Result<(), Rejection> {
    match archive_span(dp) {
        Some(archive_tspan)
            if !(config.min_archive_tspan < archive_tspan
                && archive_tspan < config.max_archive_tspan) =>
        {
            Err(Rejection::ArchiveSpan { archive_tspan })
        }
        _ => Ok(()),
    }
}

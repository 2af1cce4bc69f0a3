//! Python bindings for decentfilter via PyO3.
//!
//! Exposes the alert filter to Python as the `decentfilter_rs` module, so it
//! can be dropped into a Python alert-processing pipeline.

mod datapoint;
mod verdict;

use pyo3::prelude::*;
use pyo3::types::PyDict;

use decentfilter::{DecentFilter, FilterConfig};

use crate::datapoint::parse_alert;
use crate::verdict::PyVerdict;

// ═══════════════════════════════════════════════════════════════════════════
// PyDecentFilter: wraps DecentFilter
// ═══════════════════════════════════════════════════════════════════════════

/// Admission filter for transient alerts.
///
/// Thresholds are fixed at construction. Alerts are passed as a list of
/// datapoint dicts, most recent first; detections are the datapoints with a
/// non-null 'magpsf'.
///
/// Example:
///     f = decentfilter_rs.DecentFilter(min_gal_lat=14.0)
///     verdict = f.evaluate(datapoints)
///     if not verdict:
///         print(verdict.reason, verdict.value)
#[pyclass(name = "DecentFilter", frozen)]
struct PyDecentFilter {
    inner: DecentFilter,
}

#[pymethods]
impl PyDecentFilter {
    /// Build a filter.
    ///
    /// Args:
    ///     min_ndet: Minimum number of detections. Default 2.
    ///     min_tspan: Minimum detection history length [days]. Default 0.02.
    ///     max_tspan: Maximum detection history length [days]. Default 25.
    ///     min_archive_tspan: Exclusive lower bound on archival history [days]. Default 0.
    ///     max_archive_tspan: Exclusive upper bound on archival history [days]. Default 1e5.
    ///     min_drb: Deep-learning real/bogus threshold, enforced only if > 0. Default 0.
    ///     min_rb: Real/bogus threshold. Default 0.3.
    ///     max_fwhm: Maximum FWHM [pix]. Default 5.
    ///     max_elong: Maximum elongation. Default 1.4.
    ///     max_magdiff: Maximum |magap - magpsf| [mag]. Default 0.4.
    ///     max_nbad: Reserved, not enforced. Default 0.
    ///     min_sso_dist: Minimum distance to a known solar-system object [arcsec]. Default 20.
    ///     min_gal_lat: Minimum |galactic latitude| [deg]; <= 0 disables. Default 0.
    ///     ps1_sgveto_rad: PS1 star veto radius [arcsec]. Default 2.
    ///     ps1_sgveto_th: PS1 star veto sgscore threshold. Default 0.8.
    ///     ps1_confusion_rad: PS1 confusion radius [arcsec]. Default 1.
    ///     ps1_confusion_sg_tol: PS1 confusion sgscore tolerance around 0.5. Default 0.5.
    ///
    /// Raises:
    ///     ValueError: if a threshold is out of range.
    #[new]
    #[pyo3(signature = (
        min_ndet = 2,
        min_tspan = 0.02,
        max_tspan = 25.0,
        min_archive_tspan = 0.0,
        max_archive_tspan = 1e5,
        min_drb = 0.0,
        min_rb = 0.3,
        max_fwhm = 5.0,
        max_elong = 1.4,
        max_magdiff = 0.4,
        max_nbad = 0,
        min_sso_dist = 20.0,
        min_gal_lat = 0.0,
        ps1_sgveto_rad = 2.0,
        ps1_sgveto_th = 0.8,
        ps1_confusion_rad = 1.0,
        ps1_confusion_sg_tol = 0.5,
    ))]
    fn new(
        min_ndet: usize,
        min_tspan: f64,
        max_tspan: f64,
        min_archive_tspan: f64,
        max_archive_tspan: f64,
        min_drb: f64,
        min_rb: f64,
        max_fwhm: f64,
        max_elong: f64,
        max_magdiff: f64,
        max_nbad: i64,
        min_sso_dist: f64,
        min_gal_lat: f64,
        ps1_sgveto_rad: f64,
        ps1_sgveto_th: f64,
        ps1_confusion_rad: f64,
        ps1_confusion_sg_tol: f64,
    ) -> PyResult<Self> {
        let config = FilterConfig {
            min_ndet,
            min_tspan,
            max_tspan,
            min_archive_tspan,
            max_archive_tspan,
            min_drb,
            min_rb,
            max_fwhm,
            max_elong,
            max_magdiff,
            max_nbad,
            min_sso_dist,
            min_gal_lat,
            ps1_sgveto_rad,
            ps1_sgveto_th,
            ps1_confusion_rad,
            ps1_confusion_sg_tol,
        };
        let inner = DecentFilter::new(config)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(PyDecentFilter { inner })
    }

    /// Thresholds in use, as a dict.
    #[getter]
    fn config<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let c = self.inner.config();
        let dict = PyDict::new(py);
        dict.set_item("min_ndet", c.min_ndet)?;
        dict.set_item("min_tspan", c.min_tspan)?;
        dict.set_item("max_tspan", c.max_tspan)?;
        dict.set_item("min_archive_tspan", c.min_archive_tspan)?;
        dict.set_item("max_archive_tspan", c.max_archive_tspan)?;
        dict.set_item("min_drb", c.min_drb)?;
        dict.set_item("min_rb", c.min_rb)?;
        dict.set_item("max_fwhm", c.max_fwhm)?;
        dict.set_item("max_elong", c.max_elong)?;
        dict.set_item("max_magdiff", c.max_magdiff)?;
        dict.set_item("max_nbad", c.max_nbad)?;
        dict.set_item("min_sso_dist", c.min_sso_dist)?;
        dict.set_item("min_gal_lat", c.min_gal_lat)?;
        dict.set_item("ps1_sgveto_rad", c.ps1_sgveto_rad)?;
        dict.set_item("ps1_sgveto_th", c.ps1_sgveto_th)?;
        dict.set_item("ps1_confusion_rad", c.ps1_confusion_rad)?;
        dict.set_item("ps1_confusion_sg_tol", c.ps1_confusion_sg_tol)?;
        Ok(dict)
    }

    /// Keys the latest datapoint must carry.
    fn required_keys(&self) -> Vec<&'static str> {
        self.inner.required_keys().iter().map(|k| k.name()).collect()
    }

    /// Decide on an alert.
    ///
    /// Args:
    ///     datapoints: list of datapoint dicts, most recent first.
    ///     tran_id: Optional transient id (int or str), used in log messages.
    ///
    /// Returns:
    ///     Verdict
    #[pyo3(signature = (datapoints, tran_id = None))]
    fn evaluate(
        &self,
        datapoints: &Bound<'_, PyAny>,
        tran_id: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<PyVerdict> {
        let alert = parse_alert(datapoints, tran_id)?;
        Ok(PyVerdict {
            inner: self.inner.evaluate(&alert),
        })
    }

    /// Decide on an alert and log the outcome. Returns True if accepted.
    #[pyo3(signature = (datapoints, tran_id = None))]
    fn process(
        &self,
        datapoints: &Bound<'_, PyAny>,
        tran_id: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<bool> {
        let alert = parse_alert(datapoints, tran_id)?;
        Ok(self.inner.process(&alert))
    }

    fn __repr__(&self) -> String {
        let c = self.inner.config();
        format!(
            "DecentFilter(min_ndet={}, min_rb={}, min_gal_lat={})",
            c.min_ndet, c.min_rb, c.min_gal_lat
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Free functions
// ═══════════════════════════════════════════════════════════════════════════

/// Galactic latitude in degrees of an ICRS position given in degrees.
///
/// Raises:
///     ValueError: for non-finite input or |dec| > 90.
#[pyfunction]
fn galactic_latitude(ra_deg: f64, dec_deg: f64) -> PyResult<f64> {
    decentfilter::galactic_latitude(ra_deg, dec_deg)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════
// Module definition
// ═══════════════════════════════════════════════════════════════════════════

/// decentfilter_rs: transient alert admission filter
#[pymodule]
fn decentfilter_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDecentFilter>()?;
    m.add_class::<PyVerdict>()?;
    m.add_function(wrap_pyfunction!(galactic_latitude, m)?)?;
    Ok(())
}

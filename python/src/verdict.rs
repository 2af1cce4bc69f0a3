use pyo3::prelude::*;

use decentfilter::Verdict;

/// Outcome of filtering one alert.
///
/// Truthy when the alert was accepted.
///
/// Attributes:
///     accepted: True if the alert passed every cut.
///     reason: Diagnostic key of the failing cut ('nDet', 'tSpan', 'rb', ...),
///         or None when accepted.
///     key: Datapoint key the rejection is about, if any.
///     value: Offending numeric value, if any.
///     candid: Candidate id of the latest datapoint when accepted.
///     message: Human-readable description of the rejection.
#[pyclass(name = "Verdict", frozen)]
pub(crate) struct PyVerdict {
    pub(crate) inner: Verdict,
}

#[pymethods]
impl PyVerdict {
    #[getter]
    fn accepted(&self) -> bool {
        self.inner.is_accepted()
    }

    #[getter]
    fn reason(&self) -> Option<&'static str> {
        self.inner.reason()
    }

    #[getter]
    fn key(&self) -> Option<&'static str> {
        self.inner.rejection().and_then(|r| r.key()).map(|k| k.name())
    }

    #[getter]
    fn value(&self) -> Option<f64> {
        self.inner.rejection().and_then(|r| r.value())
    }

    #[getter]
    fn candid(&self) -> Option<u64> {
        match &self.inner {
            Verdict::Accept { candid } => *candid,
            Verdict::Reject(_) => None,
        }
    }

    #[getter]
    fn message(&self) -> Option<String> {
        self.inner.rejection().map(|r| r.to_string())
    }

    fn __bool__(&self) -> bool {
        self.inner.is_accepted()
    }

    fn __repr__(&self) -> String {
        match &self.inner {
            Verdict::Accept { candid } => match candid {
                Some(c) => format!("Verdict(accepted=True, candid={c})"),
                None => "Verdict(accepted=True)".to_string(),
            },
            Verdict::Reject(r) => match r.value() {
                Some(v) => format!("Verdict(accepted=False, reason='{}', value={v})", r.reason()),
                None => format!("Verdict(accepted=False, reason='{}')", r.reason()),
            },
        }
    }
}

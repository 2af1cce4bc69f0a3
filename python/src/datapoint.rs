use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use decentfilter::{integral_count, Alert, Datapoint, Entry, TranId};

fn float_entry(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Entry<f64>> {
    Ok(match dict.get_item(key)? {
        None => Entry::Absent,
        Some(v) if v.is_none() => Entry::Null,
        Some(v) => Entry::Present(v.extract::<f64>()?),
    })
}

/// Integer counts from dataframes often arrive as floats (`0.0`).
fn count_entry(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Entry<i64>> {
    let Some(v) = dict.get_item(key)? else {
        return Ok(Entry::Absent);
    };
    if v.is_none() {
        return Ok(Entry::Null);
    }
    if let Ok(n) = v.extract::<i64>() {
        return Ok(Entry::Present(n));
    }
    let x = v.extract::<f64>()?;
    match integral_count(x) {
        Some(n) => Ok(Entry::Present(n)),
        None => Err(PyTypeError::new_err(format!(
            "'{key}' must be an integer count, got {x}"
        ))),
    }
}

fn uint_entry(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Entry<u64>> {
    Ok(match dict.get_item(key)? {
        None => Entry::Absent,
        Some(v) if v.is_none() => Entry::Null,
        Some(v) => Entry::Present(v.extract::<u64>()?),
    })
}

/// `isdiffpos` shows up as "t"/"f", "1"/"0", integers or booleans depending
/// on the alert producer. Normalize to the string form.
fn isdiffpos_entry(dict: &Bound<'_, PyDict>) -> PyResult<Entry<String>> {
    let Some(v) = dict.get_item("isdiffpos")? else {
        return Ok(Entry::Absent);
    };
    if v.is_none() {
        return Ok(Entry::Null);
    }
    if let Ok(s) = v.extract::<String>() {
        return Ok(Entry::Present(s));
    }
    if let Ok(b) = v.extract::<bool>() {
        return Ok(Entry::Present(if b { "t" } else { "f" }.to_string()));
    }
    let i = v.extract::<i64>()?;
    Ok(Entry::Present(i.to_string()))
}

/// Convert one datapoint dict into a `Datapoint`.
pub(crate) fn parse_datapoint(dict: &Bound<'_, PyDict>) -> PyResult<Datapoint> {
    let jd = match dict.get_item("jd")? {
        Some(v) if !v.is_none() => v.extract::<f64>()?,
        _ => {
            return Err(pyo3::exceptions::PyKeyError::new_err(
                "every datapoint needs a non-null 'jd'",
            ))
        }
    };
    Ok(Datapoint {
        jd,
        magpsf: float_entry(dict, "magpsf")?,
        isdiffpos: isdiffpos_entry(dict)?,
        rb: float_entry(dict, "rb")?,
        drb: float_entry(dict, "drb")?,
        fwhm: float_entry(dict, "fwhm")?,
        elong: float_entry(dict, "elong")?,
        nbad: count_entry(dict, "nbad")?,
        magdiff: float_entry(dict, "magdiff")?,
        distpsnr1: float_entry(dict, "distpsnr1")?,
        sgscore1: float_entry(dict, "sgscore1")?,
        distpsnr2: float_entry(dict, "distpsnr2")?,
        sgscore2: float_entry(dict, "sgscore2")?,
        distpsnr3: float_entry(dict, "distpsnr3")?,
        sgscore3: float_entry(dict, "sgscore3")?,
        ssdistnr: float_entry(dict, "ssdistnr")?,
        ra: float_entry(dict, "ra")?,
        dec: float_entry(dict, "dec")?,
        jdstarthist: float_entry(dict, "jdstarthist")?,
        jdendhist: float_entry(dict, "jdendhist")?,
        candid: uint_entry(dict, "candid")?,
    })
}

fn parse_tran_id(tran_id: Option<&Bound<'_, PyAny>>) -> PyResult<Option<TranId>> {
    let Some(obj) = tran_id else {
        return Ok(None);
    };
    if obj.is_none() {
        return Ok(None);
    }
    if let Ok(id) = obj.extract::<i64>() {
        return Ok(Some(TranId::Int(id)));
    }
    Ok(Some(TranId::Name(obj.str()?.to_string())))
}

/// Build an alert from a list of datapoint dicts, most recent first.
pub(crate) fn parse_alert(
    datapoints: &Bound<'_, PyAny>,
    tran_id: Option<&Bound<'_, PyAny>>,
) -> PyResult<Alert> {
    let list = datapoints.cast::<PyList>().map_err(|_| {
        PyTypeError::new_err("datapoints must be a list of dicts")
    })?;
    let datapoints = list
        .iter()
        .map(|item| {
            let dict = item.cast::<PyDict>().map_err(|_| {
                PyTypeError::new_err("each datapoint must be a dict")
            })?;
            parse_datapoint(dict)
        })
        .collect::<PyResult<Vec<Datapoint>>>()?;
    Ok(Alert::new(parse_tran_id(tran_id)?, datapoints))
}

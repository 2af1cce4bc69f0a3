//! Shared helpers to build synthetic alerts for the integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::Rng;

use decentfilter::{Alert, Datapoint, Entry, Key, TranId};

/// Julian date of the most recent datapoint in synthetic alerts.
pub const JD_LATEST: f64 = 2459005.5;

/// The "Scenario A" datapoint: a clean, positive, isolated detection at high
/// galactic latitude.
pub fn clean_detection(jd: f64) -> Datapoint {
    Datapoint {
        magpsf: Entry::Present(18.7),
        isdiffpos: Entry::Present("t".to_string()),
        rb: Entry::Present(0.5),
        drb: Entry::Present(0.0),
        fwhm: Entry::Present(2.0),
        elong: Entry::Present(1.1),
        nbad: Entry::Present(0),
        magdiff: Entry::Present(0.1),
        distpsnr1: Entry::Present(50.0),
        sgscore1: Entry::Present(0.0),
        distpsnr2: Entry::Present(50.0),
        sgscore2: Entry::Present(0.0),
        distpsnr3: Entry::Present(50.0),
        sgscore3: Entry::Present(0.0),
        ssdistnr: Entry::Present(-1.0),
        // Near the north galactic pole.
        ra: Entry::Present(192.0),
        dec: Entry::Present(27.0),
        candid: Entry::Present(1_200_000_000_000_000_000 + jd as u64),
        ..Datapoint::at(jd)
    }
}

/// Three clean detections spanning five days, most recent first.
pub fn scenario_a() -> Alert {
    Alert::new(
        Some(TranId::Name("ZTF20aaexample".to_string())),
        vec![
            clean_detection(JD_LATEST),
            clean_detection(JD_LATEST - 2.5),
            clean_detection(JD_LATEST - 5.0),
        ],
    )
}

/// Replace the latest datapoint of `alert` with `f(latest)`.
pub fn with_latest(mut alert: Alert, f: impl FnOnce(&mut Datapoint)) -> Alert {
    if let Some(latest) = alert.datapoints.first_mut() {
        f(latest);
    }
    alert
}

/// Mark `key` as absent in `dp`.
pub fn remove_key(dp: &mut Datapoint, key: Key) {
    match key {
        Key::Jd => {}
        Key::Magpsf => dp.magpsf = Entry::Absent,
        Key::Isdiffpos => dp.isdiffpos = Entry::Absent,
        Key::Rb => dp.rb = Entry::Absent,
        Key::Drb => dp.drb = Entry::Absent,
        Key::Fwhm => dp.fwhm = Entry::Absent,
        Key::Elong => dp.elong = Entry::Absent,
        Key::Nbad => dp.nbad = Entry::Absent,
        Key::Magdiff => dp.magdiff = Entry::Absent,
        Key::Distpsnr1 => dp.distpsnr1 = Entry::Absent,
        Key::Sgscore1 => dp.sgscore1 = Entry::Absent,
        Key::Distpsnr2 => dp.distpsnr2 = Entry::Absent,
        Key::Sgscore2 => dp.sgscore2 = Entry::Absent,
        Key::Distpsnr3 => dp.distpsnr3 = Entry::Absent,
        Key::Sgscore3 => dp.sgscore3 = Entry::Absent,
        Key::Ssdistnr => dp.ssdistnr = Entry::Absent,
        Key::Ra => dp.ra = Entry::Absent,
        Key::Dec => dp.dec = Entry::Absent,
        Key::Jdstarthist => dp.jdstarthist = Entry::Absent,
        Key::Jdendhist => dp.jdendhist = Entry::Absent,
        Key::Candid => dp.candid = Entry::Absent,
    }
}

/// A detection with every filtered quantity drawn at random over (and a bit
/// beyond) its physical range.
pub fn random_detection(rng: &mut StdRng, jd: f64) -> Datapoint {
    let isdiffpos = ["t", "f", "1", "0"][rng.random_range(0..4)];
    let archive = rng.random_bool(0.5);
    Datapoint {
        magpsf: Entry::Present(rng.random_range(14.0..21.5)),
        isdiffpos: Entry::Present(isdiffpos.to_string()),
        rb: Entry::Present(rng.random_range(0.0..1.0)),
        drb: Entry::Present(rng.random_range(0.0..1.0)),
        fwhm: Entry::Present(rng.random_range(0.5..8.0)),
        elong: Entry::Present(rng.random_range(1.0..2.0)),
        nbad: Entry::Present(rng.random_range(0..5)),
        magdiff: Entry::Present(rng.random_range(-0.8..0.8)),
        distpsnr1: Entry::Present(rng.random_range(0.0..30.0)),
        sgscore1: Entry::Present(rng.random_range(0.0..1.0)),
        distpsnr2: Entry::Present(rng.random_range(0.0..30.0)),
        sgscore2: Entry::Present(rng.random_range(0.0..1.0)),
        distpsnr3: Entry::Present(rng.random_range(0.0..30.0)),
        sgscore3: Entry::Present(rng.random_range(0.0..1.0)),
        ssdistnr: Entry::Present(if rng.random_bool(0.5) {
            -999.0
        } else {
            rng.random_range(0.0..100.0)
        }),
        ra: Entry::Present(rng.random_range(0.0..360.0)),
        dec: Entry::Present(rng.random_range(-90.0..90.0)),
        jdstarthist: if archive {
            Entry::Present(jd - rng.random_range(0.0..2000.0))
        } else {
            Entry::Absent
        },
        jdendhist: if archive {
            Entry::Present(jd)
        } else {
            Entry::Absent
        },
        candid: Entry::Present(rng.random::<u64>()),
        ..Datapoint::at(jd)
    }
}

/// An alert with `ndet` random detections over `tspan` days, latest first,
/// interleaved with upper limits.
pub fn random_alert(rng: &mut StdRng, ndet: usize, tspan: f64) -> Alert {
    let mut datapoints = Vec::with_capacity(2 * ndet);
    for i in 0..ndet {
        let jd = if ndet > 1 {
            JD_LATEST - tspan * i as f64 / (ndet - 1) as f64
        } else {
            JD_LATEST
        };
        datapoints.push(random_detection(rng, jd));
        if i + 1 < ndet && rng.random_bool(0.3) {
            datapoints.push(Datapoint::at(jd - 1e-3));
        }
    }
    Alert::new(Some(TranId::Int(rng.random_range(0..1_000_000))), datapoints)
}

//! Equatorial (ICRS) to galactic coordinate transform.
//!
//! The galactic frame is reached by a fixed rotation of the ICRS unit vector.
//! The matrix below is the one adopted for the Hipparcos catalogue
//! (ESA SP-1200, Vol. 1, Sect. 1.5.3), which ties the IAU 1958 galactic pole
//! and node to ICRS axes. Row 3 is the north galactic pole direction, so the
//! galactic latitude is simply `asin(ngp · u)`.

use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

/// Rows are the galactic x, y, z axes expressed in ICRS.
const ICRS_TO_GALACTIC: [[f64; 3]; 3] = [
    [-0.054_875_560_4, -0.873_437_090_2, -0.483_835_015_5],
    [0.494_109_427_9, -0.444_829_630_0, 0.746_982_244_5],
    [-0.867_666_149_0, -0.198_076_373_4, 0.455_983_776_2],
];

/// Failure of the coordinate transform.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    #[error("non-finite coordinates: ra={ra}, dec={dec}")]
    NonFinite { ra: f64, dec: f64 },

    #[error("declination {0} outside [-90, 90]")]
    DeclinationOutOfRange(f64),
}

/// Signature of a galactic-latitude provider: `(ra_deg, dec_deg) -> b_deg`.
pub type LatitudeFn = fn(f64, f64) -> Result<f64, TransformError>;

fn icrs_to_galactic_matrix() -> Matrix3<f64> {
    let m = ICRS_TO_GALACTIC;
    Matrix3::new(
        m[0][0], m[0][1], m[0][2], //
        m[1][0], m[1][1], m[1][2], //
        m[2][0], m[2][1], m[2][2],
    )
}

/// Unit vector on the celestial sphere for a position given in degrees.
fn radec_to_uvec(ra_deg: f64, dec_deg: f64) -> Vector3<f64> {
    let (rasin, racos) = ra_deg.to_radians().sin_cos();
    let (decsin, deccos) = dec_deg.to_radians().sin_cos();
    Vector3::new(deccos * racos, deccos * rasin, decsin)
}

fn check_input(ra_deg: f64, dec_deg: f64) -> Result<(), TransformError> {
    if !ra_deg.is_finite() || !dec_deg.is_finite() {
        return Err(TransformError::NonFinite {
            ra: ra_deg,
            dec: dec_deg,
        });
    }
    if dec_deg.abs() > 90.0 {
        return Err(TransformError::DeclinationOutOfRange(dec_deg));
    }
    Ok(())
}

/// Galactic latitude in degrees of an ICRS position.
pub fn galactic_latitude(ra_deg: f64, dec_deg: f64) -> Result<f64, TransformError> {
    check_input(ra_deg, dec_deg)?;
    let g = icrs_to_galactic_matrix() * radec_to_uvec(ra_deg, dec_deg);
    Ok(g.z.clamp(-1.0, 1.0).asin().to_degrees())
}

//! Vetoes based on the three nearest Pan-STARRS1 sources listed in the alert.

/// Distances [arcsec] and star/galaxy scores of the three nearest PS1
/// sources, nearest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ps1Neighbours {
    pub distpsnr: [f64; 3],
    pub sgscore: [f64; 3],
}

impl Ps1Neighbours {
    /// Star-like source in the immediate vicinity of the transient.
    pub fn is_star(&self, sgveto_rad: f64, sgveto_th: f64) -> bool {
        self.distpsnr[0] < sgveto_rad && self.sgscore[0] > sgveto_th
    }

    /// Largest distance among the three sources. Reported with a confusion
    /// veto, never compared against.
    pub fn max_distance(&self) -> f64 {
        self.distpsnr.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Largest distance of a star/galaxy score from the ambiguous 0.5.
    pub fn max_sg_offset(&self) -> f64 {
        self.sgscore
            .iter()
            .map(|sg| (sg - 0.5).abs())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// All three sources are very close and none is clearly a star or a
    /// galaxy. Such crowding induces subtraction artifacts.
    ///
    /// Each source is compared on its own, so a NaN distance or score keeps
    /// the veto from firing.
    pub fn is_confused(&self, confusion_rad: f64, sg_tol: f64) -> bool {
        let very_close = self.distpsnr.iter().all(|&d| d < confusion_rad);
        let sg_confused = self.sgscore.iter().all(|&sg| (sg - 0.5).abs() < sg_tol);
        very_close && sg_confused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbours(distpsnr: [f64; 3], sgscore: [f64; 3]) -> Ps1Neighbours {
        Ps1Neighbours { distpsnr, sgscore }
    }

    #[test]
    fn test_star_veto() {
        assert!(neighbours([1.0, 5.0, 9.0], [0.9, 0.0, 0.0]).is_star(2.0, 0.8));
        // Boundaries are strict.
        assert!(!neighbours([2.0, 5.0, 9.0], [0.9, 0.0, 0.0]).is_star(2.0, 0.8));
        assert!(!neighbours([1.0, 5.0, 9.0], [0.8, 0.0, 0.0]).is_star(2.0, 0.8));
        // Only the nearest source counts.
        assert!(!neighbours([3.0, 1.0, 1.0], [0.1, 1.0, 1.0]).is_star(2.0, 0.8));
    }

    #[test]
    fn test_confusion_veto() {
        let n = neighbours([0.5, 0.6, 0.7], [0.55, 0.48, 0.52]);
        assert!((n.max_distance() - 0.7).abs() < 1e-12);
        assert!((n.max_sg_offset() - 0.05).abs() < 1e-12);
        assert!(n.is_confused(1.0, 0.1));
        assert!(!n.is_confused(0.7, 0.1));
        assert!(!n.is_confused(1.0, 0.05));
    }

    #[test]
    fn test_confusion_needs_all_three_close() {
        let n = neighbours([0.5, 0.6, 30.0], [0.5, 0.5, 0.5]);
        assert!(!n.is_confused(1.0, 0.5));
    }

    #[test]
    fn test_nan_never_triggers_confusion() {
        for slot in 0..3 {
            let mut distpsnr = [0.5, 0.6, 0.7];
            distpsnr[slot] = f64::NAN;
            let n = neighbours(distpsnr, [0.3, 0.3, 0.3]);
            assert!(!n.is_confused(1.0, 0.5), "NaN distance in slot {slot}");

            let mut sgscore = [0.3, 0.3, 0.3];
            sgscore[slot] = f64::NAN;
            let n = neighbours([0.5, 0.6, 0.7], sgscore);
            assert!(!n.is_confused(1.0, 0.5), "NaN score in slot {slot}");
        }
    }

    #[test]
    fn test_default_tolerance_accepts_almost_any_score() {
        // With a tolerance of 0.5 only pure 0 or 1 scores escape the veto.
        let n = neighbours([0.1, 0.2, 0.3], [0.01, 0.99, 0.3]);
        assert!(n.is_confused(1.0, 0.5));
        let n = neighbours([0.1, 0.2, 0.3], [0.0, 0.99, 0.3]);
        assert!(!n.is_confused(1.0, 0.5));
    }
}

//! Physical unit conversions.
//!
//! Geometry inside the layout engine is kept in inches, user-facing paddings
//! are expressed in points.

pub const MM_PER_INCH: f64 = 25.4;
pub const PTS_PER_INCH: f64 = 72.0;
pub const PTS_PER_MM: f64 = PTS_PER_INCH / MM_PER_INCH;

pub fn pts_to_inches(pts: f64) -> f64 {
    pts / PTS_PER_INCH
}

pub fn inches_to_pts(inches: f64) -> f64 {
    inches * PTS_PER_INCH
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_round_trip_conversions() {
        assert_approx_eq!(f64, inches_to_pts(pts_to_inches(10.0)), 10.0);
        assert_approx_eq!(f64, mm_to_inches(25.4), 1.0);
        assert_approx_eq!(f64, PTS_PER_MM * MM_PER_INCH, PTS_PER_INCH);
    }
}

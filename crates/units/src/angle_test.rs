mod tests {
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    use crate::angle::{Angle, ARCSEC_PER_RADIAN};

    #[test]
    fn test_angle_conversions() {
        let half_turn = Angle::from_degrees(180.0);
        assert_relative_eq!(half_turn.to_radians(), PI);

        let arcsec = Angle::from_arcsec(1.0);
        assert_relative_eq!(arcsec.to_radians(), 1.0 / ARCSEC_PER_RADIAN);
        assert_relative_eq!(arcsec.to_mas(), 1_000.0);

        let wa = Angle::from_mas(75.0);
        assert_relative_eq!(wa.to_arcsec(), 0.075);
    }

    #[test]
    fn test_angle_trig_and_ordering() {
        let right = Angle::from_degrees(90.0);
        assert_relative_eq!(right.sin(), 1.0);
        assert_relative_eq!(right.cos(), 0.0, epsilon = 1e-15);

        let a = Angle::from_mas(100.0);
        let b = Angle::from_mas(250.0);
        assert_relative_eq!(a.min(b).to_mas(), 100.0);
        assert_relative_eq!(a.max(b).to_mas(), 250.0);
        assert!(a < b);
    }

    #[test]
    fn test_angle_arithmetic() {
        let a = Angle::from_degrees(30.0);
        let b = Angle::from_degrees(15.0);

        assert_relative_eq!((a + b).to_degrees(), 45.0);
        assert_relative_eq!((a - b).to_degrees(), 15.0);
        assert_relative_eq!((a * 2.0).to_degrees(), 60.0);
        assert_relative_eq!(a / b, 2.0);
    }
}

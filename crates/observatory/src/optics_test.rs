mod tests {
    use approx::assert_relative_eq;
    use units::{Angle, Length, Mass, Time};

    use catalog::Star;

    use crate::modes::ObservingMode;
    use crate::optics::{CoronagraphOptics, OpticalModel};

    fn fixture_star() -> Star {
        Star::new(
            "FIX",
            Angle::zero(),
            Angle::zero(),
            Length::from_parsecs(10.0),
            5.0,
            Mass::from_solar_masses(1.0),
            0.2,
        )
    }

    fn fixture_mode() -> ObservingMode {
        ObservingMode {
            name: "imaging".into(),
            detection: true,
            spectroscopy: false,
            iwa: Angle::from_mas(75.0),
            owa: Angle::from_mas(750.0),
            bandwidth: 0.2,
            snr: 5.0,
            d_mag_limit: 22.5,
            time_multiplier: 1.1,
            overhead: Time::from_days(0.2),
            int_cutoff: Time::from_days(50.0),
        }
    }

    #[test]
    fn test_snr_inversion_round_trip() {
        let optics = CoronagraphOptics::demo();
        let star = fixture_star();
        let mode = fixture_mode();
        let (f_z, f_ez, d_mag, wa) = (1e-8, 1.5e-7, 20.0, Angle::from_mas(150.0));

        let t = optics
            .integration_time(&star, f_z, f_ez, d_mag, wa, &mode)
            .expect("target should be reachable");
        let rates = optics.photon_counts(&star, f_z, f_ez, d_mag, wa, &mode);

        let t_d = t.to_days();
        let snr = rates.planet * t_d / (rates.background * t_d + (rates.speckle * t_d).powi(2)).sqrt();
        assert_relative_eq!(snr, mode.snr, epsilon = 1e-9);
    }

    #[test]
    fn test_fainter_planets_need_longer() {
        let optics = CoronagraphOptics::demo();
        let star = fixture_star();
        let mode = fixture_mode();
        let wa = Angle::from_mas(150.0);

        let bright = optics
            .integration_time(&star, 1e-8, 1.5e-7, 19.0, wa, &mode)
            .unwrap();
        let faint = optics
            .integration_time(&star, 1e-8, 1.5e-7, 21.0, wa, &mode)
            .unwrap();
        assert!(faint > bright);
    }

    #[test]
    fn test_speckle_floor_is_unreachable() {
        let optics = CoronagraphOptics::demo();
        let star = fixture_star();
        let mode = fixture_mode();

        // A planet far below the contrast floor can never reach the SNR
        // target: the systematic term wins.
        let t = optics.integration_time(&star, 1e-8, 1.5e-7, 28.0, Angle::from_mas(150.0), &mode);
        assert!(t.is_none());
    }

    #[test]
    fn test_max_integration_time_matches_limit() {
        let optics = CoronagraphOptics::demo();
        let star = fixture_star();
        let mode = fixture_mode();

        let at_limit = optics
            .integration_time(&star, 1e-8, 1.5e-7, mode.d_mag_limit, mode.iwa, &mode)
            .unwrap();
        let max = optics
            .max_integration_time(&star, 1e-8, 1.5e-7, &mode)
            .unwrap();
        assert_relative_eq!(max.to_days(), at_limit.to_days());
    }
}

mod tests {
    use approx::assert_relative_eq;
    use units::Time;

    use crate::timekeeping::{MissionClock, ObservingBlock};

    fn block(start: f64, end: f64) -> ObservingBlock {
        ObservingBlock {
            start: Time::from_days(start),
            end: Time::from_days(end),
        }
    }

    fn make_clock(life: f64, portion: f64, blocks: Vec<ObservingBlock>) -> MissionClock {
        MissionClock::new(Time::zero(), Time::from_days(life), portion, blocks)
            .expect("valid schedule")
    }

    #[test]
    fn test_auto_blocks_single() {
        let blocks = MissionClock::auto_blocks(
            Time::from_days(100.0),
            0.1,
            Some(Time::from_days(10.0)),
        );
        assert_eq!(blocks.len(), 1);
        assert_relative_eq!(blocks[0].start.to_days(), 0.0);
        assert_relative_eq!(blocks[0].end.to_days(), 10.0);
    }

    #[test]
    fn test_auto_blocks_two() {
        let blocks = MissionClock::auto_blocks(
            Time::from_days(100.0),
            0.2,
            Some(Time::from_days(10.0)),
        );
        assert_eq!(blocks.len(), 2);
        assert_relative_eq!(blocks[0].start.to_days(), 0.0);
        assert_relative_eq!(blocks[0].end.to_days(), 10.0);
        assert_relative_eq!(blocks[1].start.to_days(), 50.0);
        assert_relative_eq!(blocks[1].end.to_days(), 60.0);
    }

    #[test]
    fn test_auto_blocks_without_duration_span_the_mission() {
        let blocks = MissionClock::auto_blocks(Time::from_days(365.0), 0.5, None);
        assert_eq!(blocks.len(), 1);
        assert_relative_eq!(blocks[0].start.to_days(), 0.0);
        assert_relative_eq!(blocks[0].end.to_days(), 365.0);
    }

    #[test]
    fn test_schedule_validation() {
        let bad_order = MissionClock::new(
            Time::zero(),
            Time::from_days(100.0),
            0.5,
            vec![block(0.0, 20.0), block(10.0, 30.0)],
        );
        assert!(bad_order.is_err());

        let bad_window = MissionClock::new(
            Time::zero(),
            Time::from_days(100.0),
            0.5,
            vec![block(10.0, 10.0)],
        );
        assert!(bad_window.is_err());

        let empty = MissionClock::new(Time::zero(), Time::from_days(100.0), 0.5, vec![]);
        assert!(empty.is_err());
    }

    #[test]
    fn test_allocate_rejects_non_positive_durations() {
        let mut clock = make_clock(365.0, 1.0, vec![block(0.0, 365.0)]);
        let before = clock.clone();

        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(!clock.allocate_time(Time::from_days(dt), true));
            assert_eq!(clock, before);
            assert!(!clock.allocate_time(Time::from_days(dt), false));
            assert_eq!(clock, before);
        }
    }

    #[test]
    fn test_allocate_rejects_exceeding_mission_life() {
        let mut clock = make_clock(365.0, 1.0, vec![block(0.0, 365.0)]);
        assert!(clock.allocate_time(Time::from_days(364.0), false));
        let before = clock.clone();

        assert!(!clock.allocate_time(Time::from_days(2.0), true));
        assert_eq!(clock, before);
        assert!(!clock.allocate_time(Time::from_days(2.0), false));
        assert_eq!(clock, before);
    }

    #[test]
    fn test_allocate_rejects_exceeding_observing_block() {
        let mut clock = make_clock(365.0, 1.0, vec![block(0.0, 20.0), block(100.0, 120.0)]);
        assert!(clock.allocate_time(Time::from_days(19.0), false));
        let before = clock.clone();

        assert!(!clock.allocate_time(Time::from_days(2.0), true));
        assert_eq!(clock, before);
        assert!(!clock.allocate_time(Time::from_days(2.0), false));
        assert_eq!(clock, before);
    }

    #[test]
    fn test_allocate_rejects_exceeding_obs_budget_only_when_charged() {
        // Budget is 2 days; park the clock one day short of it
        let mut clock = make_clock(10.0, 0.2, vec![block(0.0, 10.0)]);
        assert!(clock.allocate_time(Time::from_days(1.0), true));
        let before = clock.clone();

        // Charged allocation would exceed the budget: no effect
        assert!(!clock.allocate_time(Time::from_days(2.0), true));
        assert_eq!(clock, before);

        // Uncharged allocation of the same duration advances the clock but
        // not the budget
        assert!(clock.allocate_time(Time::from_days(2.0), false));
        assert_relative_eq!(clock.current_time_norm().to_days(), 3.0);
        assert_relative_eq!(clock.exoplanet_obs_time().to_days(), 1.0);
    }

    #[test]
    fn test_allocate_success_moves_all_fields_together() {
        let mut clock = make_clock(20.0, 1.0, vec![block(0.0, 20.0)]);

        assert!(clock.allocate_time(Time::from_days(2.0), true));
        assert_relative_eq!(clock.current_time_abs().to_days(), 2.0);
        assert_relative_eq!(clock.current_time_norm().to_days(), 2.0);
        assert_relative_eq!(clock.exoplanet_obs_time().to_days(), 2.0);

        assert!(clock.allocate_time(Time::from_days(2.0), false));
        assert_relative_eq!(clock.current_time_abs().to_days(), 4.0);
        assert_relative_eq!(clock.current_time_norm().to_days(), 4.0);
        assert_relative_eq!(clock.exoplanet_obs_time().to_days(), 2.0);
    }

    #[test]
    fn test_mission_is_over_conditions() {
        // Fresh mission: not over
        let clock = make_clock(36.5, 1.0, vec![block(0.0, 36.5)]);
        assert!(!clock.mission_is_over());

        // Observation budget spent
        let mut clock = clock_fixture_budget();
        assert!(clock.allocate_time(Time::from_days(5.0), true));
        assert!(clock.mission_is_over());

        // Mission life reached
        let mut clock = make_clock(10.0, 1.0, vec![block(0.0, 10.0)]);
        assert!(clock.allocate_time(Time::from_days(10.0), false));
        assert!(clock.mission_is_over());

        // Current block exhausted with no further block
        let mut clock = make_clock(100.0, 1.0, vec![block(0.0, 10.0)]);
        assert!(clock.allocate_time(Time::from_days(10.0), false));
        assert!(clock.mission_is_over());

        // Current block exhausted but a further block exists: not over
        let mut clock = make_clock(100.0, 1.0, vec![block(0.0, 10.0), block(50.0, 60.0)]);
        assert!(clock.allocate_time(Time::from_days(10.0), false));
        assert!(!clock.mission_is_over());
    }

    fn clock_fixture_budget() -> MissionClock {
        // Budget of 5 days over a 10-day life
        make_clock(10.0, 0.5, vec![block(0.0, 10.0)])
    }

    #[test]
    fn test_advance_to_next_observing_block() {
        // duration 15 d at portion 0.6: block starts spaced 25 d apart
        let life = Time::from_years(2.0);
        let blocks = MissionClock::auto_blocks(life, 0.6, Some(Time::from_days(15.0)));
        let mut clock = MissionClock::new(Time::zero(), life, 0.6, blocks).unwrap();

        let norm_before = clock.current_time_norm();
        let abs_before = clock.current_time_abs();
        let ob_before = clock.ob_number();

        assert!(clock.advance_to_next_observing_block());
        assert_eq!(clock.ob_number(), ob_before + 1);
        assert_relative_eq!((clock.current_time_norm() - norm_before).to_days(), 25.0);
        assert_relative_eq!((clock.current_time_abs() - abs_before).to_days(), 25.0);
        assert_relative_eq!(clock.current_block().start.to_days(), 25.0);
    }

    #[test]
    fn test_advance_past_last_block_parks_the_clock() {
        let mut clock = make_clock(100.0, 1.0, vec![block(0.0, 10.0)]);
        assert!(clock.allocate_time(Time::from_days(3.0), false));

        assert!(!clock.advance_to_next_observing_block());
        assert_relative_eq!(clock.current_time_norm().to_days(), 10.0);
        assert!(clock.mission_is_over());
    }
}

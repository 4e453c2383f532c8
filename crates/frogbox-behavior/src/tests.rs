#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use frogbox_core::config::{CycleTimings, HoldRange};
    use frogbox_core::constants::DT;
    use frogbox_core::enums::{FrogClass, FrogColor};

    use crate::fsm::{evaluate, CycleContext};
    use crate::profiles::get_profile;

    fn make_context(color: FrogColor, elapsed: f64, hold: f64) -> CycleContext {
        CycleContext {
            class: color.class(),
            color,
            elapsed_secs: elapsed,
            hold_secs: hold,
            frozen: false,
            isolated: false,
            dt: DT,
        }
    }

    #[test]
    fn test_timer_advances_before_hold() {
        let ctx = make_context(FrogColor::Green, 0.5, 2.0);
        let update = evaluate(&ctx);
        assert!(!update.color_changed);
        assert_eq!(update.new_color, FrogColor::Green);
        assert!((update.new_elapsed_secs - (0.5 + DT)).abs() < 1e-12);
    }

    #[test]
    fn test_green_flips_to_red_at_hold() {
        let ctx = make_context(FrogColor::Green, 2.0 - DT / 2.0, 2.0);
        let update = evaluate(&ctx);
        assert!(update.color_changed);
        assert_eq!(update.new_color, FrogColor::Red);
        assert_eq!(update.new_elapsed_secs, 0.0);
    }

    #[test]
    fn test_yellow_black_cycle() {
        let update = evaluate(&make_context(FrogColor::Yellow, 3.0, 3.0));
        assert_eq!(update.new_color, FrogColor::Black);
        let update = evaluate(&make_context(FrogColor::Black, 3.0, 3.0));
        assert_eq!(update.new_color, FrogColor::Yellow);
    }

    #[test]
    fn test_frozen_suspends_timer_and_color() {
        let mut ctx = make_context(FrogColor::Red, 10.0, 1.0);
        ctx.frozen = true;
        let update = evaluate(&ctx);
        assert!(!update.color_changed);
        assert_eq!(update.new_color, FrogColor::Red);
        assert_eq!(update.new_elapsed_secs, 10.0, "Timer must not advance while frozen");

        // Unfrozen on the next check: flips immediately since the hold was already met.
        ctx.frozen = false;
        let update = evaluate(&ctx);
        assert!(update.color_changed);
        assert_eq!(update.new_color, FrogColor::Green);
    }

    #[test]
    fn test_isolated_suspends() {
        let mut ctx = make_context(FrogColor::Yellow, 0.2, 0.1);
        ctx.isolated = true;
        let update = evaluate(&ctx);
        assert!(!update.color_changed);
        assert_eq!(update.new_elapsed_secs, 0.2);
    }

    #[test]
    fn test_mismatched_class_is_left_alone() {
        let ctx = CycleContext {
            class: FrogClass::GreenRed,
            ..make_context(FrogColor::Yellow, 5.0, 1.0)
        };
        let update = evaluate(&ctx);
        assert!(!update.color_changed);
        assert_eq!(update.new_color, FrogColor::Yellow);
    }

    #[test]
    fn test_roll_hold_within_range() {
        let mut timings = CycleTimings::default();
        timings.red = HoldRange::new(1.0, 2.0);
        let profile = get_profile(FrogColor::Red, &timings);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let hold = profile.roll_hold(&mut rng);
            assert!((1.0..=2.0).contains(&hold), "hold {hold} out of range");
            let offset = profile.roll_initial_elapsed(&mut rng, hold);
            assert!(offset >= 0.0 && offset < hold);
        }
    }

    #[test]
    fn test_roll_hold_fixed_range() {
        let mut timings = CycleTimings::default();
        timings.black = HoldRange::new(2.5, 2.5);
        let profile = get_profile(FrogColor::Black, &timings);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(profile.roll_hold(&mut rng), 2.5);
    }
}

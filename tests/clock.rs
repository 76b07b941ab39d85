mod tests {
    use ornament_light_engine::{MillisClock, TICKS_PER_MS};

    fn tick_times(clock: &MillisClock, times: u32) {
        for _ in 0..times {
            clock.tick();
        }
    }

    #[test]
    fn test_prescaler_divides_interrupt_rate() {
        let clock = MillisClock::new();
        tick_times(&clock, u32::from(TICKS_PER_MS) - 1);
        assert_eq!(clock.now(), 0);
        clock.tick();
        assert_eq!(clock.now(), 1);
    }

    #[test]
    fn test_counter_wraps_at_16_bits() {
        let clock = MillisClock::new();
        clock.set(0xFFFF);
        tick_times(&clock, u32::from(TICKS_PER_MS));
        assert_eq!(clock.now(), 0);
    }

    #[test]
    fn test_pause_discards_ticks() {
        let clock = MillisClock::new();
        clock.pause();
        tick_times(&clock, 5 * u32::from(TICKS_PER_MS));
        assert_eq!(clock.now(), 0);

        clock.resume();
        tick_times(&clock, u32::from(TICKS_PER_MS));
        assert_eq!(clock.now(), 1);
    }

    #[test]
    fn test_set_resets_the_prescaler() {
        let clock = MillisClock::new();
        tick_times(&clock, u32::from(TICKS_PER_MS) - 1);
        clock.set(100);

        // A fresh prescaler window: the next millisecond needs a full
        // tick burst, not just one leftover tick.
        tick_times(&clock, u32::from(TICKS_PER_MS) - 1);
        assert_eq!(clock.now(), 100);
        clock.tick();
        assert_eq!(clock.now(), 101);
    }
}

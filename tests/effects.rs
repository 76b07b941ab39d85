mod tests {
    use ornament_light_engine::{Animation, Catalog, Engine, Opcode, Step};

    static IDLE_MATRIX: [Step<4>; 1] = [Step::load(0xFFFF, [0, 0, 0, 0])];
    static IDLE_ACCENT: [Step<3>; 1] = [Step::load(0xFFFF, [0, 0, 0])];

    static ADD_WRAP: [Step<4>; 2] = [
        Step::load(100, [14, 0, 14, 14]),
        Step::new(100, [2, -1, -1, 0], Opcode::ADD, 0),
    ];
    static ADD_WRAP_ANIM: [Animation<4>; 1] = [Animation {
        name: "add_wrap",
        matrix: &ADD_WRAP,
        accent: &IDLE_ACCENT,
    }];

    static ROTATE: [Step<4>; 3] = [
        Step::load(100, [1, 2, 3, 4]),
        Step::new(100, [0, 0, 0, 0], Opcode::ROTATE_RIGHT, 0),
        Step::new(100, [0, 0, 0, 0], Opcode::ROTATE_LEFT, 0),
    ];
    static ROTATE_ANIM: [Animation<4>; 1] = [Animation {
        name: "rotate",
        matrix: &ROTATE,
        accent: &IDLE_ACCENT,
    }];

    static SOURCE_UP_LOWER: [Step<4>; 2] = [
        Step::load(100, [14, 0, 0, 0]),
        Step::new(100, [5, 0, 0, 0], Opcode::SOURCE_UP, 0),
    ];
    static SOURCE_UP_LOWER_ANIM: [Animation<4>; 1] = [Animation {
        name: "source_up_lower",
        matrix: &SOURCE_UP_LOWER,
        accent: &IDLE_ACCENT,
    }];

    static SOURCE_UP_UPPER: [Step<4>; 2] = [
        Step::load(100, [0, 0, 0, 14]),
        Step::new(100, [0, 0, 0, 5], Opcode::SOURCE_UP, 0),
    ];
    static SOURCE_UP_UPPER_ANIM: [Animation<4>; 1] = [Animation {
        name: "source_up_upper",
        matrix: &SOURCE_UP_UPPER,
        accent: &IDLE_ACCENT,
    }];

    static SOURCE_DOWN: [Step<4>; 2] = [
        Step::load(100, [0, 14, 0, 0]),
        Step::new(100, [0, 5, 0, 0], Opcode::SOURCE_DOWN, 0),
    ];
    static SOURCE_DOWN_ANIM: [Animation<4>; 1] = [Animation {
        name: "source_down",
        matrix: &SOURCE_DOWN,
        accent: &IDLE_ACCENT,
    }];

    static DIVIDE: [Step<4>; 2] = [
        Step::load(100, [15, 15, 8, 15]),
        Step::new(100, [3, 0, 2, 1], Opcode::DIV, 0),
    ];
    static DIVIDE_ANIM: [Animation<4>; 1] = [Animation {
        name: "divide",
        matrix: &DIVIDE,
        accent: &IDLE_ACCENT,
    }];

    static SHORT_RAMP: [Step<4>; 2] = [
        Step::load(100, [0, 0, 0, 0]),
        Step::new(50, [2, 0, 0, 0], Opcode::ADD.with(Opcode::REPEAT), 3),
    ];
    static SHORT_RAMP_ANIM: [Animation<4>; 1] = [Animation {
        name: "short_ramp",
        matrix: &SHORT_RAMP,
        accent: &IDLE_ACCENT,
    }];

    static ACCENT_OPS: [Step<3>; 4] = [
        Step::load(100, [1, 2, 3]),
        Step::new(100, [0, 0, 0], Opcode::ROTATE_RIGHT, 0),
        Step::new(100, [5, 5, 5], Opcode::SOURCE_UP, 0),
        Step::new(100, [0, 0, 3], Opcode::DIV, 0),
    ];
    static ACCENT_OPS_ANIM: [Animation<4>; 1] = [Animation {
        name: "accent_ops",
        matrix: &IDLE_MATRIX,
        accent: &ACCENT_OPS,
    }];

    fn engine_at(animations: &'static [Animation<4>], now: u16) -> Engine<'static, 4> {
        // Leak keeps the catalog alive for the engine borrow; fine in tests.
        let catalog = Box::leak(Box::new(Catalog::new(animations, 2).unwrap()));
        let mut engine = Engine::new(catalog);
        for tick in 0..=now {
            engine.cycle(tick);
        }
        engine
    }

    #[test]
    fn test_add_wraps_out_of_range_to_black() {
        let engine = engine_at(&ADD_WRAP_ANIM, 100);
        // 14 + 2 overflows, 0 - 1 underflows; both reset to black.
        assert_eq!(engine.frame().matrix, [0, 0, 13, 14]);
    }

    #[test]
    fn test_rotate_right_then_left_restores_pattern() {
        let engine = engine_at(&ROTATE_ANIM, 100);
        assert_eq!(engine.frame().matrix, [4, 1, 2, 3]);

        let engine = engine_at(&ROTATE_ANIM, 200);
        assert_eq!(engine.frame().matrix, [1, 2, 3, 4]);
    }

    #[test]
    fn test_source_up_carries_toward_pivot_in_lower_half() {
        let engine = engine_at(&SOURCE_UP_LOWER_ANIM, 100);
        // 14 + 5 saturates at 15; the excess 4 pours into the neighbor.
        assert_eq!(engine.frame().matrix, [15, 4, 0, 0]);
    }

    #[test]
    fn test_source_up_carries_toward_pivot_in_upper_half() {
        let engine = engine_at(&SOURCE_UP_UPPER_ANIM, 100);
        assert_eq!(engine.frame().matrix, [0, 0, 4, 15]);
    }

    #[test]
    fn test_source_down_carries_away_from_pivot() {
        let engine = engine_at(&SOURCE_DOWN_ANIM, 100);
        assert_eq!(engine.frame().matrix, [4, 15, 0, 0]);
    }

    #[test]
    fn test_divide_skips_zero_operands() {
        let engine = engine_at(&DIVIDE_ANIM, 100);
        assert_eq!(engine.frame().matrix, [5, 15, 4, 15]);
    }

    #[test]
    fn test_add_repeat_accumulates_n_plus_one_times() {
        // Operand 3 means four executions in total: 4 * 2 = 8.
        let engine = engine_at(&SHORT_RAMP_ANIM, 250);
        assert_eq!(engine.frame().matrix[0], 8);
    }

    #[test]
    fn test_rotate_and_cascade_are_noops_on_accent() {
        let engine = engine_at(&ACCENT_OPS_ANIM, 250);
        assert_eq!(engine.frame().accent, [1, 2, 3]);

        // Divide is implemented on the accent channel.
        let engine = engine_at(&ACCENT_OPS_ANIM, 300);
        assert_eq!(engine.frame().accent, [1, 2, 1]);
    }
}

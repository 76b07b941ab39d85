//! Built-in animation catalog.
//!
//! Plain data only; every visual comes from the engine's opcode pipeline.
//! The last entry is the reserved all-off animation the firmware selects
//! right before power-down. [`CATALOG`] is validated in `const` context,
//! so an invalid table here fails the build.

use crate::catalog::{Animation, Catalog};
use crate::frame::ACCENT_CHANNELS;
use crate::step::{Opcode, Step};

/// Matrix width of the ornament this catalog ships for.
pub const MATRIX_LEDS: usize = 12;

/// Matrix index where the two cascade halves meet.
const PIVOT: usize = 6;

type MatrixStep = Step<MATRIX_LEDS>;
type AccentStep = Step<ACCENT_CHANNELS>;

const ADD_REPEAT: Opcode = Opcode::ADD.with(Opcode::REPEAT);
const ROTATE_RIGHT_REPEAT: Opcode = Opcode::ROTATE_RIGHT.with(Opcode::REPEAT);
const ROTATE_LEFT_REPEAT: Opcode = Opcode::ROTATE_LEFT.with(Opcode::REPEAT);
const DIV_REPEAT: Opcode = Opcode::DIV.with(Opcode::REPEAT);

static RETRO: [MatrixStep; 8] = [
    Step::load(133, [15, 0, 15, 0, 0, 15, 15, 0, 15, 0, 0, 15]),
    Step::load(133, [0, 15, 0, 15, 15, 0, 0, 15, 0, 15, 15, 0]),
    Step::load(133, [15, 0, 0, 0, 0, 0, 15, 0, 0, 0, 0, 0]),
    Step::load(133, [0, 15, 0, 15, 15, 0, 0, 15, 0, 15, 15, 0]),
    Step::load(133, [15, 0, 0, 0, 0, 0, 15, 0, 0, 0, 0, 0]),
    Step::load(133, [0, 0, 0, 15, 0, 0, 0, 0, 0, 15, 0, 0]),
    Step::load(133, [15, 0, 15, 0, 0, 15, 15, 0, 0, 15, 0, 15]),
    Step::load(133, [0, 0, 0, 15, 0, 0, 0, 0, 0, 15, 0, 0]),
];
static RETRO_ACCENT: [AccentStep; 4] = [
    Step::load(133, [15, 0, 0]),
    Step::load(665, [0, 0, 0]),
    Step::load(133, [15, 0, 0]),
    Step::load(133, [0, 0, 0]),
];

static SOFT_FLASHING: [MatrixStep; 4] = [
    Step::load(125, [0; 12]),
    Step::new(125, [1; 12], ADD_REPEAT, 14),
    Step::load(125, [15; 12]),
    Step::new(125, [-1; 12], ADD_REPEAT, 14),
];
static SOFT_FLASHING_ACCENT: [AccentStep; 4] = [
    Step::load(125, [0, 0, 0]),
    Step::new(125, [1, 0, 0], ADD_REPEAT, 14),
    Step::load(125, [15, 0, 0]),
    Step::new(125, [-1, 0, 0], ADD_REPEAT, 14),
];

static FADE_RING: [MatrixStep; 3] = [
    Step::load(40, [15, 1, 15, 1, 15, 1, 1, 15, 1, 15, 1, 15]),
    Step::new(40, [-1, 1, -1, 1, -1, 1, 1, -1, 1, -1, 1, -1], ADD_REPEAT, 13),
    Step::new(40, [1, -1, 1, -1, 1, -1, -1, 1, -1, 1, -1, 1], ADD_REPEAT, 13),
];
static FADE_RING_ACCENT: [AccentStep; 3] = [
    Step::load(40, [15, 1, 0]),
    Step::new(40, [-1, 0, 0], ADD_REPEAT, 13),
    Step::new(40, [1, 0, 0], ADD_REPEAT, 13),
];

static SHOOTING_STAR: [MatrixStep; 7] = [
    Step::load(100, [5, 10, 15, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    Step::new(100, [0; 12], ROTATE_RIGHT_REPEAT, 2),
    Step::load(100, [0, 0, 0, 0, 5, 10, 0, 0, 0, 0, 0, 0]),
    Step::load(100, [0, 0, 0, 0, 0, 5, 15, 0, 0, 0, 0, 0]),
    Step::load(100, [0, 0, 0, 0, 0, 0, 10, 15, 0, 0, 0, 0]),
    Step::load(100, [0, 0, 0, 0, 0, 0, 5, 10, 15, 0, 0, 0]),
    Step::new(100, [0; 12], ROTATE_RIGHT_REPEAT, 4),
];
static SHOOTING_STAR_ACCENT: [AccentStep; 4] = [
    Step::load(400, [0, 0, 0]),
    Step::load(100, [15, 0, 0]),
    Step::new(100, [-5, 0, 0], ADD_REPEAT, 1),
    Step::load(600, [0, 0, 0]),
];

static STAR_LAUNCH: [MatrixStep; 5] = [
    Step::load(400, [0; 12]),
    Step::load(200, [5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    Step::new(
        200,
        [5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5],
        Opcode::SOURCE_UP.with(Opcode::REPEAT),
        18,
    ),
    Step::load(200, [15, 15, 15, 15, 15, 15, 10, 15, 15, 15, 15, 15]),
    Step::new(
        200,
        [0, 0, 0, 0, 0, -5, -5, 0, 0, 0, 0, 0],
        Opcode::SOURCE_DOWN.with(Opcode::REPEAT),
        16,
    ),
];
static STAR_LAUNCH_ACCENT: [AccentStep; 5] = [
    Step::load(4000, [0, 0, 0]),
    Step::load(800, [15, 15, 0]),
    Step::new(200, [0, -1, 0], ADD_REPEAT, 9),
    Step::new(200, [-3, -1, 0], ADD_REPEAT, 4),
    Step::load(200, [0, 0, 0]),
];

static FLASHER: [MatrixStep; 2] = [
    Step::load(500, [15; 12]),
    Step::load(500, [0; 12]),
];
static FLASHER_ACCENT: [AccentStep; 2] = [
    Step::load(500, [7, 7, 7]),
    Step::load(500, [0, 0, 0]),
];

static DISCO: [MatrixStep; 6] = [
    Step::load(40, [0, 15, 0, 15, 0, 15, 0, 15, 0, 15, 0, 15]),
    Step::new(40, [1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2], DIV_REPEAT, 3),
    Step::load(100, [0; 12]),
    Step::load(40, [15, 0, 15, 0, 15, 0, 15, 0, 15, 0, 15, 0]),
    Step::new(40, [2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1], DIV_REPEAT, 3),
    Step::load(100, [0; 12]),
];
static DISCO_ACCENT: [AccentStep; 6] = [
    Step::load(40, [15, 0, 15]),
    Step::new(40, [2, 1, 2], DIV_REPEAT, 3),
    Step::load(100, [0, 0, 0]),
    Step::load(40, [0, 15, 0]),
    Step::new(40, [2, 1, 2], DIV_REPEAT, 3),
    Step::load(100, [0, 0, 0]),
];

static PING_PONG: [MatrixStep; 12] = [
    Step::load(175, [15, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    Step::new(175, [0; 12], ROTATE_RIGHT_REPEAT, 4),
    Step::load(175, [0; 12]),
    Step::load(175, [0, 0, 0, 0, 0, 0, 15, 0, 0, 0, 0, 0]),
    Step::new(175, [0; 12], ROTATE_RIGHT_REPEAT, 4),
    Step::load(175, [0; 12]),
    Step::load(175, [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 15]),
    Step::new(175, [0; 12], ROTATE_LEFT_REPEAT, 4),
    Step::load(175, [0; 12]),
    Step::load(175, [0, 0, 0, 0, 0, 15, 0, 0, 0, 0, 0, 0]),
    Step::new(175, [0; 12], ROTATE_LEFT_REPEAT, 4),
    Step::load(175, [0; 12]),
];
static PING_PONG_ACCENT: [AccentStep; 3] = [
    Step::load(1050, [15, 15, 0]),
    Step::load(2450, [0, 15, 15]),
    Step::load(1400, [15, 15, 0]),
];

static ORBIT: [MatrixStep; 2] = [
    Step::load(150, [0, 5, 10, 15, 0, 0, 0, 5, 10, 15, 0, 0]),
    Step::new(150, [0; 12], ROTATE_RIGHT_REPEAT, 4),
];
static ORBIT_ACCENT: [AccentStep; 2] = [
    Step::load(450, [2, 6, 15]),
    Step::load(450, [15, 8, 1]),
];

static STEPPER: [MatrixStep; 2] = [
    Step::load(350, [15, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    Step::new(350, [0; 12], ROTATE_RIGHT_REPEAT, 10),
];
static STEPPER_ACCENT: [AccentStep; 11] = [
    Step::load(350, [15, 0, 0]),
    Step::load(350, [15, 6, 0]),
    Step::load(350, [15, 10, 0]),
    Step::load(350, [15, 15, 0]),
    Step::load(350, [0, 15, 0]),
    Step::load(350, [0, 10, 0]),
    Step::load(350, [2, 10, 10]),
    Step::load(350, [0, 15, 15]),
    Step::load(350, [7, 5, 10]),
    Step::load(350, [15, 0, 15]),
    Step::load(350, [15, 12, 12]),
];

// Reached right before power-down; keep in the last slot.
static BLACKOUT: [MatrixStep; 1] = [Step::load(0xFFFF, [0; 12])];
static BLACKOUT_ACCENT: [AccentStep; 1] = [Step::load(0xFFFF, [0, 0, 0])];

static ANIMATIONS: [Animation<MATRIX_LEDS>; 11] = [
    Animation {
        name: "retro",
        matrix: &RETRO,
        accent: &RETRO_ACCENT,
    },
    Animation {
        name: "soft_flashing",
        matrix: &SOFT_FLASHING,
        accent: &SOFT_FLASHING_ACCENT,
    },
    Animation {
        name: "fade_ring",
        matrix: &FADE_RING,
        accent: &FADE_RING_ACCENT,
    },
    Animation {
        name: "shooting_star",
        matrix: &SHOOTING_STAR,
        accent: &SHOOTING_STAR_ACCENT,
    },
    Animation {
        name: "star_launch",
        matrix: &STAR_LAUNCH,
        accent: &STAR_LAUNCH_ACCENT,
    },
    Animation {
        name: "flasher",
        matrix: &FLASHER,
        accent: &FLASHER_ACCENT,
    },
    Animation {
        name: "disco",
        matrix: &DISCO,
        accent: &DISCO_ACCENT,
    },
    Animation {
        name: "ping_pong",
        matrix: &PING_PONG,
        accent: &PING_PONG_ACCENT,
    },
    Animation {
        name: "orbit",
        matrix: &ORBIT,
        accent: &ORBIT_ACCENT,
    },
    Animation {
        name: "stepper",
        matrix: &STEPPER,
        accent: &STEPPER_ACCENT,
    },
    Animation {
        name: "blackout",
        matrix: &BLACKOUT,
        accent: &BLACKOUT_ACCENT,
    },
];

/// The validated built-in catalog.
pub static CATALOG: Catalog<MATRIX_LEDS> = match Catalog::new(&ANIMATIONS, PIVOT) {
    Ok(catalog) => catalog,
    Err(_) => panic!("built-in catalog failed validation"),
};

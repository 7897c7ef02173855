//! Named pattern texts.
//!
//! The catalog is plain data in the cell notation of [`crate::rle`]. The engine never consumes
//! these entries directly, only patterns decoded from them.

/// Smallest spaceship, moves diagonally with period 4.
pub const GLIDER: &str = "bo$2bo$3o!";

/// Period 2 oscillator.
pub const BLINKER: &str = "3o!";

/// Period 2 oscillator.
pub const TOAD: &str = "b3o$3o!";

/// Period 2 oscillator.
pub const BEACON: &str = "2o$o$3bo$2b2o!";

/// Period 3 oscillator.
pub const PULSAR: &str = "2b3o3b3o$13b$o4bobo4bo$o4bobo4bo$o4bobo4bo$2b3o3b3o$13b$2b3o3b3o$o4bobo4bo$o4bobo4bo$o4bobo4bo$13b$2b3o3b3o!";

/// Lightweight spaceship, moves horizontally with period 4.
pub const LWSS: &str = "bo2bo$o$o3bo$4o!";

/// Emits a glider every 30 generations.
pub const GOSPER_GLIDER_GUN: &str = "24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$2o8bo3bob2o4bobo$12b2o6b2o7bo$11bo3bo$12b2o!";

/// Methuselah, stabilizes after 1103 generations.
pub const R_PENTOMINO: &str = "b2o$2o$bo!";

/// Methuselah, stabilizes after 5206 generations.
pub const ACORN: &str = "bo$3bo$2o2b3o!";

/// Still life.
pub const BLOCK: &str = "2o$2o!";

/// Every named pattern, in display order.
pub const PATTERNS: &[(&str, &str)] = &[
    ("glider", GLIDER),
    ("blinker", BLINKER),
    ("toad", TOAD),
    ("beacon", BEACON),
    ("pulsar", PULSAR),
    ("lwss", LWSS),
    ("gosper-glider-gun", GOSPER_GLIDER_GUN),
    ("r-pentomino", R_PENTOMINO),
    ("acorn", ACORN),
    ("block", BLOCK),
];

/// Look a pattern up by name, case-insensitively.
pub fn lookup(name: &str) -> Option<&'static str> {
    PATTERNS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, text)| text)
}

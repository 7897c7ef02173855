use crate::grid::Grid;

/// Hex values of braille dots
///
///      1   8
///      2  10
///      4  20
///     40  80
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Renders a [`Grid`] as braille characters, each covering 2 columns by 4 rows of cells.
pub struct Camera {
    /// Codepoint scratch buffer
    cp: Vec<u32>,

    /// The finished frame
    fb: String,

    /// Frame width, in characters
    bw: usize,

    /// Frame height, in characters
    bh: usize,
}

impl Camera {
    /// A camera for grids of `rows` by `columns` cells.
    pub fn new(rows: usize, columns: usize) -> Self {
        let (bw, bh) = (columns.div_ceil(2), rows.div_ceil(4));
        let cp = vec![BRAILLE_EMPTY; bw * bh];

        // Each braille character is 3 bytes in UTF-8, and each of the `bh` line breaks is one.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self { cp, fb, bw, bh }
    }

    /// Render `grid` into the frame buffer and return the frame.
    pub fn render(&mut self, grid: &Grid) -> &str {
        assert!(grid.rows() <= 4 * self.bh, "grid is taller than the frame");
        assert!(
            grid.columns() <= 2 * self.bw,
            "grid is wider than the frame"
        );

        self.cp.fill(BRAILLE_EMPTY);

        for row in 0..grid.rows() {
            for column in 0..grid.columns() {
                if grid.get(row, column) {
                    let i = (row / 4) * self.bw + column / 2;

                    self.cp[i] += Self::dot(column, row);
                }
            }
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % self.bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(char::from_u32(c).unwrap());
        }
        self.fb.push('\n');

        &self.fb
    }

    fn dot(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

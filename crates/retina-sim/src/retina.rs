//! Retina Buffer
//!
//! Fixed-size binary edge map, row-major, one column per cast ray.

/// Value of a lit (boundary) pixel
pub const LIT: u8 = 1;

/// A `rows x cols` grid of pixels with values in {0, 1}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetinaBuffer {
    rows: usize,
    cols: usize,
    pixels: Vec<u8>,
}

impl RetinaBuffer {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            pixels: vec![0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major pixel values
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.pixels[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(LIT)
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.pixels[row * self.cols..(row + 1) * self.cols]
    }

    /// Copies out one column, top to bottom
    pub fn column(&self, col: usize) -> Vec<u8> {
        (0..self.rows)
            .map(|row| self.pixels[row * self.cols + col])
            .collect()
    }

    /// Lights `(row, col)` if the row falls inside the buffer. Returns
    /// whether anything was drawn; out-of-range rows are clipped.
    pub fn light(&mut self, row: i64, col: usize) -> bool {
        if row < 0 || col >= self.cols {
            return false;
        }
        let row = row as usize;
        if row >= self.rows {
            return false;
        }
        self.pixels[row * self.cols + col] = LIT;
        true
    }

    /// Lights every row strictly between `low` and `high` in `col`.
    pub fn light_span(&mut self, col: usize, low: i64, high: i64) {
        let first = low.saturating_add(1).max(0);
        let last = high.min(self.rows as i64);
        for row in first..last {
            self.light(row, col);
        }
    }

    /// Zero every pixel
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Reverse the row order in place
    pub fn flip_rows(&mut self) {
        let cols = self.cols;
        for top in 0..self.rows / 2 {
            let bottom = self.rows - 1 - top;
            let (head, tail) = self.pixels.split_at_mut(bottom * cols);
            head[top * cols..(top + 1) * cols].swap_with_slice(&mut tail[..cols]);
        }
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p == LIT).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.pixels.chunks(self.cols.max(1)).map(|r| r.to_vec()).collect()
    }

    /// Text rendering, one line per row
    pub fn render_text(&self, lit: char, unlit: char) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            out.extend(self.row(row).iter().map(|&p| if p == LIT { lit } else { unlit }));
            out.push('\n');
        }
        out
    }
}

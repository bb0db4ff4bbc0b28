//! The 2x2 sub-pixel codebook.
//!
//! Every source pixel expands into one 2x2 block per share. Only two block
//! patterns exist: a diagonal pattern and its cell-wise complement. Which
//! pattern lands in which share is decided by the source pixel value and
//! one fresh random bit:
//!
//! - foreground pixel: the shares receive complementary patterns, so
//!   stacking them inks all four cells
//! - background pixel: the shares receive the same pattern, so stacking
//!   them inks exactly two of four cells
//!
//! Each pattern inks exactly half its cells, so a share viewed alone is
//! uniform 50% noise no matter what the source pixel was.

/// A 2x2 sub-pixel pattern, the unit of pixel expansion.
///
/// Indexed `[row][column]`; `true` is ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBlock(pub [[bool; 2]; 2]);

/// Diagonal pattern: ink on the main diagonal.
pub const PATTERN_P: PixelBlock = PixelBlock([[true, false], [false, true]]);

/// Anti-diagonal pattern: the cell-wise complement of [`PATTERN_P`].
pub const PATTERN_Q: PixelBlock = PixelBlock([[false, true], [true, false]]);

impl PixelBlock {
    /// Reads the cell at column `dx`, row `dy`.
    pub fn get(self, dx: usize, dy: usize) -> bool {
        self.0[dy][dx]
    }

    /// Cell-wise complement.
    pub fn complement(self) -> PixelBlock {
        let mut out = self.0;
        for row in &mut out {
            for cell in row {
                *cell = !*cell;
            }
        }
        PixelBlock(out)
    }

    /// Cell-wise OR with another block (the stacking combine).
    pub fn or(self, other: PixelBlock) -> PixelBlock {
        let mut out = self.0;
        for (dy, row) in out.iter_mut().enumerate() {
            for (dx, cell) in row.iter_mut().enumerate() {
                *cell |= other.0[dy][dx];
            }
        }
        PixelBlock(out)
    }

    /// Number of inked cells (0..=4).
    pub fn ink_count(self) -> usize {
        self.0
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c)
            .count()
    }

    /// Returns true if this block is one of the two codebook patterns.
    pub fn is_codebook_pattern(self) -> bool {
        self == PATTERN_P || self == PATTERN_Q
    }
}

/// Selects the pair of blocks written for one source pixel.
///
/// `ink` is the source pixel value; `coin` is the single uniform random
/// bit drawn for that pixel (`false` = 0, `true` = 1). The first block of
/// the pair goes into share 1, the second into share 2.
pub fn share_blocks(ink: bool, coin: bool) -> (PixelBlock, PixelBlock) {
    match (ink, coin) {
        // Foreground: complementary blocks, stacking inks 4/4 cells.
        (true, false) => (PATTERN_P, PATTERN_Q),
        (true, true) => (PATTERN_Q, PATTERN_P),
        // Background: identical blocks, stacking inks 2/4 cells.
        (false, false) => (PATTERN_P, PATTERN_P),
        (false, true) => (PATTERN_Q, PATTERN_Q),
    }
}

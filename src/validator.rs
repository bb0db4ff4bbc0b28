//! Share pair validation.
//!
//! Two checks of very different strength live here:
//!
//! - [`validate`] stacks the pair and measures ink coverage. A genuine
//!   pair covers strictly more than half of the overlay (half from the
//!   background checkerboards plus everything the secret adds), so the
//!   verdict is `black_fraction > 0.5`. This is a cheap plausibility
//!   screen, not authentication: unrelated noise at the right density
//!   passes it, and a genuine pair hiding an all-white secret fails it.
//! - [`inspect_blocks`] walks the pair block by block and counts blocks
//!   that could not have come from a generated pair. Zero inconsistent
//!   blocks is a much stronger signal, though still not a cryptographic
//!   proof of origin.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codebook::PixelBlock;
use crate::grid::BitGrid;
use crate::overlay::overlay;
use crate::{BLOCK_SIDE, VALID_THRESHOLD};

/// Errors that can occur while comparing two shares.
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error(
        "share dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}"
    )]
    ShapeMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
    #[error("share dimensions {width}x{height} are not a whole number of 2x2 blocks")]
    OddDimensions { width: usize, height: usize },
}

/// Fails unless both grids have identical dimensions.
pub(crate) fn ensure_same_shape(a: &BitGrid, b: &BitGrid) -> Result<(), ValidateError> {
    if !a.same_shape(b) {
        return Err(ValidateError::ShapeMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }
    Ok(())
}

/// Outcome of the statistical overlay check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the pair is plausibly genuine.
    pub is_valid: bool,
    /// Fraction of overlay cells that are inked, in `[0.0, 1.0]`.
    pub black_fraction: f64,
}

/// Checks whether two shares plausibly reconstruct a secret.
///
/// Stacks the shares and measures the inked fraction of the result. The
/// pair is accepted when that fraction strictly exceeds one half, the
/// coverage an overlay of two unrelated full-density shares would only
/// reach by chance.
///
/// The measure is deliberately blunt. It cannot tell a genuine pair from
/// any other pair with matching coverage, and a genuine pair whose secret
/// has no ink at all lands exactly on the threshold and is rejected. Use
/// [`inspect_blocks`] when structural evidence is worth the extra work.
///
/// # Arguments
/// * `share1` - First share
/// * `share2` - Second share
///
/// # Returns
/// The [`Verdict`], or [`ValidateError::ShapeMismatch`] if the shares
/// disagree on dimensions.
pub fn validate(share1: &BitGrid, share2: &BitGrid) -> Result<Verdict, ValidateError> {
    let stacked = overlay(share1, share2)?;
    let black_fraction = stacked.ink_fraction();
    Ok(Verdict {
        is_valid: black_fraction > VALID_THRESHOLD,
        black_fraction,
    })
}

/// Per-block tally produced by [`inspect_blocks`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlockReport {
    /// Blocks where the shares carry complementary patterns (secret ink).
    pub solid: usize,
    /// Blocks where the shares carry the same pattern (secret background).
    pub checkerboard: usize,
    /// Blocks that no generated pair could produce.
    pub inconsistent: usize,
}

impl BlockReport {
    /// Total number of blocks examined.
    pub fn total(&self) -> usize {
        self.solid + self.checkerboard + self.inconsistent
    }

    /// Whether every block is explainable by the codebook.
    pub fn is_genuine_pair(&self) -> bool {
        self.inconsistent == 0
    }
}

/// Classifies every 2x2 block of a share pair against the codebook.
///
/// Genuine pairs only ever hold the two codebook patterns, identical
/// across the shares over background and complementary over ink. Any
/// block that breaks that rule is counted as inconsistent, so a single
/// flipped cell anywhere is enough to make [`BlockReport::is_genuine_pair`]
/// return `false`.
///
/// # Arguments
/// * `share1` - First share
/// * `share2` - Second share
///
/// # Returns
/// The [`BlockReport`], or an error if the shares disagree on dimensions
/// or are not a whole number of blocks.
pub fn inspect_blocks(share1: &BitGrid, share2: &BitGrid) -> Result<BlockReport, ValidateError> {
    ensure_same_shape(share1, share2)?;
    if share1.width() % BLOCK_SIDE != 0 || share1.height() % BLOCK_SIDE != 0 {
        return Err(ValidateError::OddDimensions {
            width: share1.width(),
            height: share1.height(),
        });
    }

    let mut report = BlockReport {
        solid: 0,
        checkerboard: 0,
        inconsistent: 0,
    };

    for by in 0..share1.height() / BLOCK_SIDE {
        for bx in 0..share1.width() / BLOCK_SIDE {
            let block1 = block_at(share1, bx, by);
            let block2 = block_at(share2, bx, by);

            if !block1.is_codebook_pattern() || !block2.is_codebook_pattern() {
                report.inconsistent += 1;
            } else if block1 == block2 {
                report.checkerboard += 1;
            } else {
                // Both are codebook patterns and they differ, so they are
                // complements and stack to a solid block.
                report.solid += 1;
            }
        }
    }

    Ok(report)
}

/// Reads the 2x2 block at block coordinates `(bx, by)`.
fn block_at(share: &BitGrid, bx: usize, by: usize) -> PixelBlock {
    let mut cells = [[false; BLOCK_SIDE]; BLOCK_SIDE];
    for (dy, row) in cells.iter_mut().enumerate() {
        for (dx, cell) in row.iter_mut().enumerate() {
            *cell = share.get(bx * BLOCK_SIDE + dx, by * BLOCK_SIDE + dy);
        }
    }
    PixelBlock(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, seed_rng};

    #[test]
    fn test_validate_rejects_mismatched_shapes() {
        let a = BitGrid::new(4, 4);
        let b = BitGrid::new(4, 6);
        let err = validate(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            ValidateError::ShapeMismatch {
                left_width: 4,
                left_height: 4,
                right_width: 4,
                right_height: 6,
            }
        ));
    }

    #[test]
    fn test_empty_shares_measure_zero_fraction() {
        // A pair with no cells is measured as zero coverage, not as a
        // division by zero.
        let verdict = validate(&BitGrid::new(0, 0), &BitGrid::new(0, 0)).unwrap();
        assert_eq!(verdict.black_fraction, 0.0);
        assert!(!verdict.is_valid);
    }

    #[test]
    fn test_exactly_half_ink_is_rejected() {
        // 10x10 overlay with exactly 50 inked cells sits on the threshold
        // and must not pass.
        let a = BitGrid::from_fn(10, 10, |_, y| y < 5);
        let b = BitGrid::new(10, 10);
        let verdict = validate(&a, &b).unwrap();
        assert!((verdict.black_fraction - 0.5).abs() < 1e-12);
        assert!(!verdict.is_valid);
    }

    #[test]
    fn test_just_over_half_ink_is_accepted() {
        // 51 of 100 cells inked.
        let a = BitGrid::from_fn(10, 10, |x, y| y < 5 || (y == 5 && x == 0));
        let b = BitGrid::new(10, 10);
        let verdict = validate(&a, &b).unwrap();
        assert!((verdict.black_fraction - 0.51).abs() < 1e-12);
        assert!(verdict.is_valid);
    }

    #[test]
    fn test_generated_pair_with_dark_secret_is_valid() {
        let source = BitGrid::from_fn(20, 20, |x, y| x < 10 || y < 10);
        let mut rng = seed_rng("dark secret");
        let pair = generate(&source, &mut rng).unwrap();

        let verdict = validate(&pair.share1, &pair.share2).unwrap();
        // Overlay coverage is 1/2 + f/2 where f is the secret ink fraction.
        let expected = 0.5 + source.ink_fraction() / 2.0;
        assert!((verdict.black_fraction - expected).abs() < 1e-12);
        assert!(verdict.is_valid);
    }

    #[test]
    fn test_all_white_secret_fails_the_statistical_check() {
        // Known blind spot: a genuine pair for an inkless secret stacks to
        // exactly half coverage and is rejected.
        let source = BitGrid::new(8, 8);
        let mut rng = seed_rng("blank secret");
        let pair = generate(&source, &mut rng).unwrap();

        let verdict = validate(&pair.share1, &pair.share2).unwrap();
        assert!((verdict.black_fraction - 0.5).abs() < 1e-12);
        assert!(!verdict.is_valid);
    }

    #[test]
    fn test_solid_noise_fools_the_statistical_check() {
        // Two all-black grids are not shares of anything, yet they pass.
        let a = BitGrid::from_fn(8, 8, |_, _| true);
        let b = BitGrid::from_fn(8, 8, |_, _| true);
        let verdict = validate(&a, &b).unwrap();
        assert!(verdict.is_valid);
    }

    #[test]
    fn test_inspect_accepts_generated_pair() {
        let source = BitGrid::from_fn(15, 10, |x, y| (x + y) % 2 == 0);
        let mut rng = seed_rng("structural");
        let pair = generate(&source, &mut rng).unwrap();

        let report = inspect_blocks(&pair.share1, &pair.share2).unwrap();
        assert_eq!(report.total(), 150);
        assert_eq!(report.solid, source.ink_count());
        assert_eq!(report.checkerboard, 150 - source.ink_count());
        assert!(report.is_genuine_pair());
    }

    #[test]
    fn test_inspect_flags_single_flipped_cell() {
        let source = BitGrid::from_fn(6, 6, |x, _| x < 3);
        let mut rng = seed_rng("tamper");
        let pair = generate(&source, &mut rng).unwrap();

        let mut tampered = pair.share2.clone();
        tampered.set(5, 5, !tampered.get(5, 5));

        let report = inspect_blocks(&pair.share1, &tampered).unwrap();
        assert_eq!(report.inconsistent, 1);
        assert!(!report.is_genuine_pair());
    }

    #[test]
    fn test_inspect_flags_noise_that_fooled_validate() {
        let a = BitGrid::from_fn(8, 8, |_, _| true);
        let b = BitGrid::from_fn(8, 8, |_, _| true);
        assert!(validate(&a, &b).unwrap().is_valid);

        let report = inspect_blocks(&a, &b).unwrap();
        assert_eq!(report.inconsistent, report.total());
        assert!(!report.is_genuine_pair());
    }

    #[test]
    fn test_inspect_rejects_odd_dimensions() {
        let a = BitGrid::new(5, 4);
        let b = BitGrid::new(5, 4);
        assert!(matches!(
            inspect_blocks(&a, &b),
            Err(ValidateError::OddDimensions { width: 5, height: 4 })
        ));
    }

    #[test]
    fn test_inspect_accepts_an_all_white_secret_pair() {
        // The structural check has no blind spot for inkless secrets.
        let source = BitGrid::new(8, 8);
        let mut rng = seed_rng("blank but genuine");
        let pair = generate(&source, &mut rng).unwrap();

        let report = inspect_blocks(&pair.share1, &pair.share2).unwrap();
        assert_eq!(report.checkerboard, 64);
        assert!(report.is_genuine_pair());
    }
}

//! Share stacking.
//!
//! Physically laying one printed share over the other blackens a cell as
//! soon as either transparency inks it. [`overlay`] models that with a
//! cell-wise OR, which is the only reconstruction step the scheme needs:
//! no key, no arithmetic, just two aligned grids.

use crate::grid::BitGrid;
use crate::validator::{ensure_same_shape, ValidateError};

/// Stacks two shares into the reconstructed image.
///
/// The result inks every cell that is inked in either input. Both grids
/// must have identical dimensions.
///
/// # Arguments
/// * `a` - First share
/// * `b` - Second share
///
/// # Returns
/// The stacked grid, or [`ValidateError::ShapeMismatch`] if the
/// dimensions differ.
pub fn overlay(a: &BitGrid, b: &BitGrid) -> Result<BitGrid, ValidateError> {
    ensure_same_shape(a, b)?;
    Ok(BitGrid::from_fn(a.width(), a.height(), |x, y| {
        a.get(x, y) || b.get(x, y)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_is_cellwise_or() {
        let a = BitGrid::from_fn(2, 2, |x, _| x == 0);
        let b = BitGrid::from_fn(2, 2, |_, y| y == 0);
        let stacked = overlay(&a, &b).unwrap();

        assert!(stacked.get(0, 0));
        assert!(stacked.get(1, 0));
        assert!(stacked.get(0, 1));
        assert!(!stacked.get(1, 1));
    }

    #[test]
    fn test_overlay_never_erases_ink() {
        let a = BitGrid::from_fn(7, 5, |x, y| (x * y) % 3 == 1);
        let b = BitGrid::from_fn(7, 5, |x, y| (x + 2 * y) % 4 == 0);
        let stacked = overlay(&a, &b).unwrap();

        for y in 0..5 {
            for x in 0..7 {
                if a.get(x, y) || b.get(x, y) {
                    assert!(stacked.get(x, y));
                }
            }
        }
    }

    #[test]
    fn test_overlay_rejects_mismatched_shapes() {
        let a = BitGrid::new(4, 4);
        let b = BitGrid::new(4, 6);
        assert!(matches!(
            overlay(&a, &b),
            Err(ValidateError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_overlay_is_commutative() {
        let a = BitGrid::from_fn(6, 6, |x, y| x > y);
        let b = BitGrid::from_fn(6, 6, |x, y| x + y == 5);
        assert_eq!(overlay(&a, &b).unwrap(), overlay(&b, &a).unwrap());
    }
}

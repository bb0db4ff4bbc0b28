//! Share generation.
//!
//! This module turns one binary source image into two share grids:
//! 1. Reject empty sources before touching any pixel
//! 2. For each source pixel, draw one uniform random bit
//! 3. Look up the block pair for (pixel value, bit) in the codebook
//! 4. Stamp the first block into share 1, the second into share 2
//!
//! The random source is injected by the caller, so generation is
//! deterministic under a seeded generator and safe under concurrent calls
//! (each invocation owns its generator exclusively).

use hkdf::Hkdf;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use thiserror::Error;

use crate::codebook::{share_blocks, PixelBlock};
use crate::grid::BitGrid;
use crate::BLOCK_SIDE;

/// HKDF salt for deriving generation seeds from a phrase.
const SALT_SEED: &[u8] = b"INKSHARE-SEED-V1";

/// Errors that can occur during share generation.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("source image is empty ({width}x{height}); nothing to split")]
    EmptySource { width: usize, height: usize },
}

/// The two shares produced from one source image.
///
/// Neither grid records which slot it came from or which sibling it pairs
/// with; keeping the pair together is the caller's job.
#[derive(Debug, Clone)]
pub struct SharePair {
    /// First share, twice the source width and height.
    pub share1: BitGrid,
    /// Second share, same dimensions as the first.
    pub share2: BitGrid,
}

/// Splits a binary source image into two noise shares.
///
/// Every source pixel becomes a 2x2 block in each share, so both returned
/// grids are exactly twice the source width and height. One fresh random
/// bit is drawn per source pixel; no draw is reused.
///
/// # Arguments
/// * `source` - The binary secret image (`true` = ink)
/// * `rng` - Random bit source; pass a seeded generator for reproducible
///   shares (see [`seed_rng`])
///
/// # Returns
/// A [`SharePair`] whose stacked overlay reconstructs the secret, or
/// [`GenerateError::EmptySource`] if the source has zero width or height.
pub fn generate<R: Rng + ?Sized>(
    source: &BitGrid,
    rng: &mut R,
) -> Result<SharePair, GenerateError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(GenerateError::EmptySource {
            width: source.width(),
            height: source.height(),
        });
    }

    let mut share1 = BitGrid::new(source.width() * BLOCK_SIDE, source.height() * BLOCK_SIDE);
    let mut share2 = BitGrid::new(source.width() * BLOCK_SIDE, source.height() * BLOCK_SIDE);

    for y in 0..source.height() {
        for x in 0..source.width() {
            let coin = rng.gen::<bool>();
            let (block1, block2) = share_blocks(source.get(x, y), coin);
            stamp(&mut share1, x, y, block1);
            stamp(&mut share2, x, y, block2);
        }
    }

    Ok(SharePair { share1, share2 })
}

/// Writes a 2x2 block into the share region for source pixel `(x, y)`.
fn stamp(share: &mut BitGrid, x: usize, y: usize, block: PixelBlock) {
    for dy in 0..BLOCK_SIDE {
        for dx in 0..BLOCK_SIDE {
            share.set(x * BLOCK_SIDE + dx, y * BLOCK_SIDE + dy, block.get(dx, dy));
        }
    }
}

/// Derives a deterministic generator from a seed phrase.
///
/// The same phrase always produces the same bit sequence, so the same
/// source image splits into the same pair of shares. The seed is derived
/// with HKDF-SHA256 under a fixed salt.
pub fn seed_rng(phrase: &str) -> ChaCha20Rng {
    let hk = Hkdf::<Sha256>::new(Some(SALT_SEED), phrase.as_bytes());
    let mut seed = [0u8; 32];
    hk.expand(b"share-seed", &mut seed)
        .expect("HKDF expand should not fail");
    ChaCha20Rng::from_seed(seed)
}

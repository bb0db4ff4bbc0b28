//! # Inkshare - 2-of-2 visual secret sharing
//!
//! Inkshare splits a binary secret image into two same-sized noise images
//! ("shares") that reveal the secret when physically stacked.
//!
//! ## Overview
//!
//! The scheme is the classic 2-out-of-2 visual construction:
//! - Every secret pixel expands to a **2x2 block** in each share
//! - Background pixels get **identical** blocks, ink pixels **complementary** ones
//! - Each block is one of two checkerboard patterns, chosen by a fresh coin flip
//! - A share alone is uniform noise at exactly 50% ink, whatever the secret
//! - Stacking the shares (cell-wise OR) turns ink pixels solid black and
//!   leaves background pixels half gray, so the secret is readable by eye
//!
//! ## Security Model
//!
//! - **Perfect hiding**: one share carries zero information about the secret
//! - **No keys**: reconstruction is just stacking, decryption is optical
//! - **No binding**: shares carry no authenticator; [`validator`] offers a
//!   statistical plausibility check and a stricter structural one, neither
//!   of which is a cryptographic proof of origin
//!
//! ## Example Usage
//!
//! ```rust
//! use inkshare::{generate, seed_rng, validate, BitGrid};
//!
//! // An 8x8 checkerboard stands in for the secret image
//! let secret = BitGrid::from_fn(8, 8, |x, y| (x + y) % 2 == 0);
//!
//! // Seeded generation is reproducible; use rand::thread_rng() otherwise
//! let mut rng = seed_rng("doc example");
//! let pair = generate(&secret, &mut rng).unwrap();
//!
//! // Shares are twice the secret size
//! assert_eq!(pair.share1.width(), 16);
//! assert_eq!(pair.share1.height(), 16);
//!
//! // A genuine pair over an inked secret passes the overlay check
//! let verdict = validate(&pair.share1, &pair.share2).unwrap();
//! assert!(verdict.is_valid);
//! ```
//!
//! ## Modules
//!
//! - [`grid`]: The binary pixel grid all operations work on
//! - [`codebook`]: The 2x2 block patterns and the pixel-to-block rule
//! - [`generator`]: Secret image to share pair
//! - [`overlay`]: Share stacking (cell-wise OR)
//! - [`validator`]: Statistical and structural share pair checks
//! - [`codec`]: PNG and base64 import/export

/// Side length of the share block each secret pixel expands to.
pub const BLOCK_SIDE: usize = 2;

/// Overlay ink fraction a share pair must strictly exceed to be accepted.
pub const VALID_THRESHOLD: f64 = 0.5;

pub mod codebook;
pub mod codec;
pub mod generator;
pub mod grid;
pub mod overlay;
pub mod validator;

// Re-export commonly used types at the crate root
pub use codebook::{share_blocks, PixelBlock, PATTERN_P, PATTERN_Q};
pub use codec::{
    binarize, binarize_bytes, from_base64_png, load_binary, save_png, to_base64_png, to_image,
    to_png_bytes, CodecError, DEFAULT_THRESHOLD,
};
pub use generator::{generate, seed_rng, GenerateError, SharePair};
pub use grid::BitGrid;
pub use overlay::overlay;
pub use validator::{inspect_blocks, validate, BlockReport, ValidateError, Verdict};

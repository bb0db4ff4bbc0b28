//! Inkshare - 2-of-2 visual secret sharing
//!
//! A CLI tool that splits a secret image into two noise shares and checks
//! whether a pair of shares plausibly reconstructs a secret.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use inkshare::{
    generate, inspect_blocks, load_binary, overlay, save_png, seed_rng, to_base64_png, validate,
    BitGrid, BlockReport,
};

/// Inkshare - 2-of-2 visual secret sharing
///
/// Splits a binary secret image into two same-sized noise shares. Either
/// share alone is uniform noise; stacking both reveals the secret to the
/// naked eye, no key or computation required.
#[derive(Parser)]
#[command(name = "inkshare")]
#[command(version = "0.2.0")]
#[command(about = "Split a secret image into two noise shares that reveal it when stacked")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a secret image into two shares
    ///
    /// The input is binarized by luminance threshold, then every pixel is
    /// expanded into a 2x2 block per share, so shares are twice the input
    /// size. Without --seed the split is freshly random each run.
    Generate {
        /// Path to the secret image (PNG, JPEG, BMP, ...)
        #[arg(short, long)]
        image: PathBuf,

        /// Output path for the first share
        #[arg(long, default_value = "share1.png")]
        share1: PathBuf,

        /// Output path for the second share
        #[arg(long, default_value = "share2.png")]
        share2: PathBuf,

        /// Seed phrase for reproducible shares (omit for fresh randomness)
        #[arg(short, long)]
        seed: Option<String>,

        /// Luminance cutoff for binarization (pixels below it become ink)
        #[arg(short, long, default_value = "128")]
        threshold: u8,

        /// Output pixels per share cell (enlarges shares for printing)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: u32,

        /// Print both shares as base64 PNG in JSON instead of writing files
        #[arg(long)]
        json: bool,

        /// Verbose output (shows image stats and generation details)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check whether two share images plausibly reconstruct a secret
    ///
    /// Stacks the shares and measures ink coverage: a genuine pair covers
    /// strictly more than half of the overlay. This is a plausibility
    /// screen, not authentication - use --strict for a structural check
    /// of every 2x2 block against the generation patterns.
    Validate {
        /// Path to the first share image
        #[arg(long)]
        share1: PathBuf,

        /// Path to the second share image
        #[arg(long)]
        share2: PathBuf,

        /// Also classify every 2x2 block against the generation patterns
        #[arg(long)]
        strict: bool,

        /// Luminance cutoff for binarizing the share images
        #[arg(short, long, default_value = "128")]
        threshold: u8,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,

        /// Verbose output (shows share dimensions and ink stats)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Stack two shares and write the reconstructed image
    ///
    /// This is what physically laying the printed transparencies on top
    /// of each other produces: secret ink turns solid black, background
    /// stays a 50% checkerboard.
    Reveal {
        /// Path to the first share image
        #[arg(long)]
        share1: PathBuf,

        /// Path to the second share image
        #[arg(long)]
        share2: PathBuf,

        /// Output path for the stacked image
        #[arg(short, long, default_value = "revealed.png")]
        output: PathBuf,

        /// Output pixels per cell
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: u32,

        /// Luminance cutoff for binarizing the share images
        #[arg(short, long, default_value = "128")]
        threshold: u8,
    },

    /// Analyze a secret image before splitting it
    ///
    /// Reports the binarized dimensions and ink coverage, the share size
    /// generation would produce, and whether the resulting pair would
    /// pass the overlay check.
    Info {
        /// Path to the secret image
        #[arg(short, long)]
        image: PathBuf,

        /// Luminance cutoff for binarization
        #[arg(short, long, default_value = "128")]
        threshold: u8,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            image,
            share1,
            share2,
            seed,
            threshold,
            scale,
            json,
            verbose,
        } => generate_cmd(&image, &share1, &share2, seed.as_deref(), threshold, scale, json, verbose)?,

        Commands::Validate {
            share1,
            share2,
            strict,
            threshold,
            json,
            verbose,
        } => validate_cmd(&share1, &share2, strict, threshold, json, verbose)?,

        Commands::Reveal {
            share1,
            share2,
            output,
            scale,
            threshold,
        } => reveal_cmd(&share1, &share2, &output, scale, threshold)?,

        Commands::Info { image, threshold } => info_cmd(&image, threshold)?,
    }

    Ok(())
}

/// JSON body for `generate --json`: both shares as base64 PNG.
#[derive(Serialize)]
struct SharePayload {
    share1: String,
    share2: String,
}

/// JSON body for `validate --json --strict`.
#[derive(Serialize)]
struct StrictPayload {
    is_valid: bool,
    black_fraction: f64,
    blocks: BlockReport,
    is_genuine_pair: bool,
}

/// Loads and binarizes a share image.
fn load_share(path: &PathBuf, threshold: u8) -> Result<BitGrid> {
    load_binary(path, threshold)
        .with_context(|| format!("Failed to load share from {}", path.display()))
}

/// Splits a secret image into two share files (or a JSON payload).
fn generate_cmd(
    image_path: &PathBuf,
    share1_path: &PathBuf,
    share2_path: &PathBuf,
    seed: Option<&str>,
    threshold: u8,
    scale: u32,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let secret = load_binary(image_path, threshold)
        .with_context(|| format!("Failed to load secret image from {}", image_path.display()))?;

    if verbose {
        eprintln!(
            "Loaded secret image: {}x{}, {} ink pixels ({:.1}% coverage)",
            secret.width(),
            secret.height(),
            secret.ink_count(),
            secret.ink_fraction() * 100.0
        );
    }

    let pair = match seed {
        Some(phrase) => {
            if verbose {
                eprintln!("Using seeded generation (same phrase reproduces these shares)");
            }
            let mut rng = seed_rng(phrase);
            generate(&secret, &mut rng)
        }
        None => generate(&secret, &mut rand::thread_rng()),
    }
    .context("Failed to generate shares")?;

    if verbose {
        eprintln!(
            "Generated shares: {}x{} each",
            pair.share1.width(),
            pair.share1.height()
        );
    }

    if json {
        let payload = SharePayload {
            share1: to_base64_png(&pair.share1, scale).context("Failed to encode share 1")?,
            share2: to_base64_png(&pair.share2, scale).context("Failed to encode share 2")?,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    save_png(&pair.share1, share1_path, scale)
        .with_context(|| format!("Failed to write share to {}", share1_path.display()))?;
    save_png(&pair.share2, share2_path, scale)
        .with_context(|| format!("Failed to write share to {}", share2_path.display()))?;

    println!("Shares written:");
    println!("  Share 1: {}", share1_path.display());
    println!("  Share 2: {}", share2_path.display());
    println!();
    println!("Each share alone is uniform noise. Keep them apart:");
    println!("  - Anyone holding both can reconstruct the secret");
    println!("  - Stack them with 'inkshare reveal' or physically on transparencies");

    Ok(())
}

/// Checks whether two share images plausibly reconstruct a secret.
fn validate_cmd(
    share1_path: &PathBuf,
    share2_path: &PathBuf,
    strict: bool,
    threshold: u8,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let share1 = load_share(share1_path, threshold)?;
    let share2 = load_share(share2_path, threshold)?;

    if verbose {
        eprintln!(
            "Share 1: {}x{}, {:.1}% ink",
            share1.width(),
            share1.height(),
            share1.ink_fraction() * 100.0
        );
        eprintln!(
            "Share 2: {}x{}, {:.1}% ink",
            share2.width(),
            share2.height(),
            share2.ink_fraction() * 100.0
        );
    }

    let verdict = validate(&share1, &share2).context("Cannot compare shares")?;

    let report = if strict {
        Some(inspect_blocks(&share1, &share2).context("Cannot inspect share blocks")?)
    } else {
        None
    };

    if json {
        match report {
            Some(blocks) => {
                let payload = StrictPayload {
                    is_valid: verdict.is_valid,
                    black_fraction: verdict.black_fraction,
                    blocks,
                    is_genuine_pair: blocks.is_genuine_pair(),
                };
                println!("{}", serde_json::to_string_pretty(&payload)?);
            }
            None => println!("{}", serde_json::to_string_pretty(&verdict)?),
        }
        return Ok(());
    }

    if verdict.is_valid {
        println!(
            "Verdict: VALID (black fraction {:.4})",
            verdict.black_fraction
        );
    } else {
        println!(
            "Verdict: NOT VALID (black fraction {:.4}, needs more than 0.5)",
            verdict.black_fraction
        );
    }

    if let Some(blocks) = report {
        println!();
        println!(
            "Blocks: {} solid, {} checkerboard, {} inconsistent (of {})",
            blocks.solid,
            blocks.checkerboard,
            blocks.inconsistent,
            blocks.total()
        );
        if blocks.is_genuine_pair() {
            println!("Pair consistency: GENUINE (every block matches the generation patterns)");
        } else {
            println!(
                "Pair consistency: NOT GENUINE ({} blocks impossible for a generated pair)",
                blocks.inconsistent
            );
        }
    }

    Ok(())
}

/// Stacks two shares and writes the reconstructed image.
fn reveal_cmd(
    share1_path: &PathBuf,
    share2_path: &PathBuf,
    output: &PathBuf,
    scale: u32,
    threshold: u8,
) -> Result<()> {
    let share1 = load_share(share1_path, threshold)?;
    let share2 = load_share(share2_path, threshold)?;

    let stacked = overlay(&share1, &share2).context("Cannot stack shares")?;

    save_png(&stacked, output, scale)
        .with_context(|| format!("Failed to write overlay to {}", output.display()))?;

    println!("Stacked overlay written to {}", output.display());
    println!("  Size: {}x{}", stacked.width(), stacked.height());
    println!("  Black fraction: {:.4}", stacked.ink_fraction());
    println!();
    println!("Secret ink shows as solid black on a 50% gray background.");

    Ok(())
}

/// Analyzes a secret image before splitting it.
fn info_cmd(image_path: &PathBuf, threshold: u8) -> Result<()> {
    let secret = load_binary(image_path, threshold)
        .with_context(|| format!("Failed to load secret image from {}", image_path.display()))?;

    let ink_fraction = secret.ink_fraction();
    // A genuine pair stacks to half coverage from the background plus
    // half of whatever the secret inks.
    let overlay_fraction = 0.5 + ink_fraction / 2.0;

    println!("Secret Image Analysis");
    println!("=====================");
    println!("  Dimensions: {}x{} pixels", secret.width(), secret.height());
    println!(
        "  Ink pixels: {} of {} ({:.1}% coverage)",
        secret.ink_count(),
        secret.len(),
        ink_fraction * 100.0
    );
    println!(
        "  Share size: {}x{} pixels each",
        secret.width() * 2,
        secret.height() * 2
    );
    println!();
    println!("Expected overlay of a genuine pair:");
    println!("  Black fraction: {:.4}", overlay_fraction);

    if overlay_fraction > 0.5 {
        println!("  Overlay check: would pass");
    } else {
        println!("  Overlay check: would FAIL (secret has no ink at all)");
        println!("  Note: add any dark content to make the pair verifiable");
    }

    Ok(())
}

//! Generate a synthetic low-gradient grayscale image.

use clap::Parser;
use nibbledelta::code_stats;
use rand::Rng;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nbd-gen")]
#[command(about = "Generate a synthetic low-gradient grayscale image")]
#[command(after_help = "OUTPUT:\n  \
    Raw 8-bit samples, row-major. With --pgm a binary PGM (P5) header is prepended,\n  \
    which the codec treats as ordinary samples.")]
struct Args {
    /// Output file path
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "128")]
    width: usize,

    /// Image height in pixels
    #[arg(long, default_value = "128")]
    height: usize,

    /// Maximum per-pixel noise amplitude
    #[arg(long, default_value = "2")]
    noise: u8,

    /// Include occasional sharp edges
    #[arg(long)]
    spikes: bool,

    /// Prepend a PGM header
    #[arg(long)]
    pgm: bool,
}

/// Diagonal illumination gradient with noise
fn generate(args: &Args) -> Vec<u8> {
    let mut rng = rand::rng();
    let mut pixels = Vec::with_capacity(args.width * args.height);
    let span = (args.width + args.height).max(1) as f64;
    let noise = i32::from(args.noise);

    for y in 0..args.height {
        for x in 0..args.width {
            let base = ((x + y) as f64 / span * 200.0) as i32 + 28;
            let jitter = if noise > 0 {
                rng.random_range(-noise..=noise)
            } else {
                0
            };
            let mut value = base + jitter;

            // Roughly 1% of pixels sit on an edge
            if args.spikes && rng.random_range(0..100) < 1 {
                value += rng.random_range(-120..=120);
            }

            pixels.push(value.clamp(0, 255) as u8);
        }
    }

    pixels
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let pixels = generate(&args);
    let mut bytes = Vec::with_capacity(pixels.len() + 32);
    if args.pgm {
        bytes.extend_from_slice(format!("P5\n{} {}\n255\n", args.width, args.height).as_bytes());
    }
    bytes.extend_from_slice(&pixels);

    let result = File::create(&args.output).and_then(|mut file| file.write_all(&bytes));
    if let Err(e) = result {
        eprintln!("Error: Failed to write {}: {e}", args.output.display());
        std::process::exit(1);
    }

    let stats = code_stats(&bytes);
    println!("Generated {}x{} image", args.width, args.height);
    println!("Output: {} ({} bytes)", args.output.display(), bytes.len());
    println!("Expected packed size: {:.1}%", stats.ratio() * 100.0);
}

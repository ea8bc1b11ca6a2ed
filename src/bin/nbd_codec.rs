//! Encode, decode and inspect nibbledelta files.

use clap::{Parser, Subcommand};
use nibbledelta::{code_stats, decode, encode_to_vec, Frame};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nbd-codec")]
#[command(about = "Encode, decode and inspect nibbledelta files")]
#[command(after_help = "FILES:\n  \
    Raw input is any byte file, one sample per byte (e.g. an 8-bit grayscale image).\n  \
    Encoded files carry a 4-byte little-endian sample count followed by the packed stream.\n\n\
LOGGING:\n  \
    Set RUST_LOG=debug to see why a decode or encode failed.")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack a raw sample file into a frame
    Encode { input: PathBuf, output: PathBuf },
    /// Unpack a frame back to raw samples
    Decode { input: PathBuf, output: PathBuf },
    /// Hex-dump raw samples and their packed stream
    Dump {
        input: PathBuf,

        /// Maximum number of samples to dump (0 = all)
        #[arg(short, long, default_value = "64")]
        limit: usize,
    },
    /// Print compression statistics and verify the round trip
    Stats { input: PathBuf },
}

fn read(path: &Path) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), String> {
    fs::write(path, bytes).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn hexdump(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

fn run_encode(input: &Path, output: &Path) -> Result<(), String> {
    let samples = read(input)?;
    let frame = Frame::encode(&samples).map_err(|e| e.to_string())?;
    let bytes = frame.to_bytes();
    write(output, &bytes)?;
    println!("Encoded {} samples", samples.len());
    println!("Output: {} ({} bytes, {:.1}%)", output.display(), bytes.len(), frame.ratio() * 100.0);
    Ok(())
}

fn run_decode(input: &Path, output: &Path) -> Result<(), String> {
    let bytes = read(input)?;
    let frame = Frame::from_bytes(&bytes).map_err(|e| e.to_string())?;
    let samples = frame.decode().map_err(|e| e.to_string())?;
    write(output, &samples)?;
    println!("Decoded {} samples", samples.len());
    println!("Output: {}", output.display());
    Ok(())
}

fn run_dump(input: &Path, limit: usize) -> Result<(), String> {
    let mut samples = read(input)?;
    if limit > 0 {
        samples.truncate(limit);
    }
    let packed = encode_to_vec(&samples);
    println!("{}", hexdump(&samples));
    println!("{}", hexdump(&packed));
    Ok(())
}

fn run_stats(input: &Path) -> Result<(), String> {
    let samples = read(input)?;
    let stats = code_stats(&samples);
    let packed = encode_to_vec(&samples);
    let decoded = decode(&packed, samples.len()).map_err(|e| e.to_string())?;
    if decoded != samples {
        return Err("Round trip mismatch".to_string());
    }

    println!("File: {}", input.display());
    println!("Samples: {}", stats.samples);
    println!(
        "Packed: {} bytes ({:.1}%)",
        packed.len(),
        stats.ratio() * 100.0
    );
    println!("Codes:");
    println!("  1 nibble:  {}", stats.short);
    println!("  2 nibbles: {}", stats.mid);
    println!("  4 nibbles: {}", stats.escape);
    println!("Round trip: OK");
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match &args.command {
        Command::Encode { input, output } => run_encode(input, output),
        Command::Decode { input, output } => run_decode(input, output),
        Command::Dump { input, limit } => run_dump(input, *limit),
        Command::Stats { input } => run_stats(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

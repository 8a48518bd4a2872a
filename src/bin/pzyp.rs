//! pzyp CLI - LZSS file compression tool
//!
//! Compresses a file into the `.lzs` format, decompresses one back, or
//! prints the metadata recorded in a compressed file's header.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use pzyp::{compress, decompress, Header, PzypContext};

/// Extension given to compressed files.
const FILE_EXTENSION: &str = "lzs";

/// An LZSS file compressor/decompressor.
#[derive(Parser, Debug)]
#[command(name = "pzyp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Decompress instead of compress
    #[arg(short, long)]
    decompress: bool,

    /// Print the header of a compressed file and exit
    #[arg(short, long, conflicts_with = "decompress")]
    summary: bool,

    /// Compression level (1-4, higher = larger window)
    #[arg(
        short,
        long,
        default_value = "2",
        value_parser = clap::value_parser!(u8).range(1..=4)
    )]
    level: u8,

    /// Output file path
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.summary {
        return print_summary(&args.input);
    }
    if args.decompress {
        run_decompress(&args)
    } else {
        run_compress(&args)
    }
}

fn run_compress(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = fs::read(&args.input)?;
    let file_name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("input path has no usable file name")?;

    let ctx = PzypContext::from_level(args.level)?;
    let start = Instant::now();
    let packed = compress(&input, file_name, &ctx)?;
    let elapsed = start.elapsed();

    let output_path = args.output.clone().unwrap_or_else(|| {
        let mut path = args.input.clone();
        path.set_extension(FILE_EXTENSION);
        path
    });
    fs::write(&output_path, &packed)?;

    report(args, &output_path, input.len(), packed.len(), elapsed);
    if args.verbose {
        eprintln!("  Level: {} (window {} bytes)", args.level, ctx.window_size());
    }
    Ok(())
}

fn run_decompress(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let packed = fs::read(&args.input)?;

    let start = Instant::now();
    let (header, restored) = decompress(&packed)?;
    let elapsed = start.elapsed();

    // Restore under the recorded name next to the input unless told otherwise.
    let output_path = args.output.clone().unwrap_or_else(|| {
        let mut path = args.input.clone();
        path.set_file_name(&header.file_name);
        path
    });
    fs::write(&output_path, &restored)?;

    report(args, &output_path, packed.len(), restored.len(), elapsed);
    Ok(())
}

fn print_summary(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = fs::File::open(path)?;
    let header = Header::read_from(&mut file)?;
    let ctx = header.context()?;

    println!("File name: {}", header.file_name);
    println!("Compression date/time: {} (Unix seconds)", header.timestamp);
    println!(
        "Compression parameters: window {} bytes ({} bits), max sequence {} bytes ({} bits)",
        ctx.window_size(),
        header.offset_bits,
        ctx.max_string_size(),
        header.len_bits
    );
    Ok(())
}

fn report(args: &Args, output_path: &PathBuf, in_size: usize, out_size: usize, elapsed: std::time::Duration) {
    let ratio = if in_size > 0 {
        (out_size as f64 / in_size as f64) * 100.0
    } else {
        0.0
    };

    if args.verbose {
        eprintln!("Output: {:?}", output_path);
        eprintln!("  Time: {:.2?}", elapsed);
        eprintln!(
            "  Size: {} -> {} ({:.1}%)",
            format_size(in_size as u64),
            format_size(out_size as u64),
            ratio
        );
    } else {
        println!(
            "{} -> {} ({:.1}%)",
            format_size(in_size as u64),
            format_size(out_size as u64),
            ratio
        );
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

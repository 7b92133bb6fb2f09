//! OxiCodec CLI
//!
//! Compress files with run-length, Huffman, Golomb or LZW coding, inspect the
//! resulting payloads, and quantize PPM images to a small palette.

mod commands;
mod logger;
mod ppm;
mod utils;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use commands::{CompressOptions, cmd_bench, cmd_compress, cmd_decompress, cmd_inspect, cmd_quantize};
use oxicodec::golomb::{GolombConfig, GolombMapping, GolombParameter};
use oxicodec::lzw::{LzwConfig, OverflowPolicy};
use oxicodec::quantize::QuantizerConfig;
use oxicodec::{Algorithm, CodecConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxicodec")]
#[command(author, version, about = "Pure Rust codec workbench")]
#[command(long_about = "
OxiCodec compresses whole files with classic lossless codecs and reduces
PPM images to a fixed-size palette.
Algorithms: rle, huffman, golomb, lzw (lossless), quantize (lossy)

Examples:
  oxicodec compress notes.txt -a huffman
  oxicodec compress samples.raw -a golomb --rice --delta
  oxicodec compress log.txt -a lzw --lzw-bits 16 --lzw-reset
  oxicodec decompress notes.txt.huffman.oxc
  oxicodec inspect notes.txt.huffman.oxc --json
  oxicodec bench notes.txt
  oxicodec quantize photo.ppm -k 16
")]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Algorithm
        #[arg(short, long, value_enum)]
        algorithm: LosslessAlgorithm,

        /// Output file (default: <input>.<algorithm>.oxc)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fixed Golomb divisor
        #[arg(long, value_name = "N", conflicts_with = "rice")]
        golomb_b: Option<u32>,

        /// Round the estimated Golomb divisor to a power of two
        #[arg(long)]
        rice: bool,

        /// Golomb-code differences between neighbouring bytes
        #[arg(long)]
        delta: bool,

        /// Maximum LZW code width (9-16)
        #[arg(long, value_name = "N", default_value_t = LzwConfig::DEFAULT_BITS)]
        lzw_bits: u8,

        /// Reset the LZW dictionary when it fills up instead of freezing it
        #[arg(long)]
        lzw_reset: bool,

        /// Overwrite the output without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Restore a compressed file
    #[command(alias = "d")]
    Decompress {
        /// Payload file
        payload: PathBuf,

        /// Output file (default: payload name without its extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Show the header and parameters of a payload
    #[command(alias = "i")]
    Inspect {
        /// Payload file
        payload: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Compare every lossless codec on one file
    Bench {
        /// File to compress
        input: PathBuf,
    },

    /// Reduce a binary PPM image to at most k colours
    #[command(alias = "q")]
    Quantize {
        /// P6 PPM image
        input: PathBuf,

        /// Palette size (2-256)
        #[arg(short, default_value_t = 16)]
        k: usize,

        /// Reconstructed image (default: <input>.quantized.ppm)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the quantized payload here
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Maximum refinement iterations
        #[arg(long, default_value_t = QuantizerConfig::DEFAULT_MAX_ITERATIONS)]
        iterations: u32,

        /// Overwrite outputs without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Byte-oriented algorithms selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LosslessAlgorithm {
    /// Run-length encoding
    Rle,
    /// Static Huffman coding
    Huffman,
    /// Golomb / Rice coding
    Golomb,
    /// Lempel-Ziv-Welch
    Lzw,
}

impl From<LosslessAlgorithm> for Algorithm {
    fn from(algorithm: LosslessAlgorithm) -> Self {
        match algorithm {
            LosslessAlgorithm::Rle => Algorithm::Rle,
            LosslessAlgorithm::Huffman => Algorithm::Huffman,
            LosslessAlgorithm::Golomb => Algorithm::Golomb,
            LosslessAlgorithm::Lzw => Algorithm::Lzw,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            algorithm,
            output,
            golomb_b,
            rice,
            delta,
            lzw_bits,
            lzw_reset,
            force,
        } => {
            let parameter = match (golomb_b, rice) {
                (Some(b), _) => GolombParameter::Fixed(b),
                (None, true) => GolombParameter::Rice,
                (None, false) => GolombParameter::Auto,
            };
            let mapping = if delta {
                GolombMapping::Delta
            } else {
                GolombMapping::Raw
            };
            let overflow = if lzw_reset {
                OverflowPolicy::Reset
            } else {
                OverflowPolicy::Freeze
            };
            let config = CodecConfig::default()
                .with_golomb(GolombConfig::new(parameter, mapping))
                .with_lzw(LzwConfig::new(lzw_bits, overflow));
            cmd_compress(&CompressOptions {
                input,
                algorithm: algorithm.into(),
                output,
                config,
                force,
            })
        }
        Commands::Decompress {
            payload,
            output,
            force,
        } => cmd_decompress(&payload, output, force),
        Commands::Inspect { payload, json } => cmd_inspect(&payload, json),
        Commands::Bench { input } => cmd_bench(&input),
        Commands::Quantize {
            input,
            k,
            output,
            payload,
            iterations,
            force,
        } => cmd_quantize(
            &input,
            k,
            output,
            payload,
            &CodecConfig::default().with_quantizer(QuantizerConfig::new(iterations)),
            force,
        ),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "oxicodec", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

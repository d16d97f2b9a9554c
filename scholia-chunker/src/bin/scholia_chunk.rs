use clap::Parser;
use scholia_chunker::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP_RATIO, SectionChunker};
use std::fs;
use std::io::{self, Read};

/// Chunk a research-paper text file into section-aware JSON chunks.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input text file. If not provided, reads from stdin.
    #[arg(short, long)]
    input: Option<String>,

    /// Source document name recorded on every chunk.
    #[arg(short, long, default_value = "stdin.txt")]
    source: String,

    /// Target character budget per chunk.
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Fraction of the budget carried over as overlap between chunks.
    #[arg(short = 'r', long, default_value_t = DEFAULT_OVERLAP_RATIO)]
    overlap_ratio: f32,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let text = if let Some(input_path) = args.input {
        fs::read_to_string(input_path)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let chunker = SectionChunker::new(args.chunk_size, args.overlap_ratio);
    let chunks = chunker.chunk_paper(&text, &args.source);

    let json_output = serde_json::to_string_pretty(&chunks)?;
    println!("{json_output}");

    Ok(())
}

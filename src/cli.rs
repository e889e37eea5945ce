//! Argument definitions and the conversion run by the `jpath` binary.

use clap::Parser;
use jpath::tree::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INDEX, DEFAULT_MAX_SLOTS};
use jpath::Marshaller;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

/// Assemble a nested JSON document from a JSON object of flat, dot-delimited
/// keys.
#[derive(Parser, Debug)]
#[command(name = "jpath")]
#[command(version)]
pub struct Cli {
    /// File holding the flat JSON object. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent the output
    #[arg(short, long)]
    pub pretty: bool,

    /// Largest array index a key may use
    #[arg(long, default_value_t = DEFAULT_MAX_INDEX, env = "JPATH_MAX_INDEX")]
    pub max_index: usize,

    /// Most segments a key may have
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "JPATH_MAX_DEPTH")]
    pub max_depth: usize,

    /// Most array slots the document may hold
    #[arg(long, default_value_t = DEFAULT_MAX_SLOTS, env = "JPATH_MAX_SLOTS")]
    pub max_slots: usize,
}

impl Cli {
    pub fn marshaller(&self) -> Marshaller {
        Marshaller::builder()
            .max_index(self.max_index)
            .max_depth(self.max_depth)
            .max_slots(self.max_slots)
            .pretty(self.pretty)
            .build()
    }
}

/// Reads the flat object from `input`, writes the document and a trailing
/// newline to `output`.
pub fn convert(
    marshaller: &Marshaller,
    input: impl Read,
    mut output: impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let flat: serde_json::Value = serde_json::from_reader(input)?;
    let bytes = marshaller.marshal_json(flat).inspect_err(|e| {
        tracing::warn!(error = %e, "failed to assemble document");
    })?;

    output.write_all(&bytes)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}

pub fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    convert(&cli.marshaller(), reader, writer)
}

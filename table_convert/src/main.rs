use clap::Parser;
use log::info;
use skiggle::{RecognizerConfig, ReferenceTable, TemplateSet};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Builds a reference table from glyph templates and writes it as bincode.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Glyph template file (JSON)
    templates: PathBuf,

    /// Output file for the serialized table
    output: PathBuf,

    /// Recognizer config (JSON) the table is built with
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RecognizerConfig::from_path(path)?,
        None => RecognizerConfig::default(),
    };
    let templates = TemplateSet::from_path(&args.templates)?;
    let table = ReferenceTable::build(&templates, &config)?;
    let bytes = table.to_bincode()?;
    fs::write(&args.output, &bytes)?;
    info!("wrote {} entries ({} bytes) to {}", table.len(), bytes.len(), args.output.display());
    println!("{} table: {} entries, scheme {}", table.language(), table.len(), table.scheme());
    Ok(())
}

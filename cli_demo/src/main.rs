use clap::Parser;
use log::{info, warn};
use serde_derive::{Deserialize, Serialize};
use skiggle::{Language, Point, RecognitionSession, RecognizerConfig, StrokeOutcome};
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

/// Replays recorded ink through a recognition session and reports how often
/// the intended character comes out on top.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON-lines file, one recorded character per line
    #[arg(default_value = "debug/inputs.txt")]
    inputs: PathBuf,

    /// Recognizer config (JSON); defaults apply to missing keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Language for lines that don't name one
    #[arg(long, default_value = "latin")]
    language: Language,

    /// Number of passes over the inputs
    #[arg(long, default_value_t = 100)]
    iters: usize,
}

#[derive(Serialize, Deserialize)]
struct Input {
    char: String,
    #[serde(default)]
    language: Option<Language>,
    strokes: Vec<Vec<[f32; 2]>>,
}

fn read_inputs(path: &PathBuf) -> Result<Vec<Input>, Box<dyn Error>> {
    let mut res: Vec<Input> = Vec::new();
    let file = File::open(path)?;
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        res.push(serde_json::from_str(&line)?);
    }
    Ok(res)
}

fn get_strokes(input: &Input) -> Vec<Vec<Point>> {
    input
        .strokes
        .iter()
        .map(|stroke| stroke.iter().map(|&[x, y]| Point { x, y }).collect())
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RecognizerConfig::from_path(path)?,
        None => RecognizerConfig::default(),
    };
    let inputs = read_inputs(&args.inputs)?;
    let characters: Vec<(char, Language, Vec<Vec<Point>>)> = inputs
        .iter()
        .filter_map(|input| match input.char.chars().next() {
            Some(ch) => Some((ch, input.language.unwrap_or(args.language), get_strokes(input))),
            None => {
                warn!("skipping input with empty char");
                None
            }
        })
        .collect();
    println!("Loaded {} inputs; starting {} cycles of evaluation.", characters.len(), args.iters);

    let mut session = RecognitionSession::new(args.language, config)?;
    let start = Instant::now();
    let mut guessed = 0;
    for _ in 0..args.iters {
        for (expected, language, strokes) in &characters {
            if session.language() != *language {
                session.set_language(*language)?;
            }
            let mut top: Option<char> = None;
            for stroke in strokes {
                match session.add_stroke(stroke)? {
                    StrokeOutcome::Candidates(candidates) => {
                        top = candidates.first().map(|c| c.glyph)
                    }
                    StrokeOutcome::Cleared => top = None,
                    StrokeOutcome::Ignored => {}
                }
            }
            if top == Some(*expected) {
                guessed += 1;
            }
            session.clear();
        }
    }
    let duration = start.elapsed();
    info!("{} recognitions in {:?}", characters.len() * args.iters, duration);
    println!("Finished in {:?}. Correct guesses: {}.", duration, guessed);
    Ok(())
}

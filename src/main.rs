//! chord2notes - print the pitches of chord symbols

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::Level;

use chord2notes::{
    chord_to_midi, chord_to_notes_with_options, parse_quality, ChordError, ChordOptions,
    ChordSymbol, DegreeVector, Spelling,
};

/// Realize chord symbols as concrete pitches
#[derive(Parser)]
#[command(name = "chord2notes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chord symbols (e.g. Cm7b5), or qualities when --root is given
    #[arg(required = true)]
    symbols: Vec<String>,

    /// Root pitch applied to every argument, which is then read as a bare quality
    #[arg(short, long)]
    root: Option<String>,

    /// Pitch number where the root's octave window starts (default 48 = C3)
    #[arg(short, long, allow_negative_numbers = true)]
    base: Option<i32>,

    /// Name black keys with sharps instead of flats
    #[arg(long)]
    sharps: bool,

    /// YAML options file (base-octave-start, spelling)
    #[arg(short, long)]
    config: Option<String>,

    /// Print pitch numbers instead of names
    #[arg(long)]
    midi: bool,

    /// Also print the parsed degree vector
    #[arg(long)]
    explain: bool,

    /// Output machine-readable JSON
    #[arg(long)]
    json: bool,

    /// Log parsing details to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct ChordReport {
    symbol: String,
    root: String,
    quality: String,
    notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    midi: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    degrees: Option<DegreeVector>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(cli: &Cli) -> Result<ChordOptions, ChordError> {
    let mut options = match &cli.config {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                ChordError::ConfigError(format!("cannot read '{}': {}", path, e))
            })?;
            ChordOptions::from_yaml(&content)?
        }
        None => ChordOptions::default(),
    };
    if let Some(base) = cli.base {
        options = options.with_base_octave_start(base);
    }
    if cli.sharps {
        options = options.with_spelling(Spelling::Sharp);
    }
    Ok(options)
}

fn realize(cli: &Cli, options: &ChordOptions, argument: &str) -> Result<ChordReport, ChordError> {
    let symbol = match &cli.root {
        Some(root) => ChordSymbol {
            root: root.clone(),
            quality: argument.to_string(),
        },
        None => ChordSymbol::parse(argument)?,
    };
    let notes = chord_to_notes_with_options(&symbol.root, &symbol.quality, options)?;
    let midi = if cli.midi {
        Some(chord_to_midi(&symbol.root, &symbol.quality, options)?)
    } else {
        None
    };
    let degrees = if cli.explain {
        Some(parse_quality(&symbol.quality)?)
    } else {
        None
    };
    Ok(ChordReport {
        symbol: argument.to_string(),
        root: symbol.root,
        quality: symbol.quality,
        notes,
        midi,
        degrees,
    })
}

fn print_report(report: &ChordReport) {
    let pitches = match &report.midi {
        Some(numbers) => numbers.iter().map(u8::to_string).collect::<Vec<_>>(),
        None => report.notes.clone(),
    };
    println!("{}: {}", report.symbol, pitches.join(" "));
    if let Some(degrees) = &report.degrees {
        let slots: Vec<String> = degrees
            .slots()
            .iter()
            .map(|slot| match slot.offset() {
                Some(offset) => format!("{:+}", offset),
                None => "-".to_string(),
            })
            .collect();
        println!("  degrees [1 3 5 7 9 11 13]: {}", slots.join(" "));
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = match load_options(&cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut reports = Vec::new();
    for argument in &cli.symbols {
        match realize(&cli, &options, argument) {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error in '{}': {}", argument, e);
                return ExitCode::FAILURE;
            }
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error writing JSON: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for report in &reports {
            print_report(report);
        }
    }
    ExitCode::SUCCESS
}

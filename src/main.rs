use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use leadsheet_converter::convert::{ConversionSummary, OutputLayout};
use leadsheet_converter::quantize::{GridQuantizer, PassThroughQuantizer, Quantizer};
use leadsheet_converter::report::{check_chords, check_rehearsal_marks};
use leadsheet_converter::validation::validate_musicxml;
use leadsheet_converter::{ConvertConfig, ConvertPipeline};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "leadsheet-converter")]
#[command(about = "Convert MIDI files to MusicXML lead sheets", long_about = None)]
struct Args {
    /// Input MIDI file, or a directory searched for .mid/.midi files
    #[arg(short = 'i', long)]
    input: Option<String>,

    /// Output MusicXML file, or a directory when the input is a directory
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Print every chord candidate found in a MIDI file and exit
    #[arg(long, value_name = "FILE")]
    check_chords: Option<String>,

    /// Print every XF rehearsal mark found in a MIDI file and exit
    #[arg(long = "check-rehe", value_name = "FILE")]
    check_rehearsal: Option<String>,

    /// Only validate an existing output file (don't convert)
    #[arg(long)]
    validate: bool,

    /// Keep raw MIDI timing instead of snapping to a grid
    #[arg(long)]
    no_quantize: bool,

    /// Quantization grid as quarter-note divisors, in order of preference
    #[arg(long, value_delimiter = ',', default_value = "4,3")]
    grid: Vec<u32>,

    /// Leave XF rehearsal marks out of the score
    #[arg(long)]
    no_rehearsal: bool,

    /// MIDI channel carrying the melody (1-16)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
    melody_channel: u8,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        Args::command().print_help()?;
        println!();
        std::process::exit(1);
    }

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Some(path) = &args.check_chords {
        check_chords(&expand(path))?;
        return Ok(());
    }
    if let Some(path) = &args.check_rehearsal {
        check_rehearsal_marks(&expand(path))?;
        return Ok(());
    }

    let output = match &args.output {
        Some(output) => expand(output),
        None if args.validate => bail!("--validate needs --output <FILE>"),
        None => bail!("Both --input and --output are required"),
    };

    // If validate-only mode, just validate and exit
    if args.validate {
        log::info!("Validation mode - checking existing output...");
        validate_musicxml(&output)?;
        log::info!("✅ Validation completed!");
        return Ok(());
    }

    let Some(input) = args.input.as_deref().map(expand) else {
        bail!("Both --input and --output are required");
    };

    log::info!("Lead Sheet Converter");
    log::info!("====================");

    let config = ConvertConfig::new()
        .with_melody_channel(args.melody_channel - 1)
        .with_rehearsal_marks(!args.no_rehearsal);

    if args.no_quantize {
        log::info!("Quantization disabled - keeping MIDI resolution");
        run(config, PassThroughQuantizer::new(), input, output)
    } else {
        let quantizer = GridQuantizer::new(args.grid.clone())?;
        log::info!("Quantization grid: {:?}", quantizer.divisors());
        run(config, quantizer, input, output)
    }
}

fn run<Q: Quantizer>(config: ConvertConfig, quantizer: Q, input: PathBuf, output: PathBuf) -> Result<()> {
    let pipeline = ConvertPipeline::new(config, quantizer);
    let layout = OutputLayout::new(input, output);
    let jobs = layout.jobs()?;

    if jobs.is_empty() {
        bail!("No MIDI files found");
    }

    let mut failures = 0;
    let summaries: Vec<ConversionSummary> = if layout.is_batch() {
        let mut summaries = Vec::new();
        for (job, result) in jobs.iter().zip(pipeline.convert_all(&jobs)) {
            match result {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    failures += 1;
                    log::error!("Failed to convert {:?}: {:#}", job.input, e);
                }
            }
        }
        summaries
    } else {
        let job = &jobs[0];
        vec![pipeline.convert(&job.input, &job.output)?]
    };

    log::info!("Conversion completed successfully!");

    // Auto-validate after conversion
    log::info!("Running post-conversion validation...");
    for summary in &summaries {
        validate_musicxml(&summary.output)?;
        log::info!(
            "  - {:?}: {} measure(s), {} note(s), {} chord(s)",
            summary.output,
            summary.measures,
            summary.notes,
            summary.chords
        );
    }
    log::info!("✅ Validation passed!");

    if failures > 0 {
        bail!("{} of {} file(s) failed to convert", failures, jobs.len());
    }
    Ok(())
}

/// Expand ~ in a user-supplied path
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

//! scorewright CLI: render a built-in score to WAV.
//!
//! Usage:
//!   sw-cli scale --wav scale.wav
//!   sw-cli round --wav round.wav --lead-out 2 --log-level debug

mod logger;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use sw_engine::ConductorSettings;
use sw_master::{demos, Controller, MasterError};
use sw_score::Score;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Demo {
    /// One voice, C major up and down with a tempo ramp.
    Scale,
    /// Three staggered voices with a ritardando.
    Round,
}

#[derive(Parser, Debug)]
#[command(name = "sw-cli", version, about = "Render a score offline")]
struct Args {
    /// Built-in score to render.
    #[arg(value_enum, default_value = "scale")]
    demo: Demo,

    /// Write the performance to this WAV file.
    #[arg(long)]
    wav: Option<PathBuf>,

    /// Output sample rate in Hz.
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,

    /// Integration rate used to find the length of the score, in Hz.
    #[arg(long, default_value_t = 1000.0)]
    time_conversion_rate: f64,

    /// Seconds of silence rendered after the last note.
    #[arg(long, default_value_t = 1.0)]
    lead_out: f64,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logger::init(args.log_level) {
        eprintln!("Failed to install logger: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), MasterError> {
    let score = match args.demo {
        Demo::Scale => demos::scale()?,
        Demo::Round => demos::round()?,
    };
    print_summary(&score);

    let settings = ConductorSettings {
        time_conversion_sample_rate: args.time_conversion_rate,
        rendering_sample_rate: args.sample_rate as f64,
    };
    let ctrl = Controller::new(score);
    let conductor = ctrl.conductor(settings)?;
    println!("Length:   {:.3}s", conductor.end_of_score());
    println!();

    let Some(path) = &args.wav else {
        println!("No --wav given, nothing rendered.");
        return Ok(());
    };

    println!("Rendering to {} at {} Hz...", path.display(), args.sample_rate);
    let wav = ctrl.render_to_wav(settings, args.lead_out)?;
    println!("Rendered {} bytes", wav.len());
    fs::write(path, &wav)?;
    println!("Done.");
    Ok(())
}

fn print_summary(score: &Score) {
    println!("Parts:    {}", score.parts.len());
    for part in &score.parts {
        println!(
            "  {:<8} {:<10} {} notes, offsets {}..{}",
            part.id,
            part.instrument.name.as_str(),
            part.notes.len(),
            part.start_offset(),
            part.end_offset()
        );
    }
    println!("Tempo:    {} changes", score.tempo_profile.changes().len());
}

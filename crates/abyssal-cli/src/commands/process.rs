//! File-based processing command.

use super::common::{linear_to_db, parse_key_val, peak, resolve_preset, rms};
use abyssal_engine::{Engine, EngineConfig, Param};
use abyssal_io::{read_wav, render_offline, write_wav};
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset to apply (index 0-9 or name)
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter overrides applied after the preset (e.g., "drown=0.3")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Restore parameters from a saved state file (JSON) before processing
    #[arg(long)]
    state: Option<PathBuf>,

    /// Save the final parameters to a state file (JSON)
    #[arg(long)]
    save_state: Option<PathBuf>,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::new(config)?;

    if let Some(path) = &args.state {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read state file '{}'", path.display()))?;
        engine.import_state(&bytes)?;
    }

    if let Some(spec) = &args.preset {
        let (index, preset) = resolve_preset(spec)?;
        engine.params().set_revelation(index as i64);
        engine.apply_pending_presets();
        println!("Preset {index}: {}", preset.name);
    }

    for (key, value) in &args.param {
        apply_param(&engine, key, value)?;
    }

    println!("Reading {}...", args.input.display());
    let (mut audio, spec) = read_wav(&args.input)
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;
    println!(
        "  {} frames, {} Hz, {}, {:.2}s",
        audio.frames(),
        spec.sample_rate,
        audio.layout(),
        audio.duration_secs()
    );
    let input_samples = audio.interleaved();

    let pb = ProgressBar::new(audio.frames() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    let started = std::time::Instant::now();
    render_offline(&mut engine, &mut audio, args.block_size, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");
    tracing::info!(
        frames = audio.frames(),
        block_size = args.block_size,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "rendered"
    );

    let output_samples = audio.interleaved();
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&input_samples)),
        linear_to_db(peak(&input_samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output_samples)),
        linear_to_db(peak(&output_samples))
    );

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio, args.bit_depth)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;

    if let Some(path) = &args.save_state {
        std::fs::write(path, engine.export_state()?)
            .with_context(|| format!("failed to write state file '{}'", path.display()))?;
        println!("Saved state to {}", path.display());
    }
    println!("Done!");

    Ok(())
}

/// Apply one `--param` override. Continuous values must be in `[0, 1]`;
/// `revelation` takes a preset index or name and applies it immediately.
fn apply_param(engine: &Engine, key: &str, value: &str) -> anyhow::Result<()> {
    let param = Param::from_string_id(key).with_context(|| {
        let known: Vec<&str> = Param::ALL.iter().map(|p| p.string_id()).collect();
        format!("unknown parameter '{key}' (known: {})", known.join(", "))
    })?;

    if param == Param::Revelation {
        let (index, _) = resolve_preset(value)?;
        engine.params().set_revelation(index as i64);
        engine.apply_pending_presets();
        tracing::debug!(param = %param, index, "applied parameter override");
        return Ok(());
    }

    let parsed: f32 = value
        .parse()
        .with_context(|| format!("invalid value '{value}' for {key}"))?;
    if !(0.0..=1.0).contains(&parsed) {
        anyhow::bail!("{key} must be between 0 and 1, got {parsed}");
    }
    engine.params().set(param, parsed);
    tracing::debug!(param = %param, value = parsed, "applied parameter override");
    Ok(())
}

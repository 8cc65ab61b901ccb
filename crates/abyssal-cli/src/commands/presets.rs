//! Preset listing command.

use super::common::resolve_preset;
use abyssal_engine::{PRESETS, Param};
use clap::Args;

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to show (index or name). Lists all presets when omitted.
    name: Option<String>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.name {
        Some(spec) => show(&spec),
        None => {
            list();
            Ok(())
        }
    }
}

fn list() {
    println!("Factory presets:\n");
    for (index, preset) in PRESETS.iter().enumerate() {
        let knobs: Vec<String> = preset.knobs.iter().map(u8::to_string).collect();
        println!("  {index}  {:<14} {}", preset.name, knobs.join(" "));
    }
    println!("\nKnob order: corruption drown obscura void erosion whispers tremor");
}

fn show(spec: &str) -> anyhow::Result<()> {
    let (index, preset) = resolve_preset(spec)?;
    println!("Preset {index}: {}\n", preset.name);
    for ((param, knob), value) in Param::CONTINUOUS
        .into_iter()
        .zip(preset.knobs)
        .zip(preset.normalized())
    {
        println!("  {:<12} knob {:>2}  value {:.3}", param.string_id(), knob, value);
    }
    Ok(())
}

//! Integration tests for abyssal-cli.
//!
//! Runs the `abyssal` binary end to end: listings, file processing with
//! presets and overrides, state files and error reporting.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `abyssal` binary built by cargo.
fn abyssal_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_abyssal"))
}

fn write_sine(path: &Path, channels: u16, frames: usize) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 48000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let s = (i as f32 * 2.0 * std::f32::consts::PI * 220.0 / 48000.0).sin() * 0.5;
        for _ in 0..channels {
            writer.write_sample(s).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn read_samples(path: &Path) -> (hound::WavSpec, Vec<f32>) {
    let reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.into_samples::<f32>().map(Result::unwrap).collect();
    (spec, samples)
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_lists_all_ten() {
    let output = abyssal_bin().arg("presets").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "Void Walker",
        "Neural Snap",
        "Steam Hammer",
        "Black Hole",
        "Heartbeat",
        "Rusty Gears",
        "Ghost Pipe",
        "Engine Fail",
        "Dark Mass",
        "Abyssal Gaze",
    ] {
        assert!(stdout.contains(name), "listing should contain '{name}'");
    }
}

#[test]
fn cli_presets_show_by_name() {
    let output = abyssal_bin().args(["presets", "black hole"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Preset 3: Black Hole"));
    assert!(stdout.contains("void"));
    assert!(stdout.contains("1.000"));
}

#[test]
fn cli_presets_unknown_fails() {
    let output = abyssal_bin().args(["presets", "42"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_params_lists_every_parameter() {
    let output = abyssal_bin().arg("params").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in [
        "corruption", "drown", "obscura", "void", "erosion", "whispers", "tremor", "revelation",
    ] {
        assert!(stdout.contains(id), "params should list '{id}'");
    }
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

#[test]
fn cli_process_stereo_with_preset() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_sine(&input, 2, 4800);

    let status = abyssal_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .args(["--preset", "9", "--block-size", "256"])
        .status()
        .unwrap();
    assert!(status.success());

    let (spec, samples) = read_samples(&output);
    assert_eq!(spec.channels, 2);
    assert_eq!(samples.len(), 4800 * 2);
    assert!(samples.iter().all(|s| s.is_finite()));
}

#[test]
fn cli_process_drown_zero_is_transparent() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_sine(&input, 1, 2000);

    let status = abyssal_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .args(["--param", "corruption=1", "--param", "drown=0"])
        .status()
        .unwrap();
    assert!(status.success());

    let (_, original) = read_samples(&input);
    let (_, processed) = read_samples(&output);
    assert_eq!(original, processed);
}

#[test]
fn cli_process_saves_and_restores_state() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let first = dir.path().join("first.wav");
    let second = dir.path().join("second.wav");
    let state = dir.path().join("state.json");
    write_sine(&input, 1, 2000);

    let status = abyssal_bin()
        .arg("process")
        .arg(&input)
        .arg(&first)
        .args(["--preset", "Heartbeat", "--param", "tremor=0.9", "--save-state"])
        .arg(&state)
        .status()
        .unwrap();
    assert!(status.success());

    let blob: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&state).unwrap()).unwrap();
    assert_eq!(blob["revelation"], 4);
    assert!((blob["params"]["tremor"].as_f64().unwrap() - 0.9).abs() < 1e-6);

    let status = abyssal_bin()
        .arg("process")
        .arg(&input)
        .arg(&second)
        .arg("--state")
        .arg(&state)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(read_samples(&first).1, read_samples(&second).1);
}

#[test]
fn cli_process_rejects_out_of_range_param() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_sine(&input, 1, 100);

    let output = abyssal_bin()
        .arg("process")
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .args(["--param", "drown=2"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("drown must be between 0 and 1"));
}

#[test]
fn cli_process_logs_overrides_at_debug() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_sine(&input, 1, 500);

    let output = abyssal_bin()
        .env("RUST_LOG", "debug")
        .env("NO_COLOR", "1")
        .arg("process")
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .args(["--param", "tremor=0.4"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("applied parameter override"), "stderr: {stderr}");
    assert!(stderr.contains("rendered"), "stderr: {stderr}");
}

#[test]
fn cli_process_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = abyssal_bin()
        .arg("process")
        .arg(dir.path().join("missing.wav"))
        .arg(dir.path().join("out.wav"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[test]
fn cli_process_honors_config_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let config = dir.path().join("abyssal.toml");
    write_sine(&input, 1, 100);
    std::fs::write(&config, "max_delay_seconds = 0.1\n").unwrap();

    // A 500 ms echo cannot fit a 100 ms buffer.
    let output = abyssal_bin()
        .arg("process")
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}

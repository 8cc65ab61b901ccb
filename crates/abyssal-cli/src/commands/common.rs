//! Helpers shared by several subcommands.

use abyssal_engine::{PRESET_COUNT, Preset, find_by_name, preset_at};

/// Parse `key=value` from the command line.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        )),
    }
}

/// Resolve a preset given as an index or a name.
pub fn resolve_preset(spec: &str) -> anyhow::Result<(usize, &'static Preset)> {
    if let Ok(index) = spec.trim().parse::<i64>() {
        return preset_at(index)
            .map(|p| (index as usize, p))
            .ok_or_else(|| {
                anyhow::anyhow!("preset index {index} out of range (0-{})", PRESET_COUNT - 1)
            });
    }
    find_by_name(spec).ok_or_else(|| {
        anyhow::anyhow!("unknown preset '{spec}' (run `abyssal presets` for the list)")
    })
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_parsing() {
        assert_eq!(
            parse_key_val("drown=0.3"),
            Ok(("drown".to_string(), "0.3".to_string()))
        );
        assert!(parse_key_val("drown").is_err());
        assert!(parse_key_val("=0.3").is_err());
    }

    #[test]
    fn presets_by_index_or_name() {
        assert_eq!(resolve_preset("9").unwrap().1.name, "Abyssal Gaze");
        assert_eq!(resolve_preset("ghost pipe").unwrap().0, 6);
        assert!(resolve_preset("10").is_err());
        assert!(resolve_preset("-1").is_err());
        assert!(resolve_preset("Nope").is_err());
    }

    #[test]
    fn level_helpers() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(peak(&[0.1, -0.7, 0.3]), 0.7);
        assert_eq!(linear_to_db(0.0), -120.0);
        assert!((linear_to_db(1.0)).abs() < 1e-6);
    }
}

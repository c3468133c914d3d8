//! Recorded sample streams for offline tuning.
//!
//! # Format
//!
//! One sample per line, comma separated:
//!
//! ```text
//! # timestamp_ms,x,y,z
//! 0,9.8,9.8,9.8
//! 20,29.8,9.8,9.8
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Whitespace around
//! fields is ignored. Timestamps must not go backwards.

use std::path::Path;

use crate::error::ReplayError;
use crate::types::TimedSample;

/// Parse a recording from text.
pub fn parse_recording(content: &str) -> Result<Vec<TimedSample>, ReplayError> {
    let mut samples = Vec::new();
    let mut previous_ms: Option<u64> = None;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let sample = parse_line(trimmed, line)?;
        if let Some(previous_ms) = previous_ms {
            if sample.timestamp_ms < previous_ms {
                return Err(ReplayError::OutOfOrder {
                    line,
                    previous_ms,
                    timestamp_ms: sample.timestamp_ms,
                });
            }
        }
        previous_ms = Some(sample.timestamp_ms);
        samples.push(sample);
    }

    Ok(samples)
}

/// Read and parse a recording file.
pub fn load_recording(path: &Path) -> Result<Vec<TimedSample>, ReplayError> {
    let content = std::fs::read_to_string(path)?;
    parse_recording(&content)
}

fn parse_line(line_text: &str, line: usize) -> Result<TimedSample, ReplayError> {
    let fields: Vec<&str> = line_text.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(ReplayError::Malformed {
            line,
            reason: format!("expected 4 fields, found {}", fields.len()),
        });
    }

    let timestamp_ms = fields[0].parse::<u64>().map_err(|e| ReplayError::Malformed {
        line,
        reason: format!("bad timestamp '{}': {}", fields[0], e),
    })?;

    let mut accel = [0.0f32; 3];
    for (axis, (value, name)) in accel.iter_mut().zip(["x", "y", "z"]).enumerate() {
        let text = fields[axis + 1];
        *value = text.parse::<f32>().map_err(|e| ReplayError::Malformed {
            line,
            reason: format!("bad {} value '{}': {}", name, text, e),
        })?;
    }

    Ok(TimedSample::new(timestamp_ms, accel[0], accel[1], accel[2]))
}

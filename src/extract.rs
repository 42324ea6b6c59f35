//! Line-oriented extraction of speed samples and trip metadata.
//!
//! Travel-log exports interleave an HTML-ish metadata table, a destination
//! element, and free-form status lines carrying speed readings. Each line is
//! tested against the three patterns in fixed priority; the first match
//! consumes the line and nothing else is tried on it.

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

static SPEED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Speed: ([\d\.]+) mph").unwrap());
static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<tr><td><b>(.*?)</b>(.*?)</td></tr>").unwrap());
static DEST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^        <name>(.*)</name>").unwrap());

/// Everything extracted from a single travel-log file.
///
/// `samples` preserves file order, which is the chronological order of the
/// readings within the trip.
#[derive(Debug, Default)]
pub struct TripLog {
    pub destination: String,
    pub metadata: HashMap<String, String>,
    pub samples: Vec<f64>,
}

/// Scans a travel-log line stream and classifies each line.
///
/// The destination is latched by the first matching line only; once set,
/// destination-shaped lines fall through to the metadata and speed patterns
/// like any other line. Metadata rows overwrite earlier values for the same
/// key, with the value whitespace-trimmed. A speed token that matches the
/// pattern but fails to parse as a number is dropped with a warning. Lines
/// matching none of the patterns are ignored.
///
/// # Errors
///
/// Returns an error if reading from the underlying stream fails.
pub fn scan_log<R: BufRead>(reader: R) -> std::io::Result<TripLog> {
    let mut log = TripLog::default();

    for line in reader.lines() {
        let line = line?;

        if log.destination.is_empty() {
            if let Some(caps) = DEST_RE.captures(&line) {
                log.destination = caps[1].to_string();
                continue;
            }
        }

        if let Some(caps) = TABLE_RE.captures(&line) {
            log.metadata
                .insert(caps[1].to_string(), caps[2].trim().to_string());
            continue;
        }

        let Some(caps) = SPEED_RE.captures(&line) else {
            continue;
        };

        match caps[1].parse::<f64>() {
            Ok(speed) => log.samples.push(speed),
            Err(e) => warn!(token = &caps[1], error = %e, "ignoring unparseable speed token"),
        }
    }

    debug!(
        samples = log.samples.len(),
        metadata_keys = log.metadata.len(),
        destination = %log.destination,
        "log scan complete"
    );

    Ok(log)
}

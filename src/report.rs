//! Per-trip report records and the fixed-format text report.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::stats::TripStats;

/// One analyzed travel-log file, ready to print. Built once per input file
/// and owned by the driver until rendered.
#[derive(Debug)]
pub struct TripReport {
    pub path: PathBuf,
    pub destination: String,
    pub stats: TripStats,
    pub metadata: HashMap<String, String>,
}

impl TripReport {
    fn start_time(&self) -> &str {
        self.metadata_value("Start Time")
    }

    fn metadata_value(&self, key: &str) -> &str {
        self.metadata.get(key).map(String::as_str).unwrap_or("")
    }

    fn base_name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }
}

/// Orders reports by ascending lexicographic `Start Time` metadata value.
/// Files without the key sort first, as the empty string.
pub fn sort_by_start_time(reports: &mut [TripReport]) {
    reports.sort_by(|a, b| a.start_time().cmp(b.start_time()));
}

/// Writes the fixed report block for each trip, each followed by a blank
/// separator line. Speeds are formatted to two decimal places.
pub fn render<W: Write>(out: &mut W, reports: &[TripReport]) -> Result<()> {
    for r in reports {
        writeln!(out, "Start Time:            {}", r.start_time())?;
        writeln!(out, "Path:                  {}", r.base_name())?;
        writeln!(out, "Destination:           {}", r.destination)?;
        writeln!(out, "Distance:              {}", r.metadata_value("Distance"))?;
        writeln!(out, "Average Speed:         {:.2} mph", r.stats.average_speed)?;
        writeln!(out, "Travel Speed:          {:.2} mph", r.stats.travel_speed)?;
        writeln!(
            out,
            "Adjusted Travel Speed: {:.2} mph",
            r.stats.adjusted_travel_speed
        )?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(path: &str, start_time: Option<&str>) -> TripReport {
        let mut metadata = HashMap::new();
        if let Some(t) = start_time {
            metadata.insert("Start Time".to_string(), t.to_string());
        }
        TripReport {
            path: PathBuf::from(path),
            destination: String::new(),
            stats: TripStats {
                average_speed: 30.85,
                travel_speed: 39.428,
                adjusted_travel_speed: 43.1,
                max_speed: 55.0,
                mode_speed: 5.0,
            },
            metadata,
        }
    }

    #[test]
    fn test_sort_by_start_time_is_lexicographic() {
        let mut reports = vec![
            report("b.txt", Some("2024-05-02 09:30")),
            report("a.txt", Some("2024-05-01 08:00")),
            report("c.txt", Some("2024-04-30 23:59")),
        ];
        sort_by_start_time(&mut reports);

        let order: Vec<_> = reports.iter().map(|r| r.base_name()).collect();
        assert_eq!(order, vec!["c.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_missing_start_time_sorts_first() {
        let mut reports = vec![
            report("late.txt", Some("2024-05-01 08:00")),
            report("unknown.txt", None),
        ];
        sort_by_start_time(&mut reports);
        assert_eq!(reports[0].base_name(), "unknown.txt");
    }

    #[test]
    fn test_render_block_format() {
        let mut r = report("trips/2024/lakeview.txt", Some("2024-05-01 08:00"));
        r.destination = "Lakeview Trail".to_string();
        r.metadata
            .insert("Distance".to_string(), "24.6 mi".to_string());

        let mut out = Vec::new();
        render(&mut out, &[r]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            concat!(
                "Start Time:            2024-05-01 08:00\n",
                "Path:                  lakeview.txt\n",
                "Destination:           Lakeview Trail\n",
                "Distance:              24.6 mi\n",
                "Average Speed:         30.85 mph\n",
                "Travel Speed:          39.43 mph\n",
                "Adjusted Travel Speed: 43.10 mph\n",
                "\n",
            )
        );
    }

    #[test]
    fn test_render_empty_fields() {
        let r = report("trip.txt", None);
        let mut out = Vec::new();
        render(&mut out, &[r]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Start Time:            \n"));
        assert!(text.contains("Destination:           \n"));
        assert!(text.contains("Distance:              \n"));
    }
}

use std::fs;

use fastout_analyzer::{summarize, FileSummary};
use fastout_core::{testing::OutbBuilder, DataSet};
use tempfile::NamedTempFile;

// ===========================================================================
// Helpers
// ===========================================================================

fn write_outb(builder: &OutbBuilder) -> NamedTempFile {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(tmp.path(), builder.build()).unwrap();
    tmp
}

// ===========================================================================
// Сводка по файлу с диска
// ===========================================================================

#[test]
fn test_summary_from_disk_as_json() {
    let tmp = write_outb(
        &OutbBuilder::with_time(100.0, 0.0)
            .description("Test18")
            .channel("Azimuth", "(deg)", 10.0, 0.0)
            .row(Some(0), &[0])
            .row(Some(5), &[900])
            .row(Some(10), &[1800]),
    );

    let ds = DataSet::load(tmp.path()).unwrap();
    let summary: FileSummary = summarize(&ds, &["Azimuth".to_string()]).unwrap();

    let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["format_id"], 1);
    assert_eq!(json["step_count"], 3);
    assert_eq!(json["description"], "Test18");
    assert_eq!(json["channels"][0]["name"], "Azimuth");
    assert_eq!(json["channels"][0]["unit"], "(deg)");
    assert_eq!(json["channels"][0]["max"], 180.0);
    assert_eq!(json["time_end"], 0.1);
}

#[test]
fn test_summary_without_steps() {
    let tmp = write_outb(&OutbBuilder::without_time(0.0, 0.1).channel("GenPwr", "(kW)", 1.0, 0.0));

    let ds = DataSet::load(tmp.path()).unwrap();
    let summary = summarize(&ds, &[]).unwrap();

    assert_eq!(summary.step_count, 0);
    assert_eq!(summary.time_start, None);
    assert!(summary.channels.iter().all(|c| c.mean.is_none()));

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["channels"][1]["mean"].is_null());
}

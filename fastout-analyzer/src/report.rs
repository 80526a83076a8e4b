use std::fmt;

use anyhow::{bail, Result};
use fastout_core::{ChannelArray, DataSet};
use serde::Serialize;

/// Статистика одного канала.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub name: String,
    pub unit: String,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Сводка по файлу: заголовок, описание и выбранные каналы.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub format: String,
    pub format_id: i16,
    pub channel_count: usize,
    pub step_count: usize,
    pub time_start: Option<f64>,
    pub time_end: Option<f64>,
    pub description: String,
    pub channels: Vec<ChannelSummary>,
}

impl ChannelSummary {
    pub fn from_array(array: &ChannelArray) -> Self {
        Self {
            name: array.name().to_string(),
            unit: array.unit().to_string(),
            mean: array.mean(),
            std: array.std(),
            min: array.min(),
            max: array.max(),
        }
    }
}

/// Собирает сводку. Пустой `filter` означает все каналы, включая время.
///
/// Неизвестное имя канала в `filter` является ошибкой.
pub fn summarize(
    ds: &DataSet,
    filter: &[String],
) -> Result<FileSummary> {
    let channels = if filter.is_empty() {
        ds.iter().map(ChannelSummary::from_array).collect()
    } else {
        let mut out = Vec::with_capacity(filter.len());
        for name in filter {
            match ds.get(name) {
                Some(array) => out.push(ChannelSummary::from_array(array)),
                None => bail!("unknown channel '{name}'; available: {}", ds.names().join(", ")),
            }
        }
        out
    };

    let time = ds.time();

    Ok(FileSummary {
        format: ds.format().to_string(),
        format_id: ds.format().as_i16(),
        channel_count: ds.len().saturating_sub(1),
        step_count: time.map_or(0, ChannelArray::len),
        time_start: time.and_then(|t| t.values().get(0).copied()),
        time_end: time.and_then(|t| {
            t.len()
                .checked_sub(1)
                .and_then(|i| t.values().get(i).copied())
        }),
        description: ds.description().to_string(),
        channels,
    })
}

fn opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

impl fmt::Display for FileSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  Format        : {} ({})", self.format, self.format_id)?;
        writeln!(f, "  Channels      : {}", self.channel_count)?;
        writeln!(f, "  Steps         : {}", self.step_count)?;
        if let (Some(t0), Some(t1)) = (self.time_start, self.time_end) {
            writeln!(f, "  Time span     : {t0:.4} .. {t1:.4} s")?;
        }
        writeln!(f, "  Description   : {}", self.description)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "{:<12} {:<10} {:>14} {:>14} {:>14} {:>14}",
            "Channel", "Unit", "Mean", "Std", "Min", "Max"
        )?;
        for c in &self.channels {
            writeln!(
                f,
                "{:<12} {:<10} {:>14} {:>14} {:>14} {:>14}",
                c.name,
                c.unit,
                opt(c.mean),
                opt(c.std),
                opt(c.min),
                opt(c.max)
            )?;
        }
        Ok(())
    }
}

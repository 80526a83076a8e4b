use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fastout_analyzer::summarize;
use fastout_core::DataSet;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fastout-analyzer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Summarize channels of a FAST/OpenFAST binary output (.outb) file",
    long_about = None,
)]
struct Cli {
    /// Путь к .outb файлу
    file: PathBuf,
    /// Каналы для сводки (по умолчанию все)
    #[arg(short, long = "channel")]
    channels: Vec<String>,
    /// Вывод в JSON
    #[arg(long)]
    json: bool,
    /// Тихий режим (только ошибки)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let ds = DataSet::load(&cli.file).with_context(|| format!("failed to decode {:?}", cli.file))?;
    let summary = summarize(&ds, &cli.channels)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{summary}");
    }

    Ok(())
}

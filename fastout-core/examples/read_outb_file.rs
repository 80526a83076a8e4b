//! Пример: чтение .outb файла и работа с именованными каналами
//!
//! Демонстрирует:
//! - декодирование файла через read_outb_file
//! - доступ к каналам по имени через DataSet
//! - явную подпись канала и её сброс

use std::env;

use fastout_core::{read_outb_file, DataSet};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Test18.outb".to_string());

    // --- Декодирование ---
    let file = match read_outb_file(&input_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("✗ Decode failed: {e}");
            return Err(Box::new(e));
        }
    };

    println!("✓ Decoded {input_path}");
    println!("  Format        : {}", file.header.format);
    println!("  Channels      : {}", file.channel_count());
    println!("  Steps         : {}", file.step_count());
    println!("  Description   : {}", file.description);

    for issue in &file.encoding_issues {
        println!("  ⚠ {issue}");
    }

    // --- Именованные каналы ---
    let mut ds = DataSet::from_outb(file);
    println!("\nChannels: {:?}", ds.names());

    if let Some(y) = ds.get_mut("Azimuth") {
        println!("  {} mean={:?} std={:?}", y.label(), y.mean(), y.std());
        println!("  min={:?} max={:?}", y.min(), y.max());

        y.set_label("Azimuth with unit (deg)");
        println!("  User defined label: {}", y.label());

        y.clear_label();
        println!("  Reset label: {}", y.label());
    }

    Ok(())
}

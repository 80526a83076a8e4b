//! Библиотека чтения бинарного вывода FAST/OpenFAST
//!
//! Декодирует `.outb` файлы: заголовок, кодирование времени, таблицы
//! масштабирования, описание, имена и единицы каналов, затем упакованные
//! данные, которые де-скейлятся в плотную матрицу `f64`.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use fastout_core::{read_outb_file, DataSet};
//!
//! let file = read_outb_file("Test18.outb")?;
//! println!("{} x {}", file.step_count(), file.channel_count() + 1);
//!
//! let ds = DataSet::from_outb(file);
//! let azimuth = ds.get("Azimuth").expect("channel");
//! println!("{}: mean={:?}", azimuth.label(), azimuth.mean());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod channel;
pub mod dataset;
pub mod decoder;
pub mod format;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use binary::*;
pub use channel::*;
pub use dataset::*;
pub use decoder::*;
pub use fastout_types::*;
pub use format::{EncodingIssue, TextField};

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(NAME_LEN, 10);
        assert_eq!(UNIT_LEN, 10);
        assert_eq!(format::HEADER_SIZE, 10);
        assert_eq!(format::TIME_PARAMS_SIZE, 16);
        assert_eq!(FileFormat::WithTime.as_i16(), 1);
    }
}

//! Подстановка параметров в шаблоны входных файлов FAST
//!
//! Шаблон содержит ссылки `${key}` / `$key`, значения задаются через
//! [`TemplateFormatter::set`] и форматируются по [`FormatTable`]
//! (по умолчанию: выравнивание вправо, ширина 11).

pub mod error;
pub mod format;
pub mod formatter;
pub mod template;
pub mod value;

pub use error::*;
pub use format::*;
pub use formatter::*;
pub use template::*;
pub use value::*;

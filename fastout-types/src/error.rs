use thiserror::Error;

/// Результат для операций чтения .outb
pub type OutbResult<T> = std::result::Result<T, OutbError>;

/// Типы ошибок формата FAST binary output.
#[derive(Debug, Error)]
pub enum OutbError {
    /// В потоке меньше байт, чем объявляет поле
    #[error(
        "Truncated input while reading {field} at offset {offset}: expected {expected} bytes, found {found}"
    )]
    TruncatedInput {
        field: &'static str,
        offset: u64,
        expected: usize,
        found: usize,
    },

    /// Неизвестный идентификатор формата файла
    #[error("Unsupported file format id {0}: expected 1 (WithTime) or 2 (WithoutTime)")]
    UnsupportedFormat(i16),

    /// Нулевой коэффициент масштабирования (столбец 0: время)
    #[error("Malformed scaling for column {column}: scale = {scale}")]
    MalformedScaling { column: usize, scale: f64 },

    /// Некорректные размеры в заголовке
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OutbError {
    /// Удобные конструкторы
    pub fn invalid_header<S: Into<String>>(s: S) -> Self {
        Self::InvalidHeader(s.into())
    }

    /// `true` для ошибок, вызванных обрывом файла.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}

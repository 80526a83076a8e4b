use thiserror::Error;

pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

#[derive(Debug, Error)]
pub enum TemplateError {
    /// `$`, за которым не следует `$`, `{key}` или идентификатор
    #[error("Invalid placeholder in template: line {line}, column {column}")]
    InvalidPlaceholder { line: usize, column: usize },

    /// Ключ есть в шаблоне, но значение не задано
    #[error("Key '{0}' found in template but no value was set")]
    MissingKey(String),

    /// Некорректная строка формата поля
    #[error("Invalid field format: {0}")]
    InvalidFormat(String),

    /// Ошибка разбора таблицы форматов
    #[error("Format table error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TemplateError {
    pub fn invalid_format<S: Into<String>>(s: S) -> Self {
        Self::InvalidFormat(s.into())
    }
}

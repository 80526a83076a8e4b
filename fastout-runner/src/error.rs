use thiserror::Error;

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;

#[derive(Debug, Error)]
pub enum RunnerError {
    /// Некорректная конфигурация запуска
    #[error("Invalid runner config: {0}")]
    InvalidConfig(String),

    /// Ошибки ввода/вывода
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка пайплайна (inter-thread)
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl RunnerError {
    pub fn invalid_config<S: Into<String>>(s: S) -> Self {
        Self::InvalidConfig(s.into())
    }
}

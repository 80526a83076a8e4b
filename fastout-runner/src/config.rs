use std::path::PathBuf;

use crate::{RunnerError, RunnerResult};

/// Исполняемый файл по умолчанию.
pub const DEFAULT_BINARY: &str = "openfast";

/// Конфигурация пакетного запуска.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Исполняемый файл, которому передаётся входной файл
    pub binary: String,
    /// Входные файлы (.fst), по одному запуску на файл
    pub input_files: Vec<PathBuf>,
    /// Количество параллельных запусков
    pub workers: usize,
    /// Пересылать stdout успешных запусков в выходной поток
    pub forward_stdout: bool,
}

impl RunnerConfig {
    pub fn new<I, P>(input_files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            input_files: input_files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> RunnerResult<()> {
        if self.workers == 0 {
            return Err(RunnerError::invalid_config("workers must be >= 1"));
        }
        if self.binary.trim().is_empty() {
            return Err(RunnerError::invalid_config("binary name is empty"));
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            input_files: Vec::new(),
            workers: 2,
            forward_stdout: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = RunnerConfig::default();
        assert_eq!(cfg.binary, "openfast");
        assert_eq!(cfg.workers, 2);
        assert!(cfg.forward_stdout);
        assert!(cfg.input_files.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_new_collects_paths() {
        let cfg = RunnerConfig::new(["a.fst", "b.fst"]);
        assert_eq!(
            cfg.input_files,
            vec![PathBuf::from("a.fst"), PathBuf::from("b.fst")]
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = RunnerConfig::default();
        cfg.workers = 0;
        assert!(matches!(cfg.validate(), Err(RunnerError::InvalidConfig(_))));

        let mut cfg = RunnerConfig::default();
        cfg.binary = "  ".into();
        assert!(matches!(cfg.validate(), Err(RunnerError::InvalidConfig(_))));
    }
}

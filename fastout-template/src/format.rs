use std::{collections::BTreeMap, fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{TemplateError, TemplateResult};

/// Выравнивание значения внутри поля.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// Формат поля: выравнивание и минимальная ширина в символах.
///
/// Строковая запись: `">11"`, `"<8"`, `"^5"`, `"11"` (без знака
/// выравнивания значение прижимается влево). Допускается и обёртка
/// `"{0:>11}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldFormat {
    pub align: Align,
    pub width: usize,
}

/// Ширина поля по умолчанию.
pub const DEFAULT_WIDTH: usize = 11;

impl FieldFormat {
    pub const fn new(
        align: Align,
        width: usize,
    ) -> Self {
        Self { align, width }
    }

    /// Дополняет значение пробелами до ширины поля. Длинные значения не
    /// обрезаются.
    pub fn apply(
        &self,
        value: &str,
    ) -> String {
        let width = self.width;
        match self.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
            Align::Center => format!("{value:^width$}"),
        }
    }
}

impl Default for FieldFormat {
    fn default() -> Self {
        Self::new(Align::Right, DEFAULT_WIDTH)
    }
}

impl FromStr for FieldFormat {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("{0:")
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(trimmed);

        let (align, digits) = match body.chars().next() {
            Some('<') => (Align::Left, &body[1..]),
            Some('>') => (Align::Right, &body[1..]),
            Some('^') => (Align::Center, &body[1..]),
            _ => (Align::Left, body),
        };

        let width = if digits.is_empty() {
            0
        } else {
            digits
                .parse::<usize>()
                .map_err(|_| TemplateError::invalid_format(format!("'{s}'")))?
        };

        Ok(Self { align, width })
    }
}

impl TryFrom<String> for FieldFormat {
    type Error = TemplateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FieldFormat> for String {
    fn from(f: FieldFormat) -> Self {
        f.to_string()
    }
}

impl fmt::Display for FieldFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let align = match self.align {
            Align::Left => '<',
            Align::Right => '>',
            Align::Center => '^',
        };
        write!(f, "{align}{}", self.width)
    }
}

/// Таблица форматов по ключу шаблона.
///
/// В JSON это объект `{"key": ">11", ...}`. Для ключей без записи
/// используется [`FieldFormat::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatTable {
    formats: BTreeMap<String, FieldFormat>,
}

impl FormatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>>(
        &mut self,
        key: K,
        format: FieldFormat,
    ) -> Option<FieldFormat> {
        self.formats.insert(key.into(), format)
    }

    pub fn get(
        &self,
        key: &str,
    ) -> FieldFormat {
        self.formats.get(key).copied().unwrap_or_default()
    }

    pub fn contains(
        &self,
        key: &str,
    ) -> bool {
        self.formats.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn from_json_str(json: &str) -> TemplateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Читает таблицу форматов из JSON файла.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> TemplateResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

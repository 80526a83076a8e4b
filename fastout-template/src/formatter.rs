use std::{collections::BTreeMap, fs, path::Path};

use log::{debug, error};

use crate::{FormatTable, Template, TemplateError, TemplateResult, TemplateValue};

/// Шаблон вместе со значениями и таблицей форматов.
///
/// ```
/// use fastout_template::{FormatTable, TemplateFormatter};
///
/// let mut ft = TemplateFormatter::new("a = ${a}\nb = ${b}", FormatTable::new()).unwrap();
/// ft.set("a", 9).set("b", "hello");
/// assert_eq!(ft.substitute().unwrap(), "a =           9\nb =       hello");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    template: Template,
    formats: FormatTable,
    values: BTreeMap<String, TemplateValue>,
}

impl TemplateFormatter {
    pub fn new(
        template: &str,
        formats: FormatTable,
    ) -> TemplateResult<Self> {
        Ok(Self {
            template: Template::parse(template)?,
            formats,
            values: BTreeMap::new(),
        })
    }

    /// Загружает шаблон из текстового файла.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        formats: FormatTable,
    ) -> TemplateResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!("Loaded template {path:?} ({} bytes)", text.len());

        Self::new(&text, formats)
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn formats(&self) -> &FormatTable {
        &self.formats
    }

    pub fn formats_mut(&mut self) -> &mut FormatTable {
        &mut self.formats
    }

    /// Задаёт значение ключа. Повторный вызов перезаписывает значение.
    pub fn set<K: Into<String>, V: Into<TemplateValue>>(
        &mut self,
        key: K,
        value: V,
    ) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&TemplateValue> {
        self.values.get(key)
    }

    pub fn remove(
        &mut self,
        key: &str,
    ) -> Option<TemplateValue> {
        self.values.remove(key)
    }

    /// Значение ключа после форматирования, без подстановки в шаблон.
    pub fn format_value(
        &self,
        key: &str,
    ) -> Option<String> {
        self.values
            .get(key)
            .map(|v| self.formats.get(key).apply(&v.to_string()))
    }

    /// Подставляет все значения в шаблон.
    ///
    /// Лишние значения игнорируются; ключ шаблона без значения даёт
    /// [`TemplateError::MissingKey`].
    pub fn substitute(&self) -> TemplateResult<String> {
        self.template
            .render(|key| self.format_value(key))
            .inspect_err(|e| {
                if let TemplateError::MissingKey(key) = e {
                    error!("Key '{key}' found in template but not set on the formatter");
                }
            })
    }

    /// Записывает результат подстановки в файл.
    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> TemplateResult<()> {
        let path = path.as_ref();
        let text = self.substitute()?;
        fs::write(path, &text)?;
        debug!("Wrote {path:?} ({} bytes)", text.len());

        Ok(())
    }
}

use std::borrow::Cow;

use ndarray::Array1;

/// Символы, которые удаляются из имени канала при построении идентификатора.
pub const STRIPPED_NAME_CHARS: [char; 4] = ['-', '+', '*', '/'];

/// Убирает `- + * /` из имени канала.
///
/// Идемпотентна: повторное применение ничего не меняет.
///
/// # Примеры
/// ```
/// use fastout_core::channel::sanitize_name;
/// assert_eq!(sanitize_name("-ReactFXss"), "ReactFXss");
/// assert_eq!(sanitize_name("ReactFXss"), "ReactFXss");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !STRIPPED_NAME_CHARS.contains(c))
        .collect()
}

/// Метаданные канала.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMeta {
    pub name: String,
    pub unit: String,
    /// Явная подпись; `None`: подпись выводится из имени и единиц
    pub label: Option<String>,
}

/// Столбец декодированной матрицы вместе с именем и единицами.
///
/// Владеет своим буфером; численные операции делегируются `ndarray`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelArray {
    values: Array1<f64>,
    meta: ChannelMeta,
}

impl ChannelArray {
    pub fn new<N: Into<String>, U: Into<String>>(
        values: Array1<f64>,
        name: N,
        unit: U,
    ) -> Self {
        Self {
            values,
            meta: ChannelMeta {
                name: name.into(),
                unit: unit.into(),
                label: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn unit(&self) -> &str {
        &self.meta.unit
    }

    /// Имя без символов `- + * /`, пригодное как ключ доступа.
    pub fn identifier(&self) -> String {
        sanitize_name(&self.meta.name)
    }

    pub fn meta(&self) -> &ChannelMeta {
        &self.meta
    }

    /// Подпись для осей и таблиц.
    ///
    /// Если подпись задана через [`ChannelArray::set_label`], она
    /// возвращается как есть (даже пустая строка), иначе `"{name} {unit}"`.
    pub fn label(&self) -> Cow<'_, str> {
        match &self.meta.label {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(format!("{} {}", self.meta.name, self.meta.unit)),
        }
    }

    pub fn set_label<S: Into<String>>(
        &mut self,
        label: S,
    ) {
        self.meta.label = Some(label.into());
    }

    /// Сбрасывает явную подпись, возвращая выводимую.
    pub fn clear_label(&mut self) {
        self.meta.label = None;
    }

    pub fn has_custom_label(&self) -> bool {
        self.meta.label.is_some()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn into_values(self) -> Array1<f64> {
        self.values
    }

    /// Значения как срез; `None`, если массив не непрерывен в памяти.
    pub fn as_slice(&self) -> Option<&[f64]> {
        self.values.as_slice()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        self.values.mean()
    }

    /// Стандартное отклонение генеральной совокупности (ddof = 0).
    pub fn std(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.std(0.0))
    }

    /// Минимум; значения NaN пропускаются.
    pub fn min(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)
    }

    /// Максимум; значения NaN пропускаются.
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }

    /// Новый канал из поэлементного преобразования.
    ///
    /// Имя и единицы переносятся, явная подпись не переносится, она описывала
    /// исходные данные.
    pub fn map<F: Fn(f64) -> f64>(
        &self,
        f: F,
    ) -> ChannelArray {
        ChannelArray::new(self.values.mapv(f), self.meta.name.clone(), self.meta.unit.clone())
    }
}

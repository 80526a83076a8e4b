use std::fmt;

/// Значение, подставляемое в шаблон.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// Порог, выше которого float выводится в научной нотации `{:.5E}`.
pub const SCIENTIFIC_THRESHOLD: f64 = 1e6;

impl fmt::Display for TemplateValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            TemplateValue::Int(v) => write!(f, "{v}"),
            TemplateValue::Float(v) => f.write_str(&format_float(*v)),
            TemplateValue::Bool(true) => f.write_str("True"),
            TemplateValue::Bool(false) => f.write_str("False"),
            TemplateValue::Text(s) => f.write_str(s),
        }
    }
}

/// Форматирует float так, как его ожидают входные файлы FAST.
///
/// Больше `1e6`: `{:.5E}` с двухзначной экспонентой со знаком
/// (`2.50000E+06`). Остальное: кратчайшая точная запись, целые значения
/// с `.0`, экспонента для `|v| < 1e-4` и `|v| >= 1e16` (`1e-05`, `1e+16`).
///
/// # Примеры
/// ```
/// use fastout_template::format_float;
/// assert_eq!(format_float(2.5e6), "2.50000E+06");
/// assert_eq!(format_float(100.0), "100.0");
/// assert_eq!(format_float(1e-5), "1e-05");
/// ```
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v > SCIENTIFIC_THRESHOLD {
        return with_signed_exponent(&format!("{v:.5E}"), 'E');
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{v:e}");
    let exponent = sci
        .rsplit_once('e')
        .and_then(|(_, e)| e.parse::<i32>().ok())
        .unwrap_or(0);

    if !(-4..16).contains(&exponent) {
        return with_signed_exponent(&sci, 'e');
    }

    let plain = v.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// `1.5e-5` -> `1.5e-05`, `2.50000E6` -> `2.50000E+06`.
fn with_signed_exponent(
    formatted: &str,
    marker: char,
) -> String {
    match formatted.rsplit_once(marker) {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(e) => {
                let sign = if e < 0 { '-' } else { '+' };
                format!("{mantissa}{marker}{sign}{:02}", e.unsigned_abs())
            }
            Err(_) => formatted.to_string(),
        },
        None => formatted.to_string(),
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for TemplateValue {
                fn from(v: $t) -> Self {
                    TemplateValue::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for TemplateValue {
    fn from(v: f64) -> Self {
        TemplateValue::Float(v)
    }
}

impl From<bool> for TemplateValue {
    fn from(v: bool) -> Self {
        TemplateValue::Bool(v)
    }
}

impl From<&str> for TemplateValue {
    fn from(v: &str) -> Self {
        TemplateValue::Text(v.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(v: String) -> Self {
        TemplateValue::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_above_threshold_is_scientific() {
        assert_eq!(format_float(2.5e6), "2.50000E+06");
        assert_eq!(format_float(1_000_000.5), "1.00000E+06");
        assert_eq!(format_float(1.23456789e21), "1.23457E+21");
        assert_eq!(format_float(3.0e100), "3.00000E+100");
    }

    #[test]
    fn test_float_at_or_below_threshold() {
        assert_eq!(format_float(1e6), "1000000.0");
        assert_eq!(format_float(0.01), "0.01");
        assert_eq!(format_float(-12.5), "-12.5");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1.5e-5), "1.5e-05");
        // большие отрицательные порог не проходят
        assert_eq!(format_float(-1e20), "-1e+20");
        assert_eq!(format_float(-2e6), "-2000000.0");
    }

    #[test]
    fn test_display_variants() {
        assert_eq!(TemplateValue::from(9).to_string(), "9");
        assert_eq!(TemplateValue::from(-3i64).to_string(), "-3");
        assert_eq!(TemplateValue::from(true).to_string(), "True");
        assert_eq!(TemplateValue::from(false).to_string(), "False");
        assert_eq!(TemplateValue::from("hello").to_string(), "hello");
        assert_eq!(TemplateValue::from(60.0).to_string(), "60.0");
    }
}

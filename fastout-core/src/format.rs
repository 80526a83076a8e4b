//! Формат бинарного вывода FAST (.outb)
//!
//! Все многобайтовые числа хранятся в порядке little-endian. Поля идут строго
//! друг за другом, без выравнивания и без контрольных сумм:
//!
//! ```text
//! format_id       i16                        1 = WithTime, 2 = WithoutTime
//! channel_count   i32                        без столбца времени
//! step_count      i32
//! time params     f64 x 2                    (scale, offset) | (start, increment)
//! channel scale   f32 x channel_count
//! channel offset  f32 x channel_count
//! desc length     i32
//! description     u8  x desc length          однобайтовые символы
//! channel names   u8  x (channel_count+1)*10 дополнены пробелами
//! channel units   u8  x (channel_count+1)*10 дополнены пробелами
//! packed time     i32 x step_count           только WithTime
//! packed samples  i16 x step_count*channel_count  шаг снаружи, канал внутри
//! ```

pub use fastout_types::{NAME_LEN, UNIT_LEN};

/// Размер заголовка: format_id + channel_count + step_count.
pub const HEADER_SIZE: usize = 2 + 4 + 4;

/// Размер параметров времени (две f64).
pub const TIME_PARAMS_SIZE: usize = 16;

/// Текстовое поле, в котором встретился непечатаемый байт.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Description,
    /// Индекс столбца (0: время)
    ChannelName(usize),
    /// Индекс столбца (0: время)
    ChannelUnit(usize),
}

/// Некритичная проблема кодировки: символы сохранены как есть.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingIssue {
    pub field: TextField,
    /// Позиция первого непечатаемого байта внутри поля
    pub position: usize,
    pub byte: u8,
}

impl std::fmt::Display for TextField {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            TextField::Description => write!(f, "description"),
            TextField::ChannelName(i) => write!(f, "channel name #{i}"),
            TextField::ChannelUnit(i) => write!(f, "channel unit #{i}"),
        }
    }
}

impl std::fmt::Display for EncodingIssue {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}: byte 0x{:02x} at position {} is not printable ASCII",
            self.field, self.byte, self.position
        )
    }
}

/// Байт в диапазоне печатаемого ASCII (0x20..=0x7E).
#[inline]
pub fn is_printable_ascii(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

/// Декодирует байты по одному символу на байт (Latin-1).
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Декодирует поле фиксированной ширины и обрезает пробелы с обеих сторон.
pub fn decode_fixed_field(bytes: &[u8]) -> String {
    decode_latin1(bytes).trim().to_string()
}

/// Проверяет поле и возвращает описание первого непечатаемого байта.
pub fn check_text(
    field: TextField,
    bytes: &[u8],
) -> Option<EncodingIssue> {
    bytes
        .iter()
        .position(|&b| !is_printable_ascii(b))
        .map(|position| EncodingIssue {
            field,
            position,
            byte: bytes[position],
        })
}

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use fastout_types::{ElementType, Field, OutbError, OutbResult, Value, Values};

/// Верхняя граница предварительного резервирования буфера.
///
/// Счётчики в заголовке не доверенные: буфер растёт по мере чтения, а не по
/// объявленному размеру.
const MAX_PREALLOC: usize = 1 << 20;

/// Тип фиксированной ширины, который умеет читать [`PrimitiveReader`].
pub trait Primitive: Copy + Default {
    const TYPE: ElementType;

    /// Декодирует `dst.len()` элементов little-endian из `src`.
    fn decode_into(
        src: &[u8],
        dst: &mut [Self],
    );
}

impl Primitive for u8 {
    const TYPE: ElementType = ElementType::U8;

    fn decode_into(
        src: &[u8],
        dst: &mut [Self],
    ) {
        dst.copy_from_slice(src);
    }
}

impl Primitive for i16 {
    const TYPE: ElementType = ElementType::I16;

    fn decode_into(
        src: &[u8],
        dst: &mut [Self],
    ) {
        LittleEndian::read_i16_into(src, dst);
    }
}

impl Primitive for i32 {
    const TYPE: ElementType = ElementType::I32;

    fn decode_into(
        src: &[u8],
        dst: &mut [Self],
    ) {
        LittleEndian::read_i32_into(src, dst);
    }
}

impl Primitive for f32 {
    const TYPE: ElementType = ElementType::F32;

    fn decode_into(
        src: &[u8],
        dst: &mut [Self],
    ) {
        LittleEndian::read_f32_into(src, dst);
    }
}

impl Primitive for f64 {
    const TYPE: ElementType = ElementType::F64;

    fn decode_into(
        src: &[u8],
        dst: &mut [Self],
    ) {
        LittleEndian::read_f64_into(src, dst);
    }
}

/// Последовательный читатель типизированных полей фиксированной ширины.
///
/// Курсор только растёт, возврата назад нет. Каждое чтение подписано именем
/// поля, чтобы ошибка обрыва указывала, какая часть файла отсутствует.
pub struct PrimitiveReader<R: Read> {
    inner: R,
    position: u64,
}

impl<R: Read> PrimitiveReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Абсолютное смещение курсора в байтах.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Читает ровно `count` байт или возвращает [`OutbError::TruncatedInput`].
    pub fn read_bytes(
        &mut self,
        count: usize,
        field: &'static str,
    ) -> OutbResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(count.min(MAX_PREALLOC));
        let found = (&mut self.inner).take(count as u64).read_to_end(&mut buf)?;

        if found < count {
            return Err(OutbError::TruncatedInput {
                field,
                offset: self.position,
                expected: count,
                found,
            });
        }

        self.position += count as u64;
        Ok(buf)
    }

    /// Читает `count` элементов типа `T` в порядке файла.
    pub fn read_vec<T: Primitive>(
        &mut self,
        count: usize,
        field: &'static str,
    ) -> OutbResult<Vec<T>> {
        let n_bytes = count.checked_mul(T::TYPE.size()).ok_or_else(|| {
            OutbError::invalid_header(format!("{field}: {count} elements overflow usize"))
        })?;

        let raw = self.read_bytes(n_bytes, field)?;
        let mut out = vec![T::default(); count];
        T::decode_into(&raw, &mut out);

        Ok(out)
    }

    /// Читает один элемент типа `T`.
    pub fn read_scalar<T: Primitive>(
        &mut self,
        field: &'static str,
    ) -> OutbResult<T> {
        let raw = self.read_bytes(T::TYPE.size(), field)?;
        let mut out = [T::default()];
        T::decode_into(&raw, &mut out);

        Ok(out[0])
    }

    /// Динамическое чтение: `count` элементов типа `element_type`.
    ///
    /// При `count == 1` возвращает [`Field::Scalar`], иначе
    /// [`Field::Sequence`] (в том числе пустую при `count == 0`).
    pub fn read(
        &mut self,
        count: usize,
        element_type: ElementType,
    ) -> OutbResult<Field> {
        const FIELD: &str = "value";

        let values = match element_type {
            ElementType::I16 => Values::I16(self.read_vec(count, FIELD)?),
            ElementType::I32 => Values::I32(self.read_vec(count, FIELD)?),
            ElementType::U8 => Values::U8(self.read_vec(count, FIELD)?),
            ElementType::F32 => Values::F32(self.read_vec(count, FIELD)?),
            ElementType::F64 => Values::F64(self.read_vec(count, FIELD)?),
        };

        if count != 1 {
            return Ok(Field::Sequence(values));
        }

        let scalar = match values {
            Values::I16(v) => Value::I16(v[0]),
            Values::I32(v) => Value::I32(v[0]),
            Values::U8(v) => Value::U8(v[0]),
            Values::F32(v) => Value::F32(v[0]),
            Values::F64(v) => Value::F64(v[0]),
        };

        Ok(Field::Scalar(scalar))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn bytes() -> Vec<u8> {
        let mut raw = Vec::new();
        raw.extend_from_slice(&2i16.to_le_bytes());
        raw.extend_from_slice(&(-7i32).to_le_bytes());
        raw.extend_from_slice(&1.5f32.to_le_bytes());
        raw.extend_from_slice(&(-0.25f32).to_le_bytes());
        raw.extend_from_slice(&0.1f64.to_le_bytes());
        raw.extend_from_slice(b"Time");
        raw
    }

    #[test]
    fn test_typed_reads_advance_cursor() {
        let mut r = PrimitiveReader::new(Cursor::new(bytes()));

        assert_eq!(r.read_scalar::<i16>("format id").unwrap(), 2);
        assert_eq!(r.position(), 2);
        assert_eq!(r.read_scalar::<i32>("count").unwrap(), -7);
        assert_eq!(r.read_vec::<f32>(2, "scale").unwrap(), vec![1.5, -0.25]);
        assert_eq!(r.read_scalar::<f64>("time").unwrap(), 0.1);
        assert_eq!(r.read_vec::<u8>(4, "name").unwrap(), b"Time".to_vec());
        assert_eq!(r.position(), 26);
    }

    #[test]
    fn test_dynamic_read_scalar_vs_sequence() {
        let mut r = PrimitiveReader::new(Cursor::new(bytes()));

        assert_eq!(
            r.read(1, ElementType::I16).unwrap(),
            Field::Scalar(Value::I16(2))
        );
        assert_eq!(
            r.read(1, ElementType::I32).unwrap(),
            Field::Scalar(Value::I32(-7))
        );
        assert_eq!(
            r.read(2, ElementType::F32).unwrap(),
            Field::Sequence(Values::F32(vec![1.5, -0.25]))
        );
        assert_eq!(
            r.read(0, ElementType::F64).unwrap(),
            Field::Sequence(Values::F64(Vec::new()))
        );
        assert_eq!(r.position(), 14);
    }

    #[test]
    fn test_truncated_read_reports_counts() {
        let mut r = PrimitiveReader::new(Cursor::new(vec![1u8, 0, 0]));
        let _ = r.read_scalar::<i16>("format id").unwrap();

        match r.read_scalar::<i32>("channel count") {
            Err(OutbError::TruncatedInput {
                field,
                offset,
                expected,
                found,
            }) => {
                assert_eq!(field, "channel count");
                assert_eq!(offset, 2);
                assert_eq!(expected, 4);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_huge_count_is_truncation_not_allocation() {
        let mut r = PrimitiveReader::new(Cursor::new(vec![0u8; 8]));
        let err = r.read_vec::<i16>(1usize << 40, "packed samples").unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_overflowing_count_is_invalid_header() {
        let mut r = PrimitiveReader::new(Cursor::new(Vec::new()));
        let err = r.read_vec::<f64>(usize::MAX, "time").unwrap_err();
        assert!(matches!(err, OutbError::InvalidHeader(_)));
    }
}

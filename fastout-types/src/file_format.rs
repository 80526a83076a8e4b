use crate::{OutbError, OutbResult};

/// Идентификатор формата .outb файла (первое поле, int16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum FileFormat {
    /// Время хранится в файле упакованным int32 (шаг может быть переменным)
    WithTime = 1,
    /// Время вычисляется из начального значения и постоянного шага
    WithoutTime = 2,
}

impl FileFormat {
    pub fn from_i16(v: i16) -> OutbResult<Self> {
        match v {
            1 => Ok(FileFormat::WithTime),
            2 => Ok(FileFormat::WithoutTime),
            _ => Err(OutbError::UnsupportedFormat(v)),
        }
    }

    pub fn as_i16(&self) -> i16 {
        *self as i16
    }

    /// Есть ли в файле блок упакованного времени.
    pub fn has_packed_time(&self) -> bool {
        matches!(self, FileFormat::WithTime)
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FileFormat::WithTime => write!(f, "WithTime"),
            FileFormat::WithoutTime => write!(f, "WithoutTime"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_i16() {
        assert_eq!(FileFormat::from_i16(1).unwrap(), FileFormat::WithTime);
        assert_eq!(FileFormat::from_i16(2).unwrap(), FileFormat::WithoutTime);
        assert!(matches!(
            FileFormat::from_i16(3),
            Err(OutbError::UnsupportedFormat(3))
        ));
        assert!(FileFormat::from_i16(0).is_err());
        assert!(FileFormat::from_i16(-1).is_err());
    }

    #[test]
    fn test_as_i16_and_packed_time() {
        assert_eq!(FileFormat::WithTime.as_i16(), 1);
        assert_eq!(FileFormat::WithoutTime.as_i16(), 2);
        assert!(FileFormat::WithTime.has_packed_time());
        assert!(!FileFormat::WithoutTime.has_packed_time());
    }
}

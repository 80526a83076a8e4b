use crate::{FileFormat, OutbError, OutbResult};

/// Длина поля имени канала (символов)
pub const NAME_LEN: usize = 10;

/// Длина поля единиц измерения канала (символов)
pub const UNIT_LEN: usize = 10;

/// Заголовок .outb файла (первые 10 байт)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Формат хранения времени
    pub format: FileFormat,
    /// Количество каналов данных (без столбца времени)
    pub channel_count: usize,
    /// Количество временных шагов
    pub step_count: usize,
}

/// Кодирование времени, зависит от [`FileFormat`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeEncoding {
    /// Время упаковано в int32: `t = (packed - offset) / scale`
    WithTime { scale: f64, offset: f64 },
    /// Время синтезируется: `t = start + increment * step`
    WithoutTime { start: f64, increment: f64 },
}

impl FileHeader {
    /// Создаёт заголовок из сырых значений int32, проверяя знак и размеры.
    pub fn new(
        format: FileFormat,
        channel_count: i32,
        step_count: i32,
    ) -> OutbResult<Self> {
        let channel_count = usize::try_from(channel_count).map_err(|_| {
            OutbError::invalid_header(format!("negative channel count {channel_count}"))
        })?;
        let step_count = usize::try_from(step_count)
            .map_err(|_| OutbError::invalid_header(format!("negative step count {step_count}")))?;

        let header = Self {
            format,
            channel_count,
            step_count,
        };
        header.sample_count()?;

        Ok(header)
    }

    /// Количество столбцов в декодированной матрице (время + каналы).
    pub fn column_count(&self) -> usize {
        self.channel_count + 1
    }

    /// Количество упакованных выборок каналов (`step_count * channel_count`).
    pub fn sample_count(&self) -> OutbResult<usize> {
        self.step_count
            .checked_mul(self.channel_count)
            .ok_or_else(|| {
                OutbError::invalid_header(format!(
                    "{} steps x {} channels overflows usize",
                    self.step_count, self.channel_count
                ))
            })
    }
}

impl TimeEncoding {
    /// Собирает кодирование времени из двух float64 полей заголовка.
    ///
    /// Смысл пары зависит от формата: `(scale, offset)` для
    /// [`FileFormat::WithTime`], `(start, increment)` для
    /// [`FileFormat::WithoutTime`].
    pub fn from_params(
        format: FileFormat,
        first: f64,
        second: f64,
    ) -> Self {
        match format {
            FileFormat::WithTime => TimeEncoding::WithTime {
                scale: first,
                offset: second,
            },
            FileFormat::WithoutTime => TimeEncoding::WithoutTime {
                start: first,
                increment: second,
            },
        }
    }

    pub fn format(&self) -> FileFormat {
        match self {
            TimeEncoding::WithTime { .. } => FileFormat::WithTime,
            TimeEncoding::WithoutTime { .. } => FileFormat::WithoutTime,
        }
    }

    /// Проверяет, что упакованное время можно де-скейлить.
    pub fn validate(&self) -> OutbResult<()> {
        match *self {
            TimeEncoding::WithTime { scale, .. } if scale == 0.0 => {
                Err(OutbError::MalformedScaling { column: 0, scale })
            }
            _ => Ok(()),
        }
    }

    /// Значение времени для шага `step`.
    ///
    /// `packed` используется только для [`TimeEncoding::WithTime`].
    pub fn time_at(
        &self,
        step: usize,
        packed: i32,
    ) -> f64 {
        match *self {
            TimeEncoding::WithTime { scale, offset } => (f64::from(packed) - offset) / scale,
            TimeEncoding::WithoutTime { start, increment } => start + increment * step as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_new_validates_counts() {
        let h = FileHeader::new(FileFormat::WithTime, 4, 100).unwrap();
        assert_eq!(h.column_count(), 5);
        assert_eq!(h.sample_count().unwrap(), 400);

        assert!(matches!(
            FileHeader::new(FileFormat::WithTime, -1, 100),
            Err(OutbError::InvalidHeader(_))
        ));
        assert!(matches!(
            FileHeader::new(FileFormat::WithoutTime, 1, -5),
            Err(OutbError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_header_zero_channels() {
        let h = FileHeader::new(FileFormat::WithoutTime, 0, 10).unwrap();
        assert_eq!(h.column_count(), 1);
        assert_eq!(h.sample_count().unwrap(), 0);
    }

    #[test]
    fn test_time_encoding_dispatch() {
        let te = TimeEncoding::from_params(FileFormat::WithTime, 100.0, 5.0);
        assert_eq!(te.format(), FileFormat::WithTime);
        assert_eq!(te.time_at(7, 105), 0.0);
        assert_eq!(te.time_at(0, 305), 3.0);

        let te = TimeEncoding::from_params(FileFormat::WithoutTime, 1.0, 0.5);
        assert_eq!(te.format(), FileFormat::WithoutTime);
        assert_eq!(te.time_at(0, 999), 1.0);
        assert_eq!(te.time_at(4, 0), 3.0);
    }

    #[test]
    fn test_time_encoding_zero_scale() {
        let te = TimeEncoding::WithTime {
            scale: 0.0,
            offset: 1.0,
        };
        assert!(matches!(
            te.validate(),
            Err(OutbError::MalformedScaling { column: 0, .. })
        ));

        // Нулевой шаг допустим: время просто постоянно
        let te = TimeEncoding::WithoutTime {
            start: 0.0,
            increment: 0.0,
        };
        assert!(te.validate().is_ok());
    }
}

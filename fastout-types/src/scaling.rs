use crate::{OutbError, OutbResult};

/// Коэффициенты линейного масштабирования каналов данных (без времени).
///
/// Упакованное значение канала `i` восстанавливается как
/// `(packed - offset[i]) / scale[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelScaling {
    pub scale: Vec<f32>,
    pub offset: Vec<f32>,
}

impl ChannelScaling {
    pub fn new(
        scale: Vec<f32>,
        offset: Vec<f32>,
    ) -> Self {
        debug_assert_eq!(scale.len(), offset.len());
        Self { scale, offset }
    }

    /// Количество каналов.
    pub fn len(&self) -> usize {
        self.scale.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scale.is_empty()
    }

    /// Проверяет, что ни один `scale` не равен нулю.
    ///
    /// В ошибке `column` это номер столбца декодированной матрицы (канал `i`
    /// соответствует столбцу `i + 1`).
    pub fn validate(&self) -> OutbResult<()> {
        match self.scale.iter().position(|&s| s == 0.0) {
            Some(i) => Err(OutbError::MalformedScaling {
                column: i + 1,
                scale: f64::from(self.scale[i]),
            }),
            None => Ok(()),
        }
    }

    /// Де-скейлинг одного упакованного значения канала `channel`.
    #[inline]
    pub fn descale(
        &self,
        channel: usize,
        packed: i16,
    ) -> f64 {
        (f64::from(packed) - f64::from(self.offset[channel])) / f64::from(self.scale[channel])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descale_widens_before_division() {
        let s = ChannelScaling::new(vec![10.0, 3.0], vec![0.0, 1.0]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.descale(0, 100), 10.0);
        // Целочисленное деление дало бы 0
        assert!((s.descale(1, 2) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.descale(0, i16::MIN), -3276.8);
    }

    #[test]
    fn test_validate_reports_data_column() {
        let s = ChannelScaling::new(vec![1.0, 0.0, 2.0], vec![0.0; 3]);
        match s.validate() {
            Err(OutbError::MalformedScaling { column, scale }) => {
                assert_eq!(column, 2);
                assert_eq!(scale, 0.0);
            }
            other => panic!("unexpected: {other:?}"),
        }

        assert!(ChannelScaling::default().validate().is_ok());
    }
}

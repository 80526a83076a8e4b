//! Кодировщик .outb для тестов и бенчмарков.
//!
//! Собирает байты в точности по раскладке из [`crate::format`]. Не
//! предназначен для записи реальных файлов: никаких проверок, любые поля
//! можно испортить намеренно.

use byteorder::{LittleEndian, WriteBytesExt};
use fastout_types::{NAME_LEN, UNIT_LEN};

use crate::format::{HEADER_SIZE, TIME_PARAMS_SIZE};

/// Построитель синтетического .outb файла.
#[derive(Debug, Clone)]
pub struct OutbBuilder {
    format_id: i16,
    time_params: (f64, f64),
    description: Vec<u8>,
    names: Vec<Vec<u8>>,
    units: Vec<Vec<u8>>,
    scale: Vec<f32>,
    offset: Vec<f32>,
    packed_time: Vec<i32>,
    samples: Vec<i16>,
    steps: usize,
}

impl OutbBuilder {
    fn new(
        format_id: i16,
        first: f64,
        second: f64,
    ) -> Self {
        Self {
            format_id,
            time_params: (first, second),
            description: Vec::new(),
            names: vec![b"Time".to_vec()],
            units: vec![b"(s)".to_vec()],
            scale: Vec::new(),
            offset: Vec::new(),
            packed_time: Vec::new(),
            samples: Vec::new(),
            steps: 0,
        }
    }

    /// Формат 1: упакованное время `(packed - offset) / scale`.
    pub fn with_time(
        time_scale: f64,
        time_offset: f64,
    ) -> Self {
        Self::new(1, time_scale, time_offset)
    }

    /// Формат 2: время `start + increment * step`.
    pub fn without_time(
        start: f64,
        increment: f64,
    ) -> Self {
        Self::new(2, start, increment)
    }

    /// Подменяет format_id (в том числе на неподдерживаемый).
    pub fn format_id(
        mut self,
        id: i16,
    ) -> Self {
        self.format_id = id;
        self
    }

    pub fn description(
        mut self,
        text: &str,
    ) -> Self {
        self.description = text.as_bytes().to_vec();
        self
    }

    /// Описание как есть, байт в байт.
    pub fn description_bytes(
        mut self,
        bytes: &[u8],
    ) -> Self {
        self.description = bytes.to_vec();
        self
    }

    /// Имя и единицы столбца времени.
    pub fn time_label(
        mut self,
        name: &str,
        unit: &str,
    ) -> Self {
        self.names[0] = name.as_bytes().to_vec();
        self.units[0] = unit.as_bytes().to_vec();
        self
    }

    pub fn channel(
        self,
        name: &str,
        unit: &str,
        scale: f32,
        offset: f32,
    ) -> Self {
        self.channel_bytes(name.as_bytes(), unit.as_bytes(), scale, offset)
    }

    pub fn channel_bytes(
        mut self,
        name: &[u8],
        unit: &[u8],
        scale: f32,
        offset: f32,
    ) -> Self {
        self.names.push(name.to_vec());
        self.units.push(unit.to_vec());
        self.scale.push(scale);
        self.offset.push(offset);
        self
    }

    /// Одна строка упакованных данных. `packed_time` пишется только для
    /// формата 1.
    pub fn row(
        mut self,
        packed_time: Option<i32>,
        samples: &[i16],
    ) -> Self {
        if let Some(t) = packed_time {
            self.packed_time.push(t);
        }
        self.samples.extend_from_slice(samples);
        self.steps += 1;
        self
    }

    /// Количество каналов данных.
    pub fn channel_count(&self) -> usize {
        self.scale.len()
    }

    /// Смещение начала упакованных данных (packed time или samples).
    pub fn packed_data_offset(&self) -> usize {
        let labels = (self.channel_count() + 1) * (NAME_LEN + UNIT_LEN);
        HEADER_SIZE
            + TIME_PARAMS_SIZE
            + self.channel_count() * 8
            + 4
            + self.description.len()
            + labels
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.packed_data_offset() + self.samples.len() * 2);

        // Запись в Vec<u8> не может завершиться ошибкой
        let w = &mut out;
        w.write_i16::<LittleEndian>(self.format_id).unwrap();
        w.write_i32::<LittleEndian>(self.channel_count() as i32).unwrap();
        w.write_i32::<LittleEndian>(self.steps as i32).unwrap();
        w.write_f64::<LittleEndian>(self.time_params.0).unwrap();
        w.write_f64::<LittleEndian>(self.time_params.1).unwrap();

        for &s in &self.scale {
            w.write_f32::<LittleEndian>(s).unwrap();
        }
        for &o in &self.offset {
            w.write_f32::<LittleEndian>(o).unwrap();
        }

        w.write_i32::<LittleEndian>(self.description.len() as i32).unwrap();
        w.extend_from_slice(&self.description);

        for name in &self.names {
            w.extend_from_slice(&pad_field(name, NAME_LEN));
        }
        for unit in &self.units {
            w.extend_from_slice(&pad_field(unit, UNIT_LEN));
        }

        if self.format_id == 1 {
            for &t in &self.packed_time {
                w.write_i32::<LittleEndian>(t).unwrap();
            }
        }
        for &s in &self.samples {
            w.write_i16::<LittleEndian>(s).unwrap();
        }

        out
    }
}

/// Дополняет поле пробелами до `width` (длинное обрезается).
pub fn pad_field(
    bytes: &[u8],
    width: usize,
) -> Vec<u8> {
    let mut out: Vec<u8> = bytes.iter().copied().take(width).collect();
    out.resize(width, b' ');
    out
}

/// Упаковывает значение так же, как это делает FAST:
/// `round(value * scale + offset)` с насыщением до диапазона i16.
pub fn pack_i16(
    value: f64,
    scale: f32,
    offset: f32,
) -> i16 {
    let packed = (value * f64::from(scale) + f64::from(offset)).round();
    packed.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// То же для упакованного времени (int32).
pub fn pack_i32(
    value: f64,
    scale: f64,
    offset: f64,
) -> i32 {
    let packed = (value * scale + offset).round();
    packed.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_field() {
        assert_eq!(pad_field(b"Time", 10), b"Time      ".to_vec());
        assert_eq!(pad_field(b"VeryLongName", 10), b"VeryLongNa".to_vec());
    }

    #[test]
    fn test_packed_data_offset_matches_build() {
        let b = OutbBuilder::without_time(0.0, 0.05)
            .description("abc")
            .channel("A", "(m)", 1.0, 0.0);
        // без строк данных весь файл состоит из метаданных
        assert_eq!(b.build().len(), b.packed_data_offset());
        assert_eq!(b.packed_data_offset(), 2 + 4 + 4 + 16 + 8 + 4 + 3 + 40);
    }

    #[test]
    fn test_pack_saturates() {
        assert_eq!(pack_i16(1e9, 1.0, 0.0), i16::MAX);
        assert_eq!(pack_i16(-1e9, 1.0, 0.0), i16::MIN);
        assert_eq!(pack_i16(1.24, 10.0, 0.0), 12);
        assert_eq!(pack_i32(2.5, 1000.0, 0.0), 2500);
    }
}

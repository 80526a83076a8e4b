use std::{collections::HashMap, path::Path};

use fastout_types::{FileFormat, OutbResult};
use log::warn;

use crate::{
    channel::{sanitize_name, ChannelArray},
    decoder::{read_outb_file, OutbFile},
};

/// Набор именованных каналов одного .outb файла.
///
/// Каналы доступны по идентификатору (имя без `- + * /`). Запрос тоже
/// проходит через [`sanitize_name`], поэтому `get("-ReactFXss")` и
/// `get("ReactFXss")` возвращают один и тот же канал.
#[derive(Debug, Clone)]
pub struct DataSet {
    description: String,
    format: FileFormat,
    arrays: Vec<ChannelArray>,
    index: HashMap<String, usize>,
}

impl DataSet {
    /// Раскладывает декодированную матрицу по каналам.
    ///
    /// Если идентификаторы двух каналов совпадают, доступ по имени получает
    /// более поздний канал; оба остаются в [`DataSet::iter`].
    pub fn from_outb(file: OutbFile) -> Self {
        let format = file.header.format;
        let mut arrays = Vec::with_capacity(file.names.len());
        let mut index = HashMap::with_capacity(file.names.len());

        for (i, (name, unit)) in file.names.into_iter().zip(file.units).enumerate() {
            let array = ChannelArray::new(file.channels.column(i).to_owned(), name, unit);
            let key = array.identifier();

            if let Some(prev) = index.insert(key.clone(), i) {
                warn!("Channel identifier '{key}' of column {i} shadows column {prev}");
            }
            arrays.push(array);
        }

        Self {
            description: file.description,
            format,
            arrays,
            index,
        }
    }

    /// Читает .outb файл с диска.
    pub fn load<P: AsRef<Path>>(path: P) -> OutbResult<Self> {
        Ok(Self::from_outb(read_outb_file(path)?))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Имена каналов в порядке столбцов (как в файле).
    pub fn names(&self) -> Vec<&str> {
        self.arrays.iter().map(ChannelArray::name).collect()
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&ChannelArray> {
        self.lookup(name).map(|i| &self.arrays[i])
    }

    pub fn get_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut ChannelArray> {
        self.lookup(name).map(move |i| &mut self.arrays[i])
    }

    /// Столбец времени (всегда первый).
    pub fn time(&self) -> Option<&ChannelArray> {
        self.arrays.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChannelArray> {
        self.arrays.iter()
    }

    /// Количество каналов, включая время.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    fn lookup(
        &self,
        name: &str,
    ) -> Option<usize> {
        self.index.get(&sanitize_name(name.trim())).copied()
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a ChannelArray;
    type IntoIter = std::slice::Iter<'a, ChannelArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.arrays.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{decoder::decode, testing::OutbBuilder};

    fn dataset() -> DataSet {
        let raw = OutbBuilder::with_time(100.0, 0.0)
            .description("Predictions were generated by OpenFAST")
            .channel("-ReactFXss", "(kN)", 10.0, 0.0)
            .channel("Azimuth", "(deg)", 100.0, 0.0)
            .row(Some(0), &[10, 0])
            .row(Some(5), &[20, 9000])
            .build();

        DataSet::from_outb(decode(Cursor::new(raw)).unwrap())
    }

    #[test]
    fn test_access_by_sanitized_and_raw_name() {
        let ds = dataset();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.names(), vec!["Time", "-ReactFXss", "Azimuth"]);
        assert_eq!(ds.format(), FileFormat::WithTime);
        assert_eq!(ds.description(), "Predictions were generated by OpenFAST");

        let a = ds.get("ReactFXss").unwrap();
        let b = ds.get("-ReactFXss").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_vec(), vec![1.0, 2.0]);
        assert_eq!(a.unit(), "(kN)");

        assert!(ds.get("Missing").is_none());
    }

    #[test]
    fn test_time_channel() {
        let ds = dataset();
        let t = ds.time().unwrap();
        assert_eq!(t.name(), "Time");
        assert_eq!(t.to_vec(), vec![0.0, 0.05]);
        assert_eq!(t.label(), "Time (s)");
    }

    #[test]
    fn test_get_mut_label() {
        let mut ds = dataset();
        ds.get_mut("Azimuth").unwrap().set_label("Rotor azimuth");
        assert_eq!(ds.get("Azimuth").unwrap().label(), "Rotor azimuth");

        let labels: Vec<String> = ds.iter().map(|c| c.label().into_owned()).collect();
        assert_eq!(labels, vec!["Time (s)", "-ReactFXss (kN)", "Rotor azimuth"]);
    }

    #[test]
    fn test_duplicate_identifier_last_wins() {
        let raw = OutbBuilder::without_time(0.0, 1.0)
            .channel("RootMxb1", "(kN-m)", 1.0, 0.0)
            .channel("-RootMxb1", "(kN-m)", 1.0, 0.0)
            .row(None, &[1, 2])
            .build();

        let ds = DataSet::from_outb(decode(Cursor::new(raw)).unwrap());
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.get("RootMxb1").unwrap().name(), "-RootMxb1");
    }
}

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use fastout_types::{
    ChannelScaling, FileFormat, FileHeader, OutbError, OutbResult, TimeEncoding, NAME_LEN,
    UNIT_LEN,
};
use log::{debug, info, warn};
use ndarray::{Array2, ArrayView1, Axis};

use crate::{
    binary::PrimitiveReader,
    format::{check_text, decode_fixed_field, decode_latin1, EncodingIssue, TextField},
};

/// Полностью декодированный .outb файл.
///
/// Столбец 0 матрицы `channels` содержит время, столбцы `1..=channel_count`
/// содержат каналы данных. `names` и `units` параллельны столбцам.
#[derive(Debug, Clone)]
pub struct OutbFile {
    pub header: FileHeader,
    pub time: TimeEncoding,
    pub scaling: ChannelScaling,
    pub description: String,
    pub names: Vec<String>,
    pub units: Vec<String>,
    /// Матрица `step_count x (channel_count + 1)`
    pub channels: Array2<f64>,
    /// Текстовые поля с непечатаемыми байтами (некритично)
    pub encoding_issues: Vec<EncodingIssue>,
}

/// Сырые упакованные данные до де-скейлинга.
#[derive(Debug, Clone, Default)]
pub struct PackedMatrix {
    /// Упакованное время, только для [`FileFormat::WithTime`]
    pub time: Option<Vec<i32>>,
    /// Выборки каналов, шаг снаружи, канал внутри
    pub samples: Vec<i16>,
}

/// Пошаговый декодер .outb потока.
///
/// Шаги жёстко упорядочены: каждый читает с позиции, оставленной предыдущим.
/// [`OutbDecoder::decode`] потребляет декодер, поэтому поток закрывается до
/// де-скейлинга.
pub struct OutbDecoder<R: Read> {
    reader: PrimitiveReader<R>,
    source: String,
    issues: Vec<EncodingIssue>,
}

impl<R: Read> OutbDecoder<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: PrimitiveReader::new(inner),
            source: String::from("<stream>"),
            issues: Vec::new(),
        }
    }

    /// Имя источника для логов (обычно путь к файлу).
    pub fn with_source_name<S: Into<String>>(
        mut self,
        source: S,
    ) -> Self {
        self.source = source.into();
        self
    }

    /// Текущее смещение в потоке.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Шаг 1: format_id, channel_count, step_count.
    ///
    /// Неизвестный format_id отклоняется сразу после чтения, до любых
    /// следующих полей.
    pub fn read_header(&mut self) -> OutbResult<FileHeader> {
        let format_id: i16 = self.reader.read_scalar("format id")?;
        let format = FileFormat::from_i16(format_id)?;

        let channel_count: i32 = self.reader.read_scalar("channel count")?;
        let step_count: i32 = self.reader.read_scalar("step count")?;
        let header = FileHeader::new(format, channel_count, step_count)?;

        debug!(
            "{}: format={format}, channels={}, steps={}",
            self.source, header.channel_count, header.step_count
        );

        Ok(header)
    }

    /// Шаг 2: параметры времени в зависимости от формата.
    pub fn read_time_encoding(
        &mut self,
        format: FileFormat,
    ) -> OutbResult<TimeEncoding> {
        let first: f64 = self.reader.read_scalar("time parameters")?;
        let second: f64 = self.reader.read_scalar("time parameters")?;

        Ok(TimeEncoding::from_params(format, first, second))
    }

    /// Шаг 3: таблицы scale и offset каналов.
    pub fn read_scaling(
        &mut self,
        channel_count: usize,
    ) -> OutbResult<ChannelScaling> {
        let scale = self.reader.read_vec::<f32>(channel_count, "channel scale")?;
        let offset = self.reader.read_vec::<f32>(channel_count, "channel offset")?;

        Ok(ChannelScaling::new(scale, offset))
    }

    /// Шаг 4: описание с префиксом длины int32.
    pub fn read_description(&mut self) -> OutbResult<String> {
        let len: i32 = self.reader.read_scalar("description length")?;
        let len = usize::try_from(len)
            .map_err(|_| OutbError::invalid_header(format!("negative description length {len}")))?;

        let bytes = self.reader.read_bytes(len, "description")?;
        self.note_issue(check_text(TextField::Description, &bytes));

        Ok(decode_latin1(&bytes))
    }

    /// Шаги 5 и 6: `count` полей имён фиксированной ширины.
    pub fn read_names(
        &mut self,
        count: usize,
    ) -> OutbResult<Vec<String>> {
        self.read_labels(count, NAME_LEN, "channel names", TextField::ChannelName)
    }

    pub fn read_units(
        &mut self,
        count: usize,
    ) -> OutbResult<Vec<String>> {
        self.read_labels(count, UNIT_LEN, "channel units", TextField::ChannelUnit)
    }

    /// Шаг 7: упакованное время (если есть) и выборки каналов.
    pub fn read_packed(
        &mut self,
        header: &FileHeader,
    ) -> OutbResult<PackedMatrix> {
        let time = if header.format.has_packed_time() {
            Some(self.reader.read_vec::<i32>(header.step_count, "packed time")?)
        } else {
            None
        };

        let samples = self
            .reader
            .read_vec::<i16>(header.sample_count()?, "packed samples")?;

        Ok(PackedMatrix { time, samples })
    }

    /// Выполняет все шаги и де-скейлинг.
    pub fn decode(mut self) -> OutbResult<OutbFile> {
        let header = self.read_header()?;
        let time = self.read_time_encoding(header.format)?;
        let scaling = self.read_scaling(header.channel_count)?;
        let description = self.read_description()?;
        let names = self.read_names(header.column_count())?;
        let units = self.read_units(header.column_count())?;

        info!("Reading from {} with heading: \"{description}\"", self.source);

        let packed = self.read_packed(&header)?;

        debug!("{}: consumed {} bytes", self.source, self.reader.position());

        let Self { reader, source, issues } = self;
        drop(reader);

        if !issues.is_empty() {
            warn!(
                "{source}: {} text field(s) contain non-printable bytes, first: {}",
                issues.len(),
                issues[0]
            );
        }

        let channels = descale(&header, &time, &scaling, &packed)?;

        Ok(OutbFile {
            header,
            time,
            scaling,
            description,
            names,
            units,
            channels,
            encoding_issues: issues,
        })
    }

    fn read_labels(
        &mut self,
        count: usize,
        width: usize,
        field: &'static str,
        kind: fn(usize) -> TextField,
    ) -> OutbResult<Vec<String>> {
        let mut out = Vec::with_capacity(count.min(4096));

        for i in 0..count {
            let bytes = self.reader.read_bytes(width, field)?;
            self.note_issue(check_text(kind(i), &bytes));
            out.push(decode_fixed_field(&bytes));
        }

        Ok(out)
    }

    fn note_issue(
        &mut self,
        issue: Option<EncodingIssue>,
    ) {
        if let Some(issue) = issue {
            debug!("{}: {issue}", self.source);
            self.issues.push(issue);
        }
    }
}

/// Де-скейлинг упакованной матрицы в `step_count x (channel_count + 1)`.
///
/// Нулевой scale (канала или времени) является ошибкой для всего файла, частичных
/// столбцов не бывает.
pub fn descale(
    header: &FileHeader,
    time: &TimeEncoding,
    scaling: &ChannelScaling,
    packed: &PackedMatrix,
) -> OutbResult<Array2<f64>> {
    time.validate()?;
    scaling.validate()?;

    let n = header.channel_count;
    let expected = header.sample_count()?;
    if packed.samples.len() != expected || scaling.len() != n {
        return Err(OutbError::invalid_header(format!(
            "packed matrix has {} samples and {} scales, header expects {expected} and {n}",
            packed.samples.len(),
            scaling.len()
        )));
    }

    // Упакованное время есть ровно у WithTime и ровно на каждый шаг
    let time_len = packed.time.as_ref().map(Vec::len);
    let expected_time = header
        .format
        .has_packed_time()
        .then_some(header.step_count);
    if time_len != expected_time {
        return Err(OutbError::invalid_header(format!(
            "packed time has {time_len:?} values, {} header expects {expected_time:?}",
            header.format
        )));
    }

    let mut channels = Array2::<f64>::zeros((header.step_count, header.column_count()));

    for (t, mut row) in channels.axis_iter_mut(Axis(0)).enumerate() {
        let packed_time = packed.time.as_ref().map_or(0, |v| v[t]);
        row[0] = time.time_at(t, packed_time);

        for (i, &p) in packed.samples[t * n..(t + 1) * n].iter().enumerate() {
            row[i + 1] = scaling.descale(i, p);
        }
    }

    Ok(channels)
}

/// Декодирует .outb из произвольного источника байт.
pub fn decode<R: Read>(source: R) -> OutbResult<OutbFile> {
    OutbDecoder::new(source).decode()
}

/// Открывает, декодирует и закрывает .outb файл.
pub fn read_outb_file<P: AsRef<Path>>(path: P) -> OutbResult<OutbFile> {
    let path = path.as_ref();
    let file = File::open(path)?;

    OutbDecoder::new(BufReader::new(file))
        .with_source_name(path.display().to_string())
        .decode()
}

impl OutbFile {
    /// Исходное значение поля format_id.
    pub fn format_id(&self) -> i16 {
        self.header.format.as_i16()
    }

    pub fn step_count(&self) -> usize {
        self.header.step_count
    }

    pub fn channel_count(&self) -> usize {
        self.header.channel_count
    }

    /// Столбец времени.
    pub fn time_column(&self) -> ArrayView1<'_, f64> {
        self.channels.column(0)
    }

    /// Столбец по индексу (0: время).
    pub fn column(
        &self,
        index: usize,
    ) -> Option<ArrayView1<'_, f64>> {
        (index < self.channels.ncols()).then(|| self.channels.column(index))
    }

    /// Индекс столбца по точному имени канала.
    pub fn channel_index(
        &self,
        name: &str,
    ) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Кортеж `(channels, names, units, format_id, description)`.
    pub fn into_parts(self) -> (Array2<f64>, Vec<String>, Vec<String>, i16, String) {
        let format_id = self.format_id();
        (
            self.channels,
            self.names,
            self.units,
            format_id,
            self.description,
        )
    }
}

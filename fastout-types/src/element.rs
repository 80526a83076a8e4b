/// Тип элемента фиксированной ширины в .outb файле
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// int16: идентификатор формата, упакованные выборки каналов
    I16,
    /// int32: счётчики, длина описания, упакованное время
    I32,
    /// uint8: символы описания, имён и единиц
    U8,
    /// float32: масштаб и смещение каналов
    F32,
    /// float64: параметры времени
    F64,
}

impl ElementType {
    /// Размер одного элемента в байтах
    pub fn size(&self) -> usize {
        match self {
            ElementType::U8 => 1,
            ElementType::I16 => 2,
            ElementType::I32 | ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }
}

/// Одно прочитанное значение.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I16(i16),
    I32(i32),
    U8(u8),
    F32(f32),
    F64(f64),
}

/// Последовательность значений одного типа в порядке файла.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    I16(Vec<i16>),
    I32(Vec<i32>),
    U8(Vec<u8>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Результат чтения поля: скаляр при `count == 1`, иначе последовательность.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Scalar(Value),
    Sequence(Values),
}

impl Value {
    pub fn element_type(&self) -> ElementType {
        match self {
            Value::I16(_) => ElementType::I16,
            Value::I32(_) => ElementType::I32,
            Value::U8(_) => ElementType::U8,
            Value::F32(_) => ElementType::F32,
            Value::F64(_) => ElementType::F64,
        }
    }

    /// Расширение до f64 без потерь.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::I16(v) => f64::from(v),
            Value::I32(v) => f64::from(v),
            Value::U8(v) => f64::from(v),
            Value::F32(v) => f64::from(v),
            Value::F64(v) => v,
        }
    }
}

impl Values {
    pub fn element_type(&self) -> ElementType {
        match self {
            Values::I16(_) => ElementType::I16,
            Values::I32(_) => ElementType::I32,
            Values::U8(_) => ElementType::U8,
            Values::F32(_) => ElementType::F32,
            Values::F64(_) => ElementType::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Values::I16(v) => v.len(),
            Values::I32(v) => v.len(),
            Values::U8(v) => v.len(),
            Values::F32(v) => v.len(),
            Values::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Field {
    /// Количество прочитанных элементов.
    pub fn len(&self) -> usize {
        match self {
            Field::Scalar(_) => 1,
            Field::Sequence(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_scalar(&self) -> Option<Value> {
        match self {
            Field::Scalar(v) => Some(*v),
            Field::Sequence(_) => None,
        }
    }
}

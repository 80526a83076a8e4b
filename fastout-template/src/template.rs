use crate::{TemplateError, TemplateResult};

/// Фрагмент разобранного шаблона.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Key(String),
}

/// Разобранный шаблон со ссылками `${key}` и `$key`.
///
/// `$$` даёт литеральный `$`. Идентификатор: `[_A-Za-z][_A-Za-z0-9]*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Разбирает текст шаблона.
    ///
    /// # Примеры
    /// ```
    /// use fastout_template::Template;
    /// let t = Template::parse("TMax = ${TMax} $$").unwrap();
    /// assert_eq!(t.keys().collect::<Vec<_>>(), vec!["TMax"]);
    /// ```
    pub fn parse(text: &str) -> TemplateResult<Self> {
        let chars: Vec<char> = text.chars().collect();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let (mut line, mut column) = (1usize, 1usize);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c != '$' {
                literal.push(c);
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
                i += 1;
                continue;
            }

            let invalid = TemplateError::InvalidPlaceholder { line, column };

            let (key, end) = match chars.get(i + 1) {
                Some('$') => {
                    literal.push('$');
                    i += 2;
                    column += 2;
                    continue;
                }
                Some('{') => {
                    let start = i + 2;
                    let close = chars[start..]
                        .iter()
                        .position(|&c| c == '}')
                        .map(|p| start + p)
                        .ok_or(invalid)?;
                    let key: String = chars[start..close].iter().collect();
                    if !is_identifier(&key) {
                        return Err(TemplateError::InvalidPlaceholder { line, column });
                    }
                    (key, close + 1)
                }
                Some(&c) if is_ident_start(c) => {
                    let start = i + 1;
                    let end = chars[start..]
                        .iter()
                        .position(|&c| !is_ident_continue(c))
                        .map_or(chars.len(), |p| start + p);
                    (chars[start..end].iter().collect(), end)
                }
                _ => return Err(invalid),
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Key(key));
            column += end - i;
            i = end;
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Ключи в порядке появления (с повторами).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Key(k) => Some(k.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Подставляет значения. Первый ключ без значения даёт
    /// [`TemplateError::MissingKey`].
    pub fn render<F>(
        &self,
        mut lookup: F,
    ) -> TemplateResult<String>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Key(key) => {
                    let value =
                        lookup(key).ok_or_else(|| TemplateError::MissingKey(key.clone()))?;
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if is_ident_start(c)) && chars.all(is_ident_continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_placeholder_forms() {
        let t = Template::parse("a = ${a}\nb = $b_2, c").unwrap();
        assert_eq!(
            t.segments(),
            &[
                Segment::Literal("a = ".into()),
                Segment::Key("a".into()),
                Segment::Literal("\nb = ".into()),
                Segment::Key("b_2".into()),
                Segment::Literal(", c".into()),
            ]
        );
    }

    #[test]
    fn test_dollar_escape() {
        let t = Template::parse("cost $$5").unwrap();
        assert_eq!(t.keys().count(), 0);
        assert_eq!(t.render(|_| None).unwrap(), "cost $5");
    }

    #[test]
    fn test_braced_key_followed_by_identifier_chars() {
        let t = Template::parse("${DT}s").unwrap();
        let out = t.render(|k| (k == "DT").then(|| "0.01".to_string())).unwrap();
        assert_eq!(out, "0.01s");
    }

    #[test]
    fn test_invalid_placeholders() {
        let cases = [
            ("$", 1, 1),
            ("abc $1", 1, 5),
            ("ok\n  ${1x}", 2, 3),
            ("${unclosed", 1, 1),
            ("${}", 1, 1),
            ("x\ny\n$ ", 3, 1),
        ];
        for (text, line, column) in cases {
            match Template::parse(text) {
                Err(TemplateError::InvalidPlaceholder { line: l, column: c }) => {
                    assert_eq!((l, c), (line, column), "{text:?}");
                }
                other => panic!("{text:?}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_render_missing_key() {
        let t = Template::parse("${a} ${b}").unwrap();
        match t.render(|k| (k == "a").then(|| "1".to_string())) {
            Err(TemplateError::MissingKey(k)) => assert_eq!(k, "b"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_non_ascii_literal_columns() {
        // столбцы считаются в символах, а не в байтах
        match Template::parse("°° $-") {
            Err(TemplateError::InvalidPlaceholder { line, column }) => {
                assert_eq!((line, column), (1, 4));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

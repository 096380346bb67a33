//! Minimal text templates with Go-style `{{.Field}}` placeholders.
//!
//! A template is parsed once into literal text and named fields, then
//! rendered against a map of values. Parsing rejects unterminated or
//! malformed placeholders; rendering rejects fields without a value, so a
//! typo in a template never silently produces a half-filled file.

use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template '{template}': unterminated placeholder at byte {offset}")]
    Unterminated { template: String, offset: usize },

    #[error("template '{template}': invalid placeholder '{placeholder}' at byte {offset}, expected {{{{.Name}}}}")]
    InvalidPlaceholder {
        template: String,
        placeholder: String,
        offset: usize,
    },

    #[error("template '{template}': no value for field '{field}'")]
    MissingValue { template: String, field: String },

    #[error("template '{template}': failed to write output: {source}")]
    Io {
        template: String,
        #[source]
        source: std::io::Error,
    },
}

/// Values substituted into a template, keyed by field name without the dot.
pub type TemplateData = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(String),
}

#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }

            let after_open = &rest[start + 2..];
            let end = after_open.find("}}").ok_or_else(|| TemplateError::Unterminated {
                template: name.to_string(),
                offset: offset + start,
            })?;

            let inner = after_open[..end].trim();
            let field = inner
                .strip_prefix('.')
                .filter(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
                .ok_or_else(|| TemplateError::InvalidPlaceholder {
                    template: name.to_string(),
                    placeholder: inner.to_string(),
                    offset: offset + start,
                })?;
            segments.push(Segment::Field(field.to_string()));

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    /// Field names referenced by the template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(f) => Some(f.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn render<W: Write>(&self, data: &TemplateData, out: &mut W) -> Result<(), TemplateError> {
        // Resolve every field before writing so a missing value leaves the
        // output untouched.
        let mut pieces = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => pieces.push(text.as_str()),
                Segment::Field(field) => {
                    let value = data.get(field).ok_or_else(|| TemplateError::MissingValue {
                        template: self.name.clone(),
                        field: field.clone(),
                    })?;
                    pieces.push(value.as_str());
                }
            }
        }

        for piece in pieces {
            out.write_all(piece.as_bytes()).map_err(|source| TemplateError::Io {
                template: self.name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn render_to_string(&self, data: &TemplateData) -> Result<String, TemplateError> {
        let mut buf = Vec::new();
        self.render(data, &mut buf)?;
        // Template text and values are both `str`, so the buffer is UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> TemplateData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_substitutes_fields() {
        let tmpl = Template::parse("t", "root={{.BaseWorkDir}}, folders={{ .Folders }}!").unwrap();
        let out = tmpl
            .render_to_string(&data(&[("BaseWorkDir", "/home/stai/work"), ("Folders", "[]")]))
            .unwrap();
        assert_eq!(out, "root=/home/stai/work, folders=[]!");
        assert_eq!(tmpl.fields().collect::<Vec<_>>(), vec!["BaseWorkDir", "Folders"]);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let source = "# Title\n\nNo placeholders { here }.\n";
        let tmpl = Template::parse("readme", source).unwrap();
        assert_eq!(tmpl.fields().count(), 0);
        assert_eq!(tmpl.render_to_string(&TemplateData::new()).unwrap(), source);
    }

    #[test]
    fn test_unterminated_placeholder() {
        let err = Template::parse("ws", "abc {{.Folders").unwrap_err();
        assert!(matches!(err, TemplateError::Unterminated { offset: 4, .. }));
    }

    #[test]
    fn test_invalid_placeholders() {
        for source in ["{{}}", "{{ . }}", "{{Folders}}", "{{.Fol ders}}"] {
            let err = Template::parse("ws", source).unwrap_err();
            assert!(
                matches!(err, TemplateError::InvalidPlaceholder { .. }),
                "unexpected result for {:?}: {}",
                source,
                err
            );
        }
    }

    #[test]
    fn test_missing_value_writes_nothing() {
        let tmpl = Template::parse("ws", "a{{.Folders}}b{{.BaseWorkDir}}").unwrap();
        let mut out = Vec::new();
        let err = tmpl.render(&data(&[("Folders", "x")]), &mut out).unwrap_err();
        assert!(err.to_string().contains("BaseWorkDir"));
        assert!(out.is_empty());
    }
}

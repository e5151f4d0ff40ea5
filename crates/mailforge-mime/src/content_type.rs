//! MIME content type handling.

use std::fmt;

/// MIME content type with parameters.
///
/// Parameters keep their insertion order and are always rendered quoted,
/// e.g. `multipart/mixed; boundary="abc"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Main type (e.g., "text", "application", "multipart").
    pub main_type: String,
    /// Subtype (e.g., "html", "octet-stream", "mixed").
    pub sub_type: String,
    /// Parameters in insertion order (e.g., charset, boundary, name).
    pub parameters: Vec<(String, String)>,
}

impl ContentType {
    /// Creates a new content type.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: Vec::new(),
        }
    }

    /// Creates a text/html content type with a UTF-8 charset.
    #[must_use]
    pub fn text_html() -> Self {
        Self::new("text", "html").with_parameter("charset", "utf-8")
    }

    /// Creates an application/octet-stream content type carrying a file name.
    #[must_use]
    pub fn octet_stream(name: impl Into<String>) -> Self {
        Self::new("application", "octet-stream").with_parameter("name", name)
    }

    /// Creates a multipart/mixed content type with boundary.
    #[must_use]
    pub fn multipart_mixed(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "mixed").with_parameter("boundary", boundary)
    }

    /// Adds a parameter, replacing an existing one with the same key.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .parameters
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some((_, existing)) => *existing = value,
            None => self.parameters.push((key, value)),
        }
        self
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = &self.main_type;
        let sub = &self.sub_type;
        write!(f, "{main}/{sub}")?;

        for (key, value) in &self.parameters {
            write!(f, "; {key}=\"{value}\"")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter<'a>(ct: &'a ContentType, key: &str) -> Option<&'a str> {
        ct.parameters
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_content_type_new() {
        let ct = ContentType::new("text", "plain");
        assert_eq!(ct.main_type, "text");
        assert_eq!(ct.sub_type, "plain");
        assert!(ct.parameters.is_empty());
        assert_eq!(ct.to_string(), "text/plain");
    }

    #[test]
    fn test_text_html() {
        let ct = ContentType::text_html();
        assert_eq!(parameter(&ct, "charset"), Some("utf-8"));
        assert_eq!(ct.to_string(), "text/html; charset=\"utf-8\"");
    }

    #[test]
    fn test_multipart_mixed() {
        let ct = ContentType::multipart_mixed("boundary123");
        assert_eq!(parameter(&ct, "boundary"), Some("boundary123"));
        assert_eq!(ct.to_string(), "multipart/mixed; boundary=\"boundary123\"");
    }

    #[test]
    fn test_octet_stream() {
        let ct = ContentType::octet_stream("report.pdf");
        assert_eq!(
            ct.to_string(),
            "application/octet-stream; name=\"report.pdf\""
        );
    }

    #[test]
    fn test_with_parameter_keeps_order_and_replaces() {
        let ct = ContentType::new("text", "plain")
            .with_parameter("charset", "iso-8859-1")
            .with_parameter("format", "flowed")
            .with_parameter("Charset", "utf-8");

        assert_eq!(ct.parameters.len(), 2);
        assert_eq!(parameter(&ct, "charset"), Some("utf-8"));
        assert_eq!(
            ct.to_string(),
            "text/plain; charset=\"utf-8\"; format=\"flowed\""
        );
    }
}

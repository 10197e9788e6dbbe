use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use scraper::{Html, Selector};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("body is not valid {encoding}")]
    Decode { encoding: String },
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

/// A compiled CSS selector.
#[derive(Debug, Clone)]
pub struct FragmentSelector {
    compiled: Selector,
}

impl FragmentSelector {
    pub fn parse(source: &str) -> Result<Self, QueryError> {
        let compiled = Selector::parse(source).map_err(|err| QueryError::Selector {
            selector: source.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self { compiled })
    }
}

/// A parsed HTML document. Not `Send`; query it and drop it before awaiting.
pub struct Document {
    html: Html,
    encoding: &'static Encoding,
}

impl Document {
    pub fn encoding_label(&self) -> &'static str {
        self.encoding.name()
    }

    /// Text of every element matching `selector`, trimmed, in document order.
    pub fn fragments<'a>(
        &'a self,
        selector: &'a FragmentSelector,
    ) -> impl Iterator<Item = String> + 'a {
        self.html
            .select(&selector.compiled)
            .map(|element| element.text().collect::<String>().trim().to_string())
    }
}

/// Decode raw bytes (BOM, then Content-Type charset, then chardetng) and parse them as HTML.
pub fn parse_document(bytes: &[u8], content_type: Option<&str>) -> Result<Document, QueryError> {
    let encoding = detect_encoding(bytes, content_type);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(QueryError::Decode {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(Document {
        html: Html::parse_document(&text),
        encoding,
    })
}

fn detect_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\''].as_ref()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_param_is_case_insensitive_and_unquoted() {
        assert_eq!(charset_param("text/html; Charset=\"utf-8\""), Some("utf-8"));
        assert_eq!(charset_param("text/html"), None);
    }

    #[test]
    fn header_charset_wins_over_detection() {
        let doc = parse_document(b"<p>caf\xe9</p>", Some("text/html; charset=ISO-8859-1")).unwrap();
        assert_eq!(doc.encoding_label(), "windows-1252");
    }

    #[test]
    fn invalid_utf8_under_declared_charset_is_rejected() {
        let err = parse_document(b"<p>\xff\xfe\xfd</p>", Some("text/html; charset=utf-8"))
            .err()
            .unwrap();
        assert_eq!(
            err,
            QueryError::Decode {
                encoding: "UTF-8".into()
            }
        );
    }
}

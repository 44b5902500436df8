use crate::fetcher::{errors::FetchError, types::PageResponse};
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

/// How many leading bytes are inspected for a `<meta charset>` declaration.
const SNIFF_LEN: usize = 4096;

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: &[u8],
    content_type: &str,
) -> Result<PageResponse, FetchError> {
    let encoding = detect_encoding(content_type, body_bytes);
    let body_utf8 = decode(body_bytes, encoding)?;

    Ok(PageResponse {
        url_final,
        status,
        body_utf8,
        charset: encoding.name(),
    })
}

fn label_encoding(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Header first, then `<meta>` (which also covers the http-equiv form), then
/// a statistical guess.
fn detect_encoding(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_encoding(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    let head = &body_bytes[..body_bytes.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(encoding) = label_encoding(&META_CHARSET_REGEX, &head_str) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, false);
    detector.guess(None, true)
}

fn decode(body_bytes: &[u8], encoding: &'static Encoding) -> Result<String, FetchError> {
    let (decoded, used, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        // News pages occasionally carry a stray byte in an otherwise valid
        // UTF-8 document; the replacement characters are harmless there.
        if used == encoding_rs::UTF_8 {
            warn!("page contained invalid UTF-8 sequences; decoded lossily");
        } else {
            return Err(FetchError::Charset(format!(
                "Failed to decode content with encoding: {}",
                used.name()
            )));
        }
    }

    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_from_content_type() {
        let body = b"<html><head><title>Test</title></head></html>";
        let encoding = detect_encoding("text/html; charset=utf-8", body);
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn encoding_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";
        // ISO-8859-1 is mapped to windows-1252 by the WHATWG encoding standard
        let encoding = detect_encoding("text/html", body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn encoding_from_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head></html>";
        let encoding = detect_encoding("text/html", body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn latin1_body_is_decoded() {
        // "Grêmio" in windows-1252
        let body = b"Gr\xeamio";
        let decoded = decode(body, encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(decoded, "Grêmio");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let body = b"Gol aos 47\xff minutos";
        let decoded = decode(body, encoding_rs::UTF_8).unwrap();
        assert!(decoded.starts_with("Gol aos 47"));
        assert!(decoded.contains('\u{FFFD}'));
    }
}

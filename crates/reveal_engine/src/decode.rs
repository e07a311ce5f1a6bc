use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode page with {encoding}")]
    Malformed { encoding: String },
}

/// Decodes page bytes into UTF-8: BOM -> `<meta charset>` -> chardetng guess.
pub fn decode_page(bytes: &[u8]) -> Result<DecodedPage, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = meta_charset(bytes).and_then(|label| Encoding::for_label(label.as_bytes())) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

/// Looks for `charset=` in the first 1024 bytes, the window browsers prescan.
fn meta_charset(bytes: &[u8]) -> Option<String> {
    let window = &bytes[..bytes.len().min(1024)];
    let head = String::from_utf8_lossy(window).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    (!label.is_empty()).then_some(label)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedPage, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedPage {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_charset_wins_over_detection() {
        let bytes = b"<html><head><meta charset=\"windows-1252\"></head><body>caf\xe9</body></html>";
        let page = decode_page(bytes).unwrap();
        assert_eq!(page.encoding_label, "windows-1252");
        assert!(page.html.contains("caf\u{e9}"));
    }

    #[test]
    fn plain_utf8_decodes() {
        let page = decode_page("<p>\u{2014}</p>".as_bytes()).unwrap();
        assert_eq!(page.encoding_label, "UTF-8");
    }

    #[test]
    fn invalid_utf8_under_a_utf8_label_fails() {
        let bytes = b"<meta charset=utf-8><p>\xff</p>";
        assert!(decode_page(bytes).is_err());
    }
}

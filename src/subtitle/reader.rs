use std::path::Path;

use crate::error::EmotionArcError;

pub fn read_document(path: &Path) -> Result<String, EmotionArcError> {
    let bytes = std::fs::read(path).map_err(|e| EmotionArcError::io("read subtitle file", e))?;
    Ok(decode_document(bytes))
}

/// Decodes subtitle bytes as UTF-8, falling back to Latin-1 when the bytes are
/// not valid UTF-8. Latin-1 maps every byte to a code point, so this never fails.
pub fn decode_document(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                valid_up_to = err.utf8_error().valid_up_to(),
                "subtitle: invalid UTF-8, decoding as Latin-1"
            );
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passes_through() {
        let text = "1\n00:00:01,000 --> 00:00:02,000\nCafé\n";
        assert_eq!(decode_document(text.as_bytes().to_vec()), text);
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        // "Caf\xe9" is "Café" in Latin-1 and invalid as UTF-8.
        let decoded = decode_document(vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(decoded, "Café");
    }

    #[test]
    fn read_document_reports_missing_file() {
        let result = read_document(Path::new("/nonexistent/movie.srt"));
        assert!(matches!(result, Err(EmotionArcError::Io { .. })));
    }
}

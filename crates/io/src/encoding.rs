// Text encoding detection for loaded files

use std::fmt;

use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};

use crate::error::IoError;

/// The encoding a file was decoded with, recorded for the status line.
/// Saves always write UTF-8; this only remembers what was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Windows1252,
}

impl SourceEncoding {
    pub fn label(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "UTF-8",
            SourceEncoding::Utf16Le => "UTF-16 LE",
            SourceEncoding::Utf16Be => "UTF-16 BE",
            SourceEncoding::Windows1252 => "Windows-1252",
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decodes raw file bytes into text.
///
/// Byte-order marks win (UTF-8, UTF-16 LE, UTF-16 BE), then strict
/// UTF-8, then Windows-1252 as the catch-all for Excel-exported files.
/// The fallback accepts every byte sequence, so decoding fails only for
/// a UTF-16 stream that does not decode cleanly or for data that looks
/// binary: invalid UTF-8 containing NUL bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<(String, SourceEncoding), IoError> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return match std::str::from_utf8(rest) {
            Ok(text) => Ok((text.to_string(), SourceEncoding::Utf8)),
            Err(_) => Err(IoError::Decode(
                "invalid UTF-8 after UTF-8 byte-order mark".to_string(),
            )),
        };
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        let (text, had_errors) = UTF_16LE.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(IoError::Decode("malformed UTF-16 LE stream".to_string()));
        }
        return Ok((text.into_owned(), SourceEncoding::Utf16Le));
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let (text, had_errors) = UTF_16BE.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(IoError::Decode("malformed UTF-16 BE stream".to_string()));
        }
        return Ok((text.into_owned(), SourceEncoding::Utf16Be));
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((text.to_string(), SourceEncoding::Utf8)),
        Err(_) => {
            if bytes.contains(&0) {
                return Err(IoError::Decode(
                    "content is not text in any supported encoding".to_string(),
                ));
            }
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            Ok((text.into_owned(), SourceEncoding::Windows1252))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        let (text, encoding) = decode_bytes("a,b\n".as_bytes()).unwrap();
        assert_eq!(text, "a,b\n");
        assert_eq!(encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("x,y".as_bytes());
        let (text, encoding) = decode_bytes(&bytes).unwrap();
        assert_eq!(text, "x,y");
        assert_eq!(encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_utf16_le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "a,b".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, encoding) = decode_bytes(&bytes).unwrap();
        assert_eq!(text, "a,b");
        assert_eq!(encoding, SourceEncoding::Utf16Le);
    }

    #[test]
    fn test_utf16_be_bom() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "a,b".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let (text, encoding) = decode_bytes(&bytes).unwrap();
        assert_eq!(text, "a,b");
        assert_eq!(encoding, SourceEncoding::Utf16Be);
    }

    #[test]
    fn test_truncated_utf16_fails() {
        // Odd payload length leaves a dangling byte.
        let bytes = vec![0xFF, 0xFE, 0x61];
        assert!(matches!(decode_bytes(&bytes), Err(IoError::Decode(_))));
    }

    #[test]
    fn test_windows_1252_fallback() {
        let bytes = b"Caf\xE9".to_vec();
        let (text, encoding) = decode_bytes(&bytes).unwrap();
        assert_eq!(text, "Café");
        assert_eq!(encoding, SourceEncoding::Windows1252);
    }

    #[test]
    fn test_binary_content_fails() {
        let bytes = vec![0xFF, 0x00, 0x01, 0xFE];
        assert!(matches!(decode_bytes(&bytes), Err(IoError::Decode(_))));
    }

    #[test]
    fn test_labels() {
        assert_eq!(SourceEncoding::Utf8.to_string(), "UTF-8");
        assert_eq!(SourceEncoding::Windows1252.label(), "Windows-1252");
    }
}

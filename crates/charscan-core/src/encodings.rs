//! 受支持的文本编码与严格解码
//!
//! 只支持固定的短列表；任何非法字节序列都是致命错误，不做替换字符兜底。
use encoding_rs::{DecoderResult, Encoding, UTF_8, WINDOWS_1252};
use std::fmt;

/// 受支持的编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Windows1252,
    Latin1,
    Ascii,
}

/// 自动探测时依次尝试的候选编码（标签, 编码）
pub const CANDIDATE_ENCODINGS: [(&str, TextEncoding); 5] = [
    ("utf-8", TextEncoding::Utf8),
    ("windows-1252", TextEncoding::Windows1252),
    ("latin-1", TextEncoding::Latin1),
    ("iso-8859-1", TextEncoding::Latin1),
    ("ascii", TextEncoding::Ascii),
];

/// Windows-1252 中未定义的字节
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// 解码失败详情
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub encoding: String,
    pub position: usize,
    pub byte: u8,
    pub reason: &'static str,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' codec can't decode byte {:#04x} in position {}: {}",
            self.encoding, self.byte, self.position, self.reason
        )
    }
}

impl std::error::Error for DecodeError {}

impl TextEncoding {
    /// 解析编码标签（大小写不敏感，`_` 视为 `-`）；不支持的标签返回 None
    pub fn from_label(label: &str) -> Option<Self> {
        let norm = label.trim().to_ascii_lowercase().replace('_', "-");
        match norm.as_str() {
            "utf-8" | "utf8" | "u8" => Some(TextEncoding::Utf8),
            "windows-1252" | "cp1252" => Some(TextEncoding::Windows1252),
            "latin-1" | "latin1" | "l1" | "iso-8859-1" | "iso8859-1" | "8859" => Some(TextEncoding::Latin1),
            "ascii" | "us-ascii" | "646" => Some(TextEncoding::Ascii),
            _ => None,
        }
    }

    /// 严格解码整段字节；`label` 仅用于错误信息
    pub fn decode(self, bytes: &[u8], label: &str) -> Result<String, DecodeError> {
        match self {
            TextEncoding::Utf8 => decode_strict(UTF_8, bytes, label),
            TextEncoding::Windows1252 => {
                if let Some(pos) = bytes.iter().position(|b| WINDOWS_1252_UNDEFINED.contains(b)) {
                    return Err(DecodeError {
                        encoding: label.to_string(),
                        position: pos,
                        byte: bytes[pos],
                        reason: "character maps to <undefined>",
                    });
                }
                decode_strict(WINDOWS_1252, bytes, label)
            }
            // 每个字节即同值码点，不会失败
            TextEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
            TextEncoding::Ascii => {
                let valid = Encoding::ascii_valid_up_to(bytes);
                if valid < bytes.len() {
                    return Err(DecodeError {
                        encoding: label.to_string(),
                        position: valid,
                        byte: bytes[valid],
                        reason: "ordinal not in range(128)",
                    });
                }
                Ok(bytes.iter().map(|&b| b as char).collect())
            }
        }
    }
}

/// 基于 encoding_rs 的无替换解码；不处理 BOM（U+FEFF 作为普通字符保留）
fn decode_strict(encoding: &'static Encoding, bytes: &[u8], label: &str) -> Result<String, DecodeError> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut out = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .unwrap_or(bytes.len()),
    );
    let mut consumed = 0usize;

    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(&bytes[consumed..], &mut out, true);
        consumed += read;
        match result {
            DecoderResult::InputEmpty => return Ok(out),
            DecoderResult::OutputFull => {
                let remaining = bytes.len() - consumed;
                let extra = decoder
                    .max_utf8_buffer_length_without_replacement(remaining)
                    .unwrap_or(remaining.saturating_mul(3));
                out.reserve(extra.max(16));
            }
            DecoderResult::Malformed(bad, extra) => {
                let position = consumed.saturating_sub(bad as usize + extra as usize);
                return Err(DecodeError {
                    encoding: label.to_string(),
                    position,
                    byte: bytes.get(position).copied().unwrap_or_default(),
                    reason: "invalid byte sequence",
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_normalized() {
        assert_eq!(TextEncoding::from_label("UTF-8"), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_label("utf_8"), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_label("CP1252"), Some(TextEncoding::Windows1252));
        assert_eq!(TextEncoding::from_label("ISO-8859-1"), Some(TextEncoding::Latin1));
        assert_eq!(TextEncoding::from_label("latin_1"), Some(TextEncoding::Latin1));
        assert_eq!(TextEncoding::from_label("US-ASCII"), Some(TextEncoding::Ascii));
        assert_eq!(TextEncoding::from_label("shift_jis"), None);
        assert_eq!(TextEncoding::from_label(""), None);
    }

    #[test]
    fn candidates_keep_their_order() {
        let labels: Vec<&str> = CANDIDATE_ENCODINGS.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["utf-8", "windows-1252", "latin-1", "iso-8859-1", "ascii"]);
        for (label, enc) in &CANDIDATE_ENCODINGS {
            assert_eq!(TextEncoding::from_label(label), Some(*enc));
        }
    }

    #[test]
    fn utf8_rejects_invalid_start_byte() {
        let err = TextEncoding::Utf8.decode(b"ok\xff", "utf-8").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.byte, 0xff);
        assert_eq!(err.encoding, "utf-8");
        assert!(err.to_string().contains("can't decode byte 0xff in position 2"));
    }

    #[test]
    fn utf8_keeps_bom_as_character() {
        let text = TextEncoding::Utf8.decode(b"\xef\xbb\xbfhi", "utf-8").unwrap();
        assert_eq!(text, "\u{feff}hi");
    }

    #[test]
    fn utf8_decodes_multibyte() {
        let text = TextEncoding::Utf8.decode("Café — ™".as_bytes(), "utf-8").unwrap();
        assert_eq!(text, "Café — ™");
    }

    #[test]
    fn windows_1252_maps_punctuation() {
        let text = TextEncoding::Windows1252.decode(b"\x95 \x96 \x97 \x99 \xa9", "windows-1252").unwrap();
        assert_eq!(text, "• – — ™ ©");
    }

    #[test]
    fn windows_1252_rejects_undefined_bytes() {
        for b in WINDOWS_1252_UNDEFINED {
            let err = TextEncoding::Windows1252.decode(&[b'a', b], "windows-1252").unwrap_err();
            assert_eq!(err.position, 1);
            assert_eq!(err.byte, b);
        }
    }

    #[test]
    fn latin1_never_fails() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let text = TextEncoding::Latin1.decode(&bytes, "latin-1").unwrap();
        assert_eq!(text.chars().count(), 256);
        assert!(text.chars().zip(0u32..).all(|(c, i)| c as u32 == i));
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        assert_eq!(TextEncoding::Ascii.decode(b"plain", "ascii").unwrap(), "plain");
        let err = TextEncoding::Ascii.decode(b"ab\x80", "ascii").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.byte, 0x80);
        let err = TextEncoding::Ascii.decode(b"\xe9", "ascii").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(TextEncoding::Ascii.decode(b"", "ascii").unwrap(), "");
    }
}

//! Encoding-tolerant whole-file reads and writes.
//!
//! Sector files come from several authoring tools, so their text may be GBK,
//! GB18030, UTF-8 or plain Latin-1. Detection walks an ordered candidate list
//! and picks the first encoding that decodes the entire buffer losslessly.
//! Writes always go back out in the encoding the file was read with.
//!
//! Notes:
//! - `gb2312` is a WHATWG label for GBK, so both candidates share a codec; the
//!   entry is kept so the trial order stays gbk, gb2312, gb18030, utf-8, latin-1.
//! - `latin-1` maps to windows-1252, which decodes every byte and re-encodes
//!   each decoded character to the byte it came from.
//! - The GBK decoder in encoding_rs also accepts GB18030 four-byte sequences.
//!   Those cannot be written back as GBK, so a GBK-family candidate only counts
//!   when the decoded text re-encodes cleanly.

use encoding_rs::Encoding;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::SectorError;
use crate::fs_ops::io_error_with_help;

/// Candidate text encodings for sector files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorEncoding {
    Gbk,
    Gb2312,
    Gb18030,
    Utf8,
    Latin1,
}

/// Trial order used when no other list is configured.
pub const DEFAULT_CANDIDATES: [SectorEncoding; 5] = [
    SectorEncoding::Gbk,
    SectorEncoding::Gb2312,
    SectorEncoding::Gb18030,
    SectorEncoding::Utf8,
    SectorEncoding::Latin1,
];

impl SectorEncoding {
    pub fn name(self) -> &'static str {
        match self {
            SectorEncoding::Gbk => "gbk",
            SectorEncoding::Gb2312 => "gb2312",
            SectorEncoding::Gb18030 => "gb18030",
            SectorEncoding::Utf8 => "utf-8",
            SectorEncoding::Latin1 => "latin-1",
        }
    }

    fn codec(self) -> &'static Encoding {
        match self {
            SectorEncoding::Gbk | SectorEncoding::Gb2312 => encoding_rs::GBK,
            SectorEncoding::Gb18030 => encoding_rs::GB18030,
            SectorEncoding::Utf8 => encoding_rs::UTF_8,
            SectorEncoding::Latin1 => encoding_rs::WINDOWS_1252,
        }
    }

    /// Strict decode: `None` on any malformed sequence or lossy GBK round trip.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        let text = self
            .codec()
            .decode_without_bom_handling_and_without_replacement(bytes)?;
        if matches!(self, SectorEncoding::Gbk | SectorEncoding::Gb2312) {
            let (_, _, unmappable) = self.codec().encode(&text);
            if unmappable {
                return None;
            }
        }
        Some(text)
    }

    /// Encode `text`; `None` if any character has no representation.
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        let (bytes, _, unmappable) = self.codec().encode(text);
        if unmappable {
            None
        } else {
            Some(bytes.into_owned())
        }
    }
}

impl fmt::Display for SectorEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of encoding detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// A candidate decoded the whole buffer.
    Detected(SectorEncoding),
    /// Nothing decoded; this is the first candidate, used as a best guess.
    Fallback(SectorEncoding),
}

impl Detection {
    pub fn encoding(self) -> SectorEncoding {
        match self {
            Detection::Detected(e) | Detection::Fallback(e) => e,
        }
    }
}

/// Pick the first candidate that decodes `bytes` without error.
/// An empty candidate list falls back to GBK.
pub fn detect(bytes: &[u8], candidates: &[SectorEncoding]) -> Detection {
    candidates
        .iter()
        .copied()
        .find(|enc| enc.decode(bytes).is_some())
        .map(Detection::Detected)
        .unwrap_or_else(|| {
            Detection::Fallback(candidates.first().copied().unwrap_or(SectorEncoding::Gbk))
        })
}

/// Decoded file contents together with the encoding used to read them.
#[derive(Debug, Clone)]
pub struct SectorText {
    pub text: String,
    pub encoding: SectorEncoding,
    pub detection: Detection,
}

/// Read a whole file and decode it with the detected encoding.
pub fn read_text(path: &Path, candidates: &[SectorEncoding]) -> anyhow::Result<SectorText> {
    let bytes = fs::read(path).map_err(io_error_with_help("read file", path))?;
    let detection = detect(&bytes, candidates);
    let encoding = detection.encoding();
    let text = encoding
        .decode(&bytes)
        .ok_or_else(|| SectorError::Undecodable {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?
        .into_owned();
    Ok(SectorText {
        text,
        encoding,
        detection,
    })
}

/// Encode `text` with `encoding` and replace the file contents.
/// Nothing is written if the text cannot be represented.
pub fn write_text(path: &Path, text: &str, encoding: SectorEncoding) -> anyhow::Result<()> {
    let bytes = encoding.encode(text).ok_or_else(|| SectorError::Unencodable {
        path: path.to_path_buf(),
        encoding: encoding.name(),
    })?;
    fs::write(path, bytes).map_err(io_error_with_help("write file", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_detected_as_first_candidate() {
        let d = detect(b"[INFO]\nplain ascii\n", &DEFAULT_CANDIDATES);
        assert_eq!(d, Detection::Detected(SectorEncoding::Gbk));
    }

    #[test]
    fn gbk_chinese_round_trips() {
        let text = "北京区域 扇区\n";
        let bytes = SectorEncoding::Gbk.encode(text).unwrap();
        let d = detect(&bytes, &DEFAULT_CANDIDATES);
        assert_eq!(d.encoding(), SectorEncoding::Gbk);
        assert_eq!(d.encoding().decode(&bytes).unwrap(), text);
    }

    #[test]
    fn four_byte_gb18030_is_not_taken_for_gbk() {
        // U+1F600 only exists in GB18030 (four-byte form).
        let text = "sector \u{1F600}\n";
        let bytes = SectorEncoding::Gb18030.encode(text).unwrap();
        let d = detect(&bytes, &DEFAULT_CANDIDATES);
        assert_eq!(d, Detection::Detected(SectorEncoding::Gb18030));
        assert_eq!(d.encoding().decode(&bytes).unwrap(), text);
    }

    #[test]
    fn latin1_bytes_fall_through_to_latin1() {
        let bytes = b"caf\xe9\n";
        let d = detect(bytes, &DEFAULT_CANDIDATES);
        assert_eq!(d, Detection::Detected(SectorEncoding::Latin1));
        let text = d.encoding().decode(bytes).unwrap();
        assert_eq!(text, "caf\u{e9}\n");
        assert_eq!(SectorEncoding::Latin1.encode(&text).unwrap(), bytes.to_vec());
    }

    #[test]
    fn undecodable_input_reports_fallback() {
        let d = detect(b"\xff\xfe\xfd", &[SectorEncoding::Gbk, SectorEncoding::Utf8]);
        assert_eq!(d, Detection::Fallback(SectorEncoding::Gbk));
    }

    #[test]
    fn encode_refuses_unmappable_text() {
        assert!(SectorEncoding::Latin1.encode("区").is_none());
        assert!(SectorEncoding::Gbk.encode("\u{1F600}").is_none());
    }
}

//! Copy formats
//!
//! Every format is a pure function of the record's code points. Code points
//! that are not valid hexadecimal are skipped by the numeric formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::EmojiRecord;

/// How an emoji is rendered when copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CopyFormat {
    #[default]
    Emoji,
    UnicodeCodePoint,
    UnicodeDecimal,
    HTMLHexadecimal,
    HTMLDecimal,
    JavaUTF16Escape,
    JavaInt,
}

impl CopyFormat {
    pub const ALL: [CopyFormat; 7] = [
        CopyFormat::Emoji,
        CopyFormat::UnicodeCodePoint,
        CopyFormat::UnicodeDecimal,
        CopyFormat::HTMLHexadecimal,
        CopyFormat::HTMLDecimal,
        CopyFormat::JavaUTF16Escape,
        CopyFormat::JavaInt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyFormat::Emoji => "Emoji",
            CopyFormat::UnicodeCodePoint => "UnicodeCodePoint",
            CopyFormat::UnicodeDecimal => "UnicodeDecimal",
            CopyFormat::HTMLHexadecimal => "HTMLHexadecimal",
            CopyFormat::HTMLDecimal => "HTMLDecimal",
            CopyFormat::JavaUTF16Escape => "JavaUTF16Escape",
            CopyFormat::JavaInt => "JavaInt",
        }
    }

    /// Label for a format picker
    pub fn label(&self) -> &'static str {
        match self {
            CopyFormat::Emoji => "Emoji",
            CopyFormat::UnicodeCodePoint => "Unicode code point",
            CopyFormat::UnicodeDecimal => "Unicode decimal",
            CopyFormat::HTMLHexadecimal => "HTML hexadecimal",
            CopyFormat::HTMLDecimal => "HTML decimal",
            CopyFormat::JavaUTF16Escape => "Java UTF-16 escape",
            CopyFormat::JavaInt => "Java int",
        }
    }

    /// Sample output for 😊 (U+1F60A)
    pub fn example(&self) -> &'static str {
        match self {
            CopyFormat::Emoji => "\u{1F60A}",
            CopyFormat::UnicodeCodePoint => "U+1F60A",
            CopyFormat::UnicodeDecimal => "128522",
            CopyFormat::HTMLHexadecimal => "&#x1F60A;",
            CopyFormat::HTMLDecimal => "&#128522;",
            CopyFormat::JavaUTF16Escape => "\\ud83d\\ude0a",
            CopyFormat::JavaInt => "0x1F60A",
        }
    }
}

impl fmt::Display for CopyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopyFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CopyFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| format!("unknown copy format: {}", s))
    }
}

fn parse_code(code: &str) -> Option<u32> {
    u32::from_str_radix(code, 16).ok()
}

/// `\uXXXX` escapes of the UTF-16 encoding, lower-case hex
fn java_escape(code_point: u32) -> String {
    if code_point < 0x10000 {
        return format!("\\u{:04x}", code_point);
    }
    let offset = code_point - 0x10000;
    let high = (offset >> 10) + 0xD800;
    let low = (offset & 0x3FF) + 0xDC00;
    format!("\\u{:x}\\u{:x}", high, low)
}

/// Render a record in the chosen format
pub fn format_copy(record: &EmojiRecord, format: CopyFormat) -> String {
    format_code_points(&record.glyph, &record.code, format)
}

/// Render a glyph with its hexadecimal code points. Multiple code points
/// are joined by a single space.
pub fn format_code_points(glyph: &str, code: &[String], format: CopyFormat) -> String {
    let numeric = || code.iter().filter_map(|c| parse_code(c));
    let parts: Vec<String> = match format {
        CopyFormat::Emoji => return glyph.to_string(),
        CopyFormat::UnicodeCodePoint => code.iter().map(|c| format!("U+{}", c)).collect(),
        CopyFormat::HTMLHexadecimal => code.iter().map(|c| format!("&#x{};", c)).collect(),
        CopyFormat::JavaInt => code.iter().map(|c| format!("0x{}", c)).collect(),
        CopyFormat::UnicodeDecimal => numeric().map(|n| n.to_string()).collect(),
        CopyFormat::HTMLDecimal => numeric().map(|n| format!("&#{};", n)).collect(),
        CopyFormat::JavaUTF16Escape => numeric().map(java_escape).collect(),
    };
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_single_code_point() {
        let code = codes(&["1F60A"]);
        for format in CopyFormat::ALL {
            assert_eq!(
                format_code_points("\u{1F60A}", &code, format),
                format.example(),
                "{format}"
            );
        }
    }

    #[test]
    fn test_multiple_code_points() {
        let code = codes(&["1F44D", "1F3FD"]);
        let glyph = "\u{1F44D}\u{1F3FD}";
        assert_eq!(
            format_code_points(glyph, &code, CopyFormat::UnicodeCodePoint),
            "U+1F44D U+1F3FD"
        );
        assert_eq!(
            format_code_points(glyph, &code, CopyFormat::HTMLDecimal),
            "&#128077; &#127997;"
        );
        assert_eq!(
            format_code_points(glyph, &code, CopyFormat::JavaUTF16Escape),
            "\\ud83d\\udc4d \\ud83c\\udffd"
        );
    }

    #[test]
    fn test_bmp_java_escape() {
        let code = codes(&["263A", "FE0F"]);
        assert_eq!(
            format_code_points("\u{263A}\u{FE0F}", &code, CopyFormat::JavaUTF16Escape),
            "\\u263a \\ufe0f"
        );
        assert_eq!(
            format_code_points("\u{263A}\u{FE0F}", &code, CopyFormat::UnicodeDecimal),
            "9786 65039"
        );
    }

    #[test]
    fn test_invalid_hex_skipped_in_numeric_formats() {
        let code = codes(&["1F600", "XYZ"]);
        assert_eq!(format_code_points("x", &code, CopyFormat::UnicodeDecimal), "128512");
        assert_eq!(format_code_points("x", &code, CopyFormat::JavaInt), "0x1F600 0xXYZ");
    }

    #[test]
    fn test_format_names_roundtrip() {
        for format in CopyFormat::ALL {
            assert_eq!(format.as_str().parse::<CopyFormat>(), Ok(format));
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format.as_str()));
        }
        assert!("Base64".parse::<CopyFormat>().is_err());
    }
}

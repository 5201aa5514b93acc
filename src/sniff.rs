//! Content-type sniffing on the leading bytes of a file
//!
//! Checks, in order:
//! - HTML / XML markup after leading whitespace
//! - Magic numbers of common binary and document formats
//! - Byte-order marks and plain text
//!
//! Anything else is reported as `application/octet-stream`.

/// Maximum number of leading bytes considered
pub const SNIFF_LEN: usize = 512;

const OCTET_STREAM: &str = "application/octet-stream";
const TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// HTML tags recognised at the start of a document (compared case-insensitively)
const HTML_TAGS: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// Magic number made of one or more byte runs at fixed offsets
struct Signature {
    parts: &'static [(usize, &'static [u8])],
    content_type: &'static str,
}

impl Signature {
    #[inline]
    fn matches(&self, data: &[u8]) -> bool {
        self.parts.iter().all(|&(offset, magic)| {
            data.get(offset..offset + magic.len())
                .is_some_and(|window| window == magic)
        })
    }
}

const SIGNATURES: &[Signature] = &[
    Signature {
        parts: &[(0, b"%PDF-")],
        content_type: "application/pdf",
    },
    Signature {
        parts: &[(0, b"%!PS-Adobe-")],
        content_type: "application/postscript",
    },
    Signature {
        parts: &[(0, b"\xFE\xFF")],
        content_type: "text/plain; charset=utf-16be",
    },
    Signature {
        parts: &[(0, b"\xFF\xFE")],
        content_type: "text/plain; charset=utf-16le",
    },
    Signature {
        parts: &[(0, b"\xEF\xBB\xBF")],
        content_type: TEXT_UTF8,
    },
    Signature {
        parts: &[(0, b"OggS\x00")],
        content_type: "application/ogg",
    },
    Signature {
        parts: &[(0, b"RIFF"), (8, b"WAVE")],
        content_type: "audio/wave",
    },
    Signature {
        parts: &[(0, b"RIFF"), (8, b"AVI ")],
        content_type: "video/avi",
    },
    Signature {
        parts: &[(0, b"RIFF"), (8, b"WEBPVP")],
        content_type: "image/webp",
    },
    Signature {
        parts: &[(0, b"GIF87a")],
        content_type: "image/gif",
    },
    Signature {
        parts: &[(0, b"GIF89a")],
        content_type: "image/gif",
    },
    Signature {
        parts: &[(0, b"\x89PNG\r\n\x1A\n")],
        content_type: "image/png",
    },
    Signature {
        parts: &[(0, b"\xFF\xD8\xFF")],
        content_type: "image/jpeg",
    },
    Signature {
        parts: &[(0, b"BM")],
        content_type: "image/bmp",
    },
    Signature {
        parts: &[(0, b"\x00\x00\x01\x00")],
        content_type: "image/x-icon",
    },
    Signature {
        parts: &[(0, b"\x00\x00\x02\x00")],
        content_type: "image/x-icon",
    },
    Signature {
        parts: &[(0, b"ID3")],
        content_type: "audio/mpeg",
    },
    Signature {
        parts: &[(0, b"PK\x03\x04")],
        content_type: "application/zip",
    },
    Signature {
        parts: &[(0, b"\x1F\x8B\x08")],
        content_type: "application/x-gzip",
    },
    Signature {
        parts: &[(0, b"Rar!\x1A\x07\x00")],
        content_type: "application/x-rar-compressed",
    },
    Signature {
        parts: &[(0, b"Rar!\x1A\x07\x01\x00")],
        content_type: "application/x-rar-compressed",
    },
    Signature {
        parts: &[(0, b"7z\xBC\xAF\x27\x1C")],
        content_type: "application/x-7z-compressed",
    },
    Signature {
        parts: &[(0, b"\x00asm")],
        content_type: "application/wasm",
    },
    Signature {
        parts: &[(0, b"\x7FELF")],
        content_type: "application/x-elf",
    },
];

#[inline]
fn is_sniff_whitespace(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | 0x0C | b'\r' | b' ')
}

/// Control bytes that never appear in text
#[inline]
fn is_binary_byte(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

fn sniff_markup(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"<?xml") {
        return Some("text/xml; charset=utf-8");
    }

    HTML_TAGS
        .iter()
        .any(|tag| {
            data.len() > tag.len()
                && data[..tag.len()].eq_ignore_ascii_case(tag)
                && matches!(data[tag.len()], b' ' | b'>')
        })
        .then_some("text/html; charset=utf-8")
}

/// Guess the MIME type of `data` from at most its first [`SNIFF_LEN`] bytes
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let window = &data[..data.len().min(SNIFF_LEN)];

    let start = window
        .iter()
        .position(|&b| !is_sniff_whitespace(b))
        .unwrap_or(window.len());
    if let Some(content_type) = sniff_markup(&window[start..]) {
        return content_type;
    }

    if let Some(signature) = SIGNATURES.iter().find(|sig| sig.matches(window)) {
        return signature.content_type;
    }

    if window.iter().any(|&b| is_binary_byte(b)) {
        OCTET_STREAM
    } else {
        TEXT_UTF8
    }
}

//! Upload decoding: extension screening, charset fallback, MIME mail bodies

use crate::error::{ExtractError, Result};
use tracing::{debug, warn};

/// Extensions accepted for upload (any text-based format)
const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "csv", "json", "html", "htm", "xml", "log", "md", "js", "py", "php", "sql", "yaml",
    "yml", "ini", "cfg", "conf", "tsv", "rtf", "tex", "sh", "bat", "ps1", "eml",
];

/// Check whether a filename's extension is accepted
///
/// Files without an extension are allowed.
#[must_use]
pub fn is_allowed_filename(filename: &str) -> bool {
    extension_of(filename).is_none_or(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Decode upload bytes into text suitable for extraction
///
/// Rejects disallowed extensions. `.eml` uploads are parsed as MIME mail and
/// reduced to their address-bearing headers plus text bodies; everything else
/// goes through the charset fallback chain.
pub fn text_from_upload(filename: &str, bytes: &[u8]) -> Result<String> {
    match extension_of(filename) {
        Some(ext) if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {
            Err(ExtractError::UnsupportedFile(ext))
        }
        Some(ext) if ext == "eml" => Ok(text_from_mail(bytes)),
        _ => Ok(decode_bytes(bytes)),
    }
}

/// Decode bytes as UTF-8, falling back to Windows-1252
///
/// Windows-1252 maps every byte value, so decoding never fails; this covers
/// the latin-1 and cp1252 inputs seen in practice.
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> String {
    std::str::from_utf8(bytes).map_or_else(
        |_| {
            debug!("Upload is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text.into_owned()
        },
        str::to_string,
    )
}

/// Reduce a MIME mail to searchable text: headers that carry addresses,
/// then every text part of the body
fn text_from_mail(bytes: &[u8]) -> String {
    let Ok(parsed) = mailparse::parse_mail(bytes) else {
        warn!("Failed to parse .eml upload as MIME, falling back to raw decode");
        return decode_bytes(bytes);
    };

    let mut text = String::new();

    for header in &parsed.headers {
        let key = header.get_key().to_lowercase();
        if matches!(key.as_str(), "from" | "to" | "cc" | "bcc" | "reply-to") {
            text.push_str(&header.get_value());
            text.push('\n');
        }
    }

    collect_text_parts(&parsed, &mut text);

    if text.trim().is_empty() {
        decode_bytes(bytes)
    } else {
        text
    }
}

fn collect_text_parts(parsed: &mailparse::ParsedMail, text: &mut String) {
    if parsed.subparts.is_empty() {
        if parsed.ctype.mimetype.to_lowercase().starts_with("text/")
            && let Ok(body) = parsed.get_body()
        {
            text.push_str(&body);
            text.push('\n');
        }
    } else {
        for part in &parsed.subparts {
            collect_text_parts(part, text);
        }
    }
}

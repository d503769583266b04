//! CSV materialization of extracted addresses

use crate::extractor::company_for;

const HEADER: &str = "Email,Company/Domain";

/// Render an ordered email list as a CSV document
///
/// One row per address with its inferred company, preceded by a header row.
#[must_use]
pub fn csv_document(emails: &[String]) -> String {
    let mut out = String::from(HEADER);
    out.push_str("\r\n");

    for email in emails {
        out.push_str(&escape_field(email));
        out.push(',');
        out.push_str(&escape_field(&company_for(email)));
        out.push_str("\r\n");
    }

    out
}

/// Quote a field per RFC 4180 when it contains a delimiter, quote or newline
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

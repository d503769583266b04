use email_harvest::*;

#[test]
fn test_allowed_extensions() {
    assert!(is_allowed_filename("notes.txt"));
    assert!(is_allowed_filename("dump.SQL"));
    assert!(is_allowed_filename("mail.eml"));
    assert!(!is_allowed_filename("photo.png"));
    assert!(!is_allowed_filename("archive.zip"));
}

#[test]
fn test_extensionless_files_allowed() {
    assert!(is_allowed_filename("README"));
    assert!(is_allowed_filename("Makefile"));
}

#[test]
fn test_decode_utf8() {
    assert_eq!(decode_bytes("héllo à tous".as_bytes()), "héllo à tous");
}

#[test]
fn test_decode_windows_1252_fallback() {
    // 0xE9 is é in Windows-1252 but invalid as a standalone UTF-8 byte
    let bytes = b"caf\xe9@bistro.fr";
    assert_eq!(decode_bytes(bytes), "café@bistro.fr");
}

#[test]
fn test_upload_rejects_binary_extension() {
    let err = text_from_upload("image.png", b"x").unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedFile(ext) if ext == "png"));
}

#[test]
fn test_upload_decodes_plain_text() {
    let text = text_from_upload("list.txt", b"a@x.com b@y.com").unwrap();
    assert_eq!(text, "a@x.com b@y.com");
}

#[test]
fn test_eml_upload_harvests_headers_and_body() {
    let raw = b"From: Alice <alice@corp.io>\r\n\
                To: bob@client.net\r\n\
                Subject: Intro\r\n\
                \r\n\
                Please loop in carol@corp.io.\r\n";

    let text = text_from_upload("intro.eml", raw).unwrap();
    let emails = extract_emails(&text);
    assert_eq!(
        emails,
        vec!["alice@corp.io", "bob@client.net", "carol@corp.io"]
    );
}

#[test]
fn test_eml_multipart_body() {
    let raw = b"From: sender@example.com\r\n\
                Content-Type: multipart/alternative; boundary=\"sep\"\r\n\
                \r\n\
                --sep\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                plain contact: plain@example.com\r\n\
                --sep\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <a href=\"mailto:html@example.com\">mail</a>\r\n\
                --sep--\r\n";

    let text = text_from_upload("msg.eml", raw).unwrap();
    let emails = extract_emails(&text);
    assert!(emails.contains(&"plain@example.com".to_string()));
    assert!(emails.contains(&"html@example.com".to_string()));
    assert!(emails.contains(&"sender@example.com".to_string()));
}

#[test]
fn test_malformed_eml_falls_back_to_raw_decode() {
    // No headers at all, still searchable as plain text
    let raw = b"just a line with hidden@addr.example in it";
    let text = text_from_upload("broken.eml", raw).unwrap();
    assert_eq!(extract_emails(&text), vec!["hidden@addr.example"]);
}

use email_harvest::*;

#[test]
fn test_header_row() {
    let doc = csv_document(&[]);
    assert_eq!(doc, "Email,Company/Domain\r\n");
}

#[test]
fn test_one_row_per_email() {
    let emails = vec!["a@x.com".to_string(), "b@y.org".to_string()];
    let doc = csv_document(&emails);

    let lines: Vec<&str> = doc.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Email,Company/Domain");
    assert_eq!(lines[1], "a@x.com,X");
    assert_eq!(lines[2], "b@y.org,Y");
}

#[test]
fn test_company_column_matches_inference() {
    let emails = vec!["jane@acme.co.uk".to_string()];
    let doc = csv_document(&emails);
    assert!(doc.contains("jane@acme.co.uk,Acme"));
}

#[test]
fn test_preserves_caller_order() {
    let emails = vec!["z@z.com".to_string(), "a@a.com".to_string()];
    let doc = csv_document(&emails);

    let z = doc.find("z@z.com").unwrap();
    let a = doc.find("a@a.com").unwrap();
    assert!(z < a);
}

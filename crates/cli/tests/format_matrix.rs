use json_doc_cli::{format, navigate, CliError};

const CATALOG: &[u8] = b"{\n  \"crates\": [\n    {\"name\": \"json-doc\", \"tags\": [\"json\", \"parser\"]},\n    {\"name\": \"json-doc-cli\", \"tags\": []}\n  ]\n}\n";

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

#[test]
fn pretty_is_the_default_layout() {
    let out = text(format::<&str>(CATALOG, &[], true).unwrap());
    assert!(out.starts_with("{\r\n\t\"crates\": [\r\n\t\t{\r\n\t\t\t\"name\": \"json-doc\""));
    assert!(out.ends_with("\r\n}\n"));
}

#[test]
fn compact_output_is_canonical() {
    assert_eq!(
        text(format::<&str>(CATALOG, &[], false).unwrap()),
        "{\"crates\":[{\"name\":\"json-doc\",\"tags\":[\"json\",\"parser\"]},{\"name\":\"json-doc-cli\",\"tags\":[]}]}\n"
    );
}

#[test]
fn paths_select_nodes() {
    let cases: [(&[&str], &str); 4] = [
        (&["crates", "0", "tags", "1"], "\"parser\"\n"),
        (&["crates", "1", "tags"], "[]\n"),
        (&["crates", "2"], "null\n"),
        (&["crates", "0", "name", "x"], "null\n"),
    ];
    for (path, expected) in cases {
        assert_eq!(text(format(CATALOG, path, false).unwrap()), expected, "{path:?}");
    }
}

#[test]
fn navigate_accepts_owned_segments() {
    let doc = json_doc::parse(CATALOG).unwrap();
    let path = vec!["crates".to_owned(), "1".to_owned(), "name".to_owned()];
    assert_eq!(navigate(&doc, &path).as_str(), Some("json-doc-cli"));
}

#[test]
fn invalid_input_is_reported_with_position() {
    let err = format::<&str>(b"{\"a\": [1, 2,]}", &[], true).unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
    assert_eq!(err.to_string(), "Unexpected token at (1,13)");

    let err = format::<&str>(b"  ", &[], true).unwrap_err();
    assert_eq!(err.to_string(), "Empty document");
}

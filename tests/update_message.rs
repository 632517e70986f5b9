use citibike_loader::indexing::build_add_message;
use citibike_loader::ingestion::csv::read_documents_from_path;
use citibike_loader::types::IndexDocument;

type FieldSet = Vec<(String, String)>;

fn parse_add_message(xml: &str) -> Vec<FieldSet> {
    let doc = roxmltree::Document::parse(xml).expect("well-formed update message");
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "add");

    root.children()
        .filter(|n| n.has_tag_name("doc"))
        .map(|d| {
            d.children()
                .filter(|n| n.has_tag_name("field"))
                .map(|f| {
                    (
                        f.attribute("name").unwrap_or_default().to_string(),
                        f.text().unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .collect()
}

fn field_set(doc: &IndexDocument) -> FieldSet {
    doc.fields()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn fixture_documents_survive_encoding() {
    let docs = read_documents_from_path("tests/fixtures/trips.csv").unwrap();
    let parsed = parse_add_message(&build_add_message(&docs));

    assert_eq!(parsed.len(), docs.len());
    for (got, doc) in parsed.iter().zip(&docs) {
        assert_eq!(got, &field_set(doc));
    }
}

#[test]
fn markup_characters_in_values_are_escaped() {
    let docs = read_documents_from_path("tests/fixtures/trips.csv").unwrap();
    let mut doc = docs[0].clone();
    doc.start_station_name = r#"<Pier 40> & "Hudson" 'River'"#.to_string();
    doc.user_type = String::new();

    let xml = build_add_message(std::slice::from_ref(&doc));
    assert!(xml.contains("&lt;Pier 40&gt; &amp; &quot;Hudson&quot; &apos;River&apos;"));

    let parsed = parse_add_message(&xml);
    assert_eq!(parsed, vec![field_set(&doc)]);
}

#[test]
fn empty_batch_parses_to_no_documents() {
    assert!(parse_add_message(&build_add_message(&[])).is_empty());
}

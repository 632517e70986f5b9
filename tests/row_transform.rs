use citibike_loader::LoaderError;
use citibike_loader::ingestion::csv::read_documents_from_path;
use citibike_loader::ingestion::transform_line;

const HEADER: &str = r#""tripduration","starttime","stoptime","start station id","start station name","start station latitude","start station longitude","end station id","end station name","end station latitude","end station longitude","bikeid","usertype","birth year","gender""#;
const DATA: &str = r#""634","2013-07-01 00:00:00","2013-07-01 00:10:34","1","Station A","40.0","-73.0","7","Station B","40.1","-73.1","123","Subscriber","1990","1""#;

#[test]
fn header_then_data_line_yields_one_document() {
    let docs: Vec<_> = [HEADER, DATA]
        .iter()
        .enumerate()
        .filter_map(|(i, line)| transform_line(i as u64 + 1, line).unwrap())
        .collect();

    assert_eq!(docs.len(), 1);
    let doc = &docs[0];
    assert_eq!(doc.id, "2013_07_01_00_00_00_2013_07_01_00_10_34_17");
    assert_eq!(doc.starttime, "2013-07-01T00:00:00Z");
    assert_eq!(doc.stoptime, "2013-07-01T00:10:34Z");
    assert_eq!(doc.start_location, "40.0,-73.0");
    assert_eq!(doc.end_location, "40.1,-73.1");
    assert_eq!(doc.start_station_name, "Station A");
    assert_eq!(doc.bikeid, "123");
    assert_eq!(doc.user_type, "Subscriber");
    assert_eq!(doc.birth_year, "1990");
    assert_eq!(doc.gender, "1");
}

#[test]
fn id_is_stable_and_depends_only_on_times_and_stations() {
    let a = transform_line(2, DATA).unwrap().unwrap();
    let b = transform_line(99, DATA).unwrap().unwrap();
    assert_eq!(a, b);

    // Different duration, names and bike: same id, the later document overwrites in the index.
    let other = DATA
        .replace("\"634\"", "\"700\"")
        .replace("Station A", "Elsewhere")
        .replace("\"123\"", "\"999\"");
    let c = transform_line(3, &other).unwrap().unwrap();
    assert_eq!(a.id, c.id);
    assert_ne!(a, c);

    let moved = DATA.replace("\"7\"", "\"8\"");
    let d = transform_line(4, &moved).unwrap().unwrap();
    assert_eq!(d.id, "2013_07_01_00_00_00_2013_07_01_00_10_34_18");
}

#[test]
fn quote_characters_are_stripped_from_every_field() {
    let unquoted = DATA.replace('"', "");
    let a = transform_line(2, DATA).unwrap().unwrap();
    let b = transform_line(2, &unquoted).unwrap().unwrap();
    assert_eq!(a, b);
}

#[test]
fn header_and_comment_lines_never_produce_documents() {
    assert_eq!(transform_line(1, HEADER).unwrap(), None);
    assert_eq!(transform_line(1, "\"tripduration\"").unwrap(), None);
    assert_eq!(transform_line(5, &format!("#{DATA}")).unwrap(), None);
}

#[test]
fn wrong_field_count_is_a_malformed_row() {
    let short = DATA.rsplit_once(',').unwrap().0;
    match transform_line(3, short).unwrap_err() {
        LoaderError::MalformedRow {
            line,
            expected,
            found,
        } => {
            assert_eq!(line, 3);
            assert_eq!(expected, 15);
            assert_eq!(found, 14);
        }
        other => panic!("unexpected error: {other}"),
    }

    // A comma inside a quoted name is not special: the row splits into 16 fields.
    let with_comma = DATA.replace("Station A", "Station A, North");
    let err = transform_line(3, &with_comma).unwrap_err();
    assert!(err.to_string().contains("found 16"));
}

#[test]
fn fixture_file_reads_all_trips() {
    let docs = read_documents_from_path("tests/fixtures/trips.csv").unwrap();
    assert_eq!(docs.len(), 4);
    assert_eq!(docs[0].id, "2013_07_01_00_00_00_2013_07_01_00_10_34_164504");
    assert_eq!(docs[0].birth_year, "-1");
    assert_eq!(docs[2].birth_year, "1980");
    assert_eq!(docs[2].start_station_name, "Lafayette St & E 8 St");
    assert_eq!(docs[3].end_location, "40.76915505,-73.98191841");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = read_documents_from_path("tests/fixtures/does_not_exist.csv").unwrap_err();
    assert!(matches!(err, LoaderError::Csv(_) | LoaderError::Io(_)));
}

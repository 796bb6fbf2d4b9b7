//! Loading traces from XML text and files.

use std::path::PathBuf;

use devscope::foundation::{ErrorKind, LoadError, TransitionKind, Value};
use devscope::trace::{LoaderConfig, TraceLoader};

const QUEUE: &str = include_str!("../fixtures/queue.xml");

// =============================================================================
// Successful Loads
// =============================================================================

#[test]
fn queue_fixture_expands_every_leaf() {
    let events = TraceLoader::new().load_str(QUEUE).unwrap();
    // Four queue records with five leaves each, one server record with one.
    assert_eq!(events.len(), 21);
    assert!(events.windows(2).all(|w| w[0].time <= w[1].time));
}

#[test]
fn nested_attributes_use_dotted_paths() {
    let events = TraceLoader::new().load_str(QUEUE).unwrap();
    let first_record: Vec<(&str, &Value)> = events
        .iter()
        .filter(|e| e.record == 0)
        .map(|e| (&*e.path, &e.value))
        .collect();

    assert_eq!(
        first_record,
        vec![
            ("length", &Value::Int(0)),
            ("open", &Value::Bool(true)),
            ("job.id", &Value::Int(1)),
            ("job.size", &Value::Float(2.5)),
            ("job.owner", &Value::from("7")),
        ]
    );
}

#[test]
fn same_time_records_keep_document_order() {
    let events = TraceLoader::new().load_str(QUEUE).unwrap();
    let at_1_5: Vec<(&str, usize)> = events
        .iter()
        .filter(|e| (e.time - 1.5).abs() < f64::EPSILON)
        .map(|e| (&*e.model, e.record))
        .collect();

    assert_eq!(at_1_5.len(), 6);
    assert!(at_1_5[..5].iter().all(|(model, record)| *model == "root.queue" && *record == 1));
    assert_eq!(at_1_5[5], ("root.server", 2));
}

#[test]
fn kinds_are_carried_per_record() {
    let events = TraceLoader::new().load_str(QUEUE).unwrap();
    let server = events.iter().find(|e| &*e.model == "root.server").unwrap();
    assert_eq!(server.kind, TransitionKind::Internal);
    let second = events.iter().find(|e| e.record == 1).unwrap();
    assert_eq!(second.kind, TransitionKind::External);
}

#[test]
fn load_path_reads_fixture_file() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/gen.xml");
    let events = TraceLoader::new().load_path(&path).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[1].value, Value::from("busy"));
}

#[test]
fn empty_trace_loads_nothing() {
    let events = TraceLoader::new().load_str("<trace/>").unwrap();
    assert!(events.is_empty());
}

// =============================================================================
// Failures
// =============================================================================

fn load_error(xml: &str) -> LoadError {
    match TraceLoader::new().load_str(xml).unwrap_err().kind {
        ErrorKind::Load(error) => error,
        other => panic!("expected load error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = TraceLoader::new()
        .load_path("/definitely/not/here.xml")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Load(LoadError::Io { .. })));
}

#[test]
fn malformed_xml_is_rejected() {
    assert!(matches!(load_error("<trace><event>"), LoadError::Xml(_)));
}

#[test]
fn missing_time_is_reported() {
    let xml = "<trace><event><model>m</model><kind>IN</kind><state/></event></trace>";
    assert_eq!(
        load_error(xml),
        LoadError::MissingField {
            record: 0,
            field: "time"
        }
    );
}

#[test]
fn unknown_kind_is_reported() {
    let xml = "<trace><event><model>m</model><kind>CONF</kind><time>1</time><state/></event></trace>";
    assert!(matches!(load_error(xml), LoadError::UnknownKind { record: 0, .. }));
}

#[test]
fn non_finite_time_is_rejected() {
    let xml = "<trace><event><model>m</model><kind>IN</kind><time>inf</time><state/></event></trace>";
    assert!(matches!(load_error(xml), LoadError::InvalidTime { .. }));
}

#[test]
fn depth_limit_from_config() {
    let xml = r#"<trace><event><model>m</model><kind>IN</kind><time>0</time><state>
      <attribute category="C"><name>a</name><type>T</type><value>
        <attribute category="C"><name>b</name><type>T</type><value>
          <attribute category="P"><name>c</name><type>Integer</type><value>1</value></attribute>
        </value></attribute>
      </value></attribute>
    </state></event></trace>"#;

    assert!(TraceLoader::new().load_str(xml).is_ok());
    let shallow = TraceLoader::with_config(LoaderConfig::new().with_max_depth(1));
    assert!(matches!(shallow.load_str(xml).unwrap_err().kind, ErrorKind::Parse(_)));
}

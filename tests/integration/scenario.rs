//! The generator scenario: one model whose state goes idle, busy, idle.

use devscope::runtime::{HumanFormatter, JsonFormatter, Session, ViewFormatter};
use devscope::trace::LoaderConfig;
use devscope::view::{ArrowStyle, SelectionChange, ValueScale};

use crate::fixture;

fn gen_session() -> Session {
    let mut session = Session::open(fixture("gen.xml"), LoaderConfig::new()).unwrap();
    assert_eq!(session.select_model("gen"), SelectionChange::Model);
    assert_eq!(session.select_attribute("state"), SelectionChange::Attribute);
    session
}

// =============================================================================
// View Geometry
// =============================================================================

#[test]
fn stairstep_at_the_external_transition() {
    let mut session = gen_session();
    session.set_time(5.0);
    let view = session.view().into_view().unwrap();

    assert_eq!(view.title, "gen: state");
    assert_eq!(view.x_limits, (0.0, 10.0));
    assert_eq!(view.scale, ValueScale::Categorical(vec!["busy".into(), "idle".into()]));

    let holds: Vec<(f64, f64, f64)> = view
        .step
        .holds()
        .map(|s| (s.start.time, s.end.time, s.start.y))
        .collect();
    assert_eq!(holds, vec![(0.0, 5.0, 1.0), (5.0, 9.0, 0.0), (9.0, 10.0, 1.0)]);

    let internal: Vec<f64> = view.step.internal.iter().map(|m| m.time).collect();
    let external: Vec<f64> = view.step.external.iter().map(|m| m.time).collect();
    assert_eq!(internal, vec![0.0, 9.0]);
    assert_eq!(external, vec![5.0]);

    let x_ticks: Vec<f64> = view.x_ticks.iter().map(|t| t.position).collect();
    assert_eq!(x_ticks, vec![0.0, 5.0, 9.0]);
    assert_eq!(view.cursor_line.0.time, 5.0);
    assert_eq!(view.cursor_line.0.y, -0.5);
    assert_eq!(view.cursor_line.1.y, 1.5);
}

#[test]
fn interior_external_event_gets_no_arrow() {
    let mut session = gen_session();
    session.set_time(5.0);
    let view = session.view().into_view().unwrap();
    assert!(view.arrows.is_empty());
}

#[test]
fn interior_internal_event_gets_an_arrow() {
    let xml = r#"<trace>
  <event><model>gen</model><kind>EX</kind><time>0</time><state>
    <attribute category="P"><name>n</name><type>Integer</type><value>1</value></attribute></state></event>
  <event><model>gen</model><kind>IN</kind><time>2</time><state>
    <attribute category="P"><name>n</name><type>Integer</type><value>4</value></attribute></state></event>
  <event><model>gen</model><kind>IN</kind><time>3</time><state>
    <attribute category="P"><name>n</name><type>Integer</type><value>4</value></attribute></state></event>
  <event><model>gen</model><kind>EX</kind><time>6</time><state>
    <attribute category="P"><name>n</name><type>Integer</type><value>0</value></attribute></state></event>
</trace>"#;
    let mut session = Session::from_xml(xml, LoaderConfig::new()).unwrap();
    session.select_model("gen");
    session.select_attribute("n");
    session.set_time(3.0);

    let view = session.view().into_view().unwrap();
    let arrows: Vec<(f64, f64, f64, ArrowStyle)> = view
        .arrows
        .iter()
        .map(|a| (a.start.time, a.start.y, a.end.y, a.style))
        .collect();
    assert_eq!(
        arrows,
        vec![(2.0, 1.0, 4.0, ArrowStyle::Up), (3.0, 4.0, 4.0, ArrowStyle::SelfLoop)]
    );
}

// =============================================================================
// Navigation and Detail
// =============================================================================

#[test]
fn stepping_through_the_trace() {
    let mut session = gen_session();
    let visited: Vec<f64> = (0..4).map(|_| session.next()).collect();
    assert_eq!(visited, vec![5.0, 9.0, 9.0, 9.0]);
    assert_eq!(session.prev(), 5.0);
    assert_eq!(session.first(), 0.0);
    assert_eq!(session.last(), 9.0);
}

#[test]
fn detail_text_at_each_event() {
    let mut session = gen_session();

    let detail = session.detail().unwrap();
    assert_eq!(
        detail.to_string(),
        "TIME: 0.0000\nSTATE: idle\nInternal Transition:\n  Time Next: 5.0\n"
    );

    session.next();
    assert_eq!(
        session.detail().unwrap().to_string(),
        "TIME: 5.0000\nSTATE: busy\nExternal Transition\n"
    );

    session.last();
    assert_eq!(
        session.detail().unwrap().to_string(),
        "TIME: 9.0000\nSTATE: idle\nInternal Transition:\n  Time Next: N/A\n"
    );
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn human_and_json_output_agree() {
    let mut session = gen_session();
    session.set_time(5.0);
    let outcome = session.view();

    let text = HumanFormatter::new().format_outcome(&outcome).unwrap();
    assert!(text.contains("holds: 0.0-5.0 @ idle, 5.0-9.0 @ busy, 9.0-10.0 @ idle"));

    let json: serde_json::Value =
        serde_json::from_str(&JsonFormatter::new().format_outcome(&outcome).unwrap()).unwrap();
    assert_eq!(json["status"], "ready");
    assert_eq!(json["view"]["x_limits"], serde_json::json!([0.0, 10.0]));
    assert_eq!(json["view"]["scale"]["categories"], serde_json::json!(["busy", "idle"]));
}

//! Model and attribute selection trees built from a loaded trace.

use devscope::trace::{Hierarchy, TraceLoader, TraceStore};

const QUEUE: &str = include_str!("../fixtures/queue.xml");

#[test]
fn model_tree_from_trace() {
    let store = TraceStore::new(TraceLoader::new().load_str(QUEUE).unwrap());
    let models = Hierarchy::from_paths(store.models_present());

    assert_eq!(models.leaves(), vec!["root.queue", "root.server"]);
    assert!(!models.is_leaf("root"));
    assert_eq!(models.render(), "+ root\n  * queue\n  * server\n");
}

#[test]
fn attribute_tree_from_trace() {
    let store = TraceStore::new(TraceLoader::new().load_str(QUEUE).unwrap());
    let paths = Hierarchy::from_paths(store.paths_for("root.queue"));

    assert_eq!(
        paths.leaves(),
        vec!["length", "open", "job.id", "job.size", "job.owner"]
    );
    assert!(!paths.is_leaf("job"));
    assert_eq!(
        paths.render(),
        "* length\n* open\n+ job\n  * id\n  * size\n  * owner\n"
    );
}

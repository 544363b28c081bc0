use super::*;
use crate::config::{codec::QueryMap, url_state::Step};

fn url(step: Step, tag: &str) -> StepUrl {
    let mut q = QueryMap::new();
    q.insert("tag".to_owned(), tag.to_owned());
    StepUrl::new(step, q)
}

#[test]
fn push_then_back_and_forward() {
    let mut h = History::new(url(Step::Collect, "a"));
    h.push(url(Step::Customize, "b"));
    h.push(url(Step::Export, "c"));
    assert_eq!(h.len(), 3);

    assert!(h.back());
    assert_eq!(h.current().step, Step::Customize);
    assert!(h.back());
    assert!(!h.back());
    assert_eq!(h.current().step, Step::Collect);

    assert!(h.forward());
    assert!(h.forward());
    assert!(!h.forward());
    assert_eq!(h.current().query["tag"], "c");
}

#[test]
fn push_drops_forward_entries() {
    let mut h = History::new(url(Step::Collect, "a"));
    h.push(url(Step::Customize, "b"));
    h.back();
    h.push(url(Step::Customize, "b2"));
    assert_eq!(h.len(), 2);
    assert!(!h.can_go_forward());
    assert_eq!(h.current().query["tag"], "b2");
}

#[test]
fn replace_keeps_stack_shape() {
    let mut h = History::new(url(Step::Collect, "a"));
    h.push(url(Step::Customize, "b"));
    h.push(url(Step::Export, "c"));
    h.back();
    h.replace(url(Step::Customize, "b-edited"));

    assert_eq!(h.len(), 3);
    assert_eq!(h.index(), 1);
    assert!(h.forward());
    assert_eq!(h.current().query["tag"], "c");
    assert!(h.back());
    assert_eq!(h.current().query["tag"], "b-edited");
}

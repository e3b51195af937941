#![cfg(feature = "pulldown")]

use linkdefs::Options;
use linkdefs::adapters::pulldown::{
    PulldownAdapter, PulldownAdapterOptions, parse_with_index, scan_and_parse,
};
use pulldown_cmark::{Event, Options as PulldownOptions, Tag};

fn link_targets(events: &[Event<'static>]) -> Vec<(String, String)> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => Some((dest_url.to_string(), title.to_string())),
            _ => None,
        })
        .collect()
}

#[test]
fn resolves_references_commonmark_would_reject() {
    // Four spaces of indentation is a code block to CommonMark.
    let text = "See [foo].\n\n    [foo]: http://example.com/ \"Title\"\n";
    let events = scan_and_parse(text, &Options::default(), PulldownOptions::empty());
    assert_eq!(
        link_targets(&events),
        vec![("http://example.com/".to_string(), "Title".to_string())]
    );
}

#[test]
fn resolves_case_insensitively_with_empty_title_when_absent() {
    let index = linkdefs::scan("Lorem [foo]: http://example.com/ ipsum.");
    let events = parse_with_index("[text][FoO]", &index, PulldownOptions::empty());
    assert_eq!(
        link_targets(&events),
        vec![("http://example.com/".to_string(), String::new())]
    );
}

#[test]
fn unknown_references_stay_text() {
    let index = linkdefs::scan("[foo]: http://example.com/");
    let events = parse_with_index("[text][missing]", &index, PulldownOptions::empty());
    assert!(link_targets(&events).is_empty());
}

#[test]
fn adapter_loads_a_document_index() {
    let mut adapter = PulldownAdapter::new(PulldownAdapterOptions::default());
    adapter.load("text [ref]: <http://ref.example/> 'Ref'");
    assert!(adapter.index().contains("REF"));

    let events = adapter.parse("A [link][ref].");
    assert_eq!(
        link_targets(&events),
        vec![("http://ref.example/".to_string(), "Ref".to_string())]
    );

    adapter.clear();
    assert!(link_targets(&adapter.parse("A [link][ref].")).is_empty());
}

#[test]
fn adapter_uses_a_prebuilt_index() {
    let index = linkdefs::scan("[Docs]: https://docs.example/");
    let adapter = PulldownAdapter::with_index(PulldownAdapterOptions::default(), index);
    assert_eq!(
        link_targets(&adapter.parse("Read [the docs][docs].")),
        vec![("https://docs.example/".to_string(), String::new())]
    );
}

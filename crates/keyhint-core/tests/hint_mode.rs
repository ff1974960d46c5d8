//! End-to-end hint mode runs against JSON page snapshots.
//!
//! Run with: cargo test -p keyhint-core --test hint_mode

use keyhint_config::{ConfigLoader, HintsConfig};
use keyhint_core::{HintSlot, KeyInput, MatchState, ModeSignal};
use keyhint_dom_snapshot::{Effect, SnapshotDocument};

const EXAMPLE_PAGE: &str = r#"{
    "url": "https://news.example.com/index.html",
    "viewport": { "width": 1024, "height": 768 },
    "elements": [
        { "tag": "a", "attributes": { "id": "thumb", "href": "story/42" },
          "rect": { "left": 10, "top": 10, "width": 64, "height": 64 } },
        { "tag": "a", "attributes": { "id": "title", "href": "/story/42" },
          "rect": { "left": 80, "top": 10, "width": 300, "height": 20 } },
        { "tag": "a", "attributes": { "id": "comments", "href": "/story/42/comments" },
          "rect": { "left": 80, "top": 40, "width": 120, "height": 20 } },
        { "tag": "input", "attributes": { "id": "search", "type": "search" },
          "rect": { "left": 800, "top": 10, "width": 200, "height": 24 } },
        { "tag": "input", "attributes": { "type": "hidden", "name": "csrf" },
          "rect": { "left": 0, "top": 0, "width": 0, "height": 0 } }
    ]
}"#;

fn example() -> SnapshotDocument {
    SnapshotDocument::from_json(EXAMPLE_PAGE).unwrap()
}

fn id(doc: &SnapshotDocument, value: &str) -> keyhint_protocols::NodeId {
    doc.find_by_attribute("id", value).unwrap()
}

#[test]
fn test_example_numbering() {
    let mut doc = example();
    let mut slot = HintSlot::new();
    let engine = slot.install(&mut doc, &HintsConfig::default());

    let numbers: Vec<u32> = engine.hints().iter().map(|h| h.number).collect();
    assert_eq!(numbers, vec![1, 1, 2, 3]);
}

#[test]
fn test_example_group_then_confirm() {
    let mut doc = example();
    let mut slot = HintSlot::new();
    slot.install(&mut doc, &HintsConfig::default());

    assert_eq!(slot.handle_key(&mut doc, KeyInput::Char('1')), ModeSignal::Ignore);
    let engine = slot.active().unwrap();
    assert_eq!(engine.state(), MatchState::Matching);
    assert_eq!(engine.matches().len(), 2);

    assert_eq!(slot.handle_key(&mut doc, KeyInput::Enter), ModeSignal::Normal);
    assert!(!slot.is_active());

    let thumb = id(&doc, "thumb");
    assert_eq!(doc.effects(), &[Effect::Click { node: thumb, target: None }]);
    assert!(doc.attached_labels().is_empty());
    assert!(doc.attached_overlay_roots().is_empty());
}

#[test]
fn test_example_direct_input() {
    let mut doc = example();
    let mut slot = HintSlot::new();
    slot.install(&mut doc, &HintsConfig::default());

    assert_eq!(slot.handle_key(&mut doc, KeyInput::Char('3')), ModeSignal::Insert);
    let search = id(&doc, "search");
    assert_eq!(doc.effects(), &[Effect::Focus { node: search }]);
}

#[test]
fn test_backspace_then_other_hint() {
    let mut doc = example();
    let mut slot = HintSlot::new();
    slot.install(&mut doc, &HintsConfig::default());

    slot.handle_key(&mut doc, KeyInput::Char('1'));
    slot.handle_key(&mut doc, KeyInput::Backspace);
    assert_eq!(slot.active().unwrap().state(), MatchState::Idle);
    assert!(doc.attached_labels().iter().all(|l| l.visible));

    assert_eq!(slot.handle_key(&mut doc, KeyInput::Char('2')), ModeSignal::Normal);
    let comments = id(&doc, "comments");
    assert_eq!(doc.effects(), &[Effect::Click { node: comments, target: None }]);
}

#[test]
fn test_new_tab_from_config() {
    let config = ConfigLoader::load_str("[hints]\nopen_in_new_tab = true\n").unwrap();
    let mut doc = example();
    let mut slot = HintSlot::new();
    slot.install(&mut doc, &config.hints);

    assert_eq!(slot.add_digit(&mut doc, 2), ModeSignal::Normal);
    let comments = id(&doc, "comments");
    assert!(doc.effects().contains(&Effect::Click {
        node: comments,
        target: Some("_blank".to_string()),
    }));
    assert_eq!(
        doc.effects().last(),
        Some(&Effect::RemoveAttribute {
            node: comments,
            name: "target".to_string(),
        })
    );
}

#[test]
fn test_frameset_page() {
    let json = r#"{
        "viewport": { "width": 800, "height": 600 },
        "elements": [
            { "tag": "frame", "rect": { "left": 0, "top": 0, "width": 200, "height": 600 },
              "style": { "display": "block", "visibility": "hidden" },
              "content": {
                  "url": "https://example.com/nav.html",
                  "viewport": { "width": 200, "height": 600 },
                  "elements": [
                      { "tag": "a", "attributes": { "id": "nav-home", "href": "/" },
                        "rect": { "left": 5, "top": 5, "width": 100, "height": 16 } }
                  ]
              } },
            { "tag": "frame", "rect": { "left": 200, "top": 0, "width": 600, "height": 600 },
              "style": { "display": "block", "visibility": "hidden" },
              "content": {
                  "url": "https://example.com/main.html",
                  "viewport": { "width": 600, "height": 600 },
                  "elements": [
                      { "tag": "a", "attributes": { "id": "main-home", "href": "https://example.com/" },
                        "rect": { "left": 5, "top": 5, "width": 100, "height": 16 } },
                      { "tag": "textarea", "attributes": { "id": "notes" },
                        "rect": { "left": 5, "top": 40, "width": 300, "height": 100 } }
                  ]
              } }
        ]
    }"#;
    let mut doc = SnapshotDocument::from_json(json).unwrap();
    let mut slot = HintSlot::new();
    let engine = slot.install(&mut doc, &HintsConfig::default());

    let numbers: Vec<u32> = engine.hints().iter().map(|h| h.number).collect();
    assert_eq!(numbers, vec![1, 1, 2]);
    assert_eq!(doc.attached_overlay_roots().len(), 3);

    assert_eq!(slot.add_digit(&mut doc, 2), ModeSignal::Insert);
    let notes = id(&doc, "notes");
    assert_eq!(doc.effects(), &[Effect::Focus { node: notes }]);
}

#[test]
fn test_cap_with_six_hundred_elements() {
    let mut elements = Vec::new();
    for i in 0..600 {
        elements.push(format!(
            r#"{{ "tag": "button", "attributes": {{ "id": "b{}" }},
                 "rect": {{ "left": {}, "top": {}, "width": 10, "height": 10 }} }}"#,
            i,
            (i % 40) * 20,
            (i / 40) * 20
        ));
    }
    let json = format!(
        r#"{{ "viewport": {{ "width": 800, "height": 600 }}, "elements": [{}] }}"#,
        elements.join(",")
    );
    let mut doc = SnapshotDocument::from_json(&json).unwrap();
    let mut slot = HintSlot::new();
    let engine = slot.install(&mut doc, &HintsConfig::default());

    assert_eq!(engine.hints().len(), 500);
    assert_eq!(doc.attached_labels().len(), 500);
}

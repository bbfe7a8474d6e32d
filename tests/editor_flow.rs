//! End-to-end editor flows: build a chain, drag it around, and round-trip
//! whole documents through the policy store.

use beacon_canvas::{
    validate_document, EditorSession, MemoryPolicyStore, NodeEdit, NodeKind, PointerEvent,
    PointerTarget, PolicyDocument, PolicyEdit, PolicyStatus, PolicyStore,
};

/// Build the canonical "Block PII Egress" chain the way a user would: append
/// four blocks, then shape each one through the inspector.
fn build_block_pii_egress() -> EditorSession {
    let mut session = EditorSession::new(PolicyDocument::new_draft());
    session.edit_policy(PolicyEdit::Name("Block PII Egress".to_string()));

    let specs = [
        (NodeKind::Identity, "Billing Service", "spiffe://acme/billing"),
        (NodeKind::Action, "HTTP POST", "input.method == 'POST'"),
        (NodeKind::Resource, "Public Internet", "0.0.0.0/0"),
        (NodeKind::Decision, "DENY", "Audit & Block"),
    ];
    for (kind, label, selector) in specs {
        let id = session.insert_node_after(None);
        session.select_node(id);
        session.edit_selected(NodeEdit::Kind(kind));
        session.edit_selected(NodeEdit::Label(label.to_string()));
        session.edit_selected(NodeEdit::Selector(selector.to_string()));
    }
    let last = session.document().nodes.last().unwrap().id;
    session.select_node(last);
    session.edit_selected(NodeEdit::Terminal(true));
    session.clear_selection();
    session
}

#[test]
fn builds_a_valid_chain_with_spaced_positions() {
    let session = build_block_pii_egress();
    let doc = session.document();

    let xs: Vec<f64> = doc.nodes.iter().map(|n| n.position.x).collect();
    assert_eq!(xs, vec![100.0, 450.0, 800.0, 1150.0]);
    assert!(validate_document(doc).is_empty());
    assert_eq!(doc.terminal_node().unwrap().label, "DENY");
    assert!(doc.source_text.contains("deny[msg] {"));
}

#[test]
fn drag_commit_keeps_document_and_render_in_sync() {
    let mut session = build_block_pii_egress();
    let second = session.document().nodes[1].id;

    // Drag the second block left of the first, past two neighbors.
    session.handle_pointer(PointerEvent::Down(PointerTarget::Node(second)));
    session.handle_pointer(PointerEvent::Move { dx: -200.0, dy: 20.0 });
    session.handle_pointer(PointerEvent::Move { dx: -200.0, dy: -20.0 });

    // Mid-gesture the array order still drives the connectors.
    let layout = session.document().connector_layout();
    assert_eq!(layout[0].to, second);
    assert_eq!(layout[1].from, second);

    session.handle_pointer(PointerEvent::Up);

    let doc = session.document();
    assert_eq!(doc.nodes[0].id, second);
    assert!(validate_document(doc).is_empty());

    // The projection follows the committed order: the dragged block is now
    // the trigger.
    assert!(doc.source_text.contains("detected on HTTP POST"));
}

#[tokio::test]
async fn inspector_edits_survive_store_round_trip() {
    let store = MemoryPolicyStore::new();
    let mut session = build_block_pii_egress();
    session.edit_policy(PolicyEdit::Status(PolicyStatus::Active));
    session.edit_policy(PolicyEdit::Folder("Finance Rules".to_string()));

    // The whole document is the unit of change at the library boundary.
    store.save(session.document()).await.unwrap();

    let loaded = store.load(session.document().id).await.unwrap().unwrap();
    assert_eq!(loaded, *session.document());

    // Switching documents hands the previous one back for saving.
    let previous = session.open(PolicyDocument::new_draft());
    store.save(&previous).await.unwrap();
    assert_eq!(
        store.list(Some("Finance Rules"), None).await.unwrap().len(),
        1
    );
}

#[test]
fn mid_edge_insert_lands_by_position_not_by_request() {
    let mut session = build_block_pii_egress();

    // Insert on the first connector. The spawn x anchors to the last node,
    // so after the order checkpoint the new block sits at the chain's end.
    let inserted = session.insert_node_after(Some(0));
    let doc = session.document();
    assert_eq!(doc.nodes.last().unwrap().id, inserted);
    assert_eq!(doc.node(inserted).unwrap().position.x, 1500.0);
}

#[test]
fn stale_callbacks_degrade_to_no_visual_change() {
    let mut session = build_block_pii_egress();
    let victim = session.document().nodes[2].id;

    session.select_node(victim);
    assert!(session.remove_selected());
    let snapshot = session.document().clone();

    // A pending UI callback still holding the removed id: all no-ops.
    session.handle_pointer(PointerEvent::Down(PointerTarget::Node(victim)));
    session.handle_pointer(PointerEvent::Move { dx: 50.0, dy: 50.0 });
    session.handle_pointer(PointerEvent::Up);
    session.select_node(victim);
    assert!(!session.edit_selected(NodeEdit::Label("ghost".to_string())));

    assert_eq!(*session.document(), snapshot);
}

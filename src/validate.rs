//! Checkpoint validation for a policy document. Returns all findings; never
//! stops at the first. Meant to run at rest (after a drop or before a save),
//! not mid-gesture, since the sequence invariant is deliberately relaxed
//! while a drag is in flight.

use crate::types::PolicyDocument;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub rule: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// Validate a document at rest. Returns all errors found.
pub fn validate_document(doc: &PolicyDocument) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // C1: Node ids must be unique
    let mut seen = HashSet::new();
    for node in &doc.nodes {
        if !seen.insert(node.id) {
            errors.push(ValidationError {
                rule: "C1".to_string(),
                message: format!("Duplicate node id: {}", node.id),
            });
        }
    }

    // C2: Labels must be non-empty
    for node in &doc.nodes {
        if node.label.trim().is_empty() {
            errors.push(ValidationError {
                rule: "C2".to_string(),
                message: format!("Node {} has an empty label", node.id),
            });
        }
    }

    // C3: A terminal node must be the last node of the chain
    for (i, node) in doc.nodes.iter().enumerate() {
        if node.terminal && i != doc.nodes.len() - 1 {
            errors.push(ValidationError {
                rule: "C3".to_string(),
                message: format!(
                    "Terminal node {} at position {} is not last in the chain",
                    node.id, i
                ),
            });
        }
    }

    // C4: At most one terminal node
    let terminal_count = doc.nodes.iter().filter(|n| n.terminal).count();
    if terminal_count > 1 {
        errors.push(ValidationError {
            rule: "C4".to_string(),
            message: format!("Expected at most one terminal node, found {terminal_count}"),
        });
    }

    // C5: Positions must be finite
    for node in &doc.nodes {
        if !node.position.x.is_finite() || !node.position.y.is_finite() {
            errors.push(ValidationError {
                rule: "C5".to_string(),
                message: format!("Node {} has a non-finite position", node.id),
            });
        }
    }

    // C6: Sequence invariant — ascending x at rest
    let sorted = doc
        .nodes
        .windows(2)
        .all(|pair| pair[0].position.x <= pair[1].position.x);
    if !sorted {
        errors.push(ValidationError {
            rule: "C6".to_string(),
            message: "Node sequence is not sorted by ascending x (uncommitted drag?)".to_string(),
        });
    }

    errors
}

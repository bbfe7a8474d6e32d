//! Rego-like textual projection of a logic chain.
//!
//! Display-only, best-effort. The visual chain is authoritative: this text is
//! regenerated on every chain mutation and is never parsed back into nodes.

use crate::types::LogicNode;
use chrono::Utc;

/// Project the node chain into policy source text.
///
/// The rule head is `deny` when the chain terminates in a DENY decision and
/// `warn` otherwise. Each non-terminal node contributes its selector as one
/// condition line.
pub fn render_source(name: &str, nodes: &[LogicNode]) -> String {
    let mut code = format!(
        "# Auto-generated Policy\n# Policy: {}\n# Updated: {}\n\npackage beacon.guardrails\n\n",
        name,
        Utc::now().to_rfc3339()
    );

    if nodes.is_empty() {
        code.push_str("# Empty policy — add logic blocks in the visual builder\n");
        return code;
    }

    let rule_name = match nodes.iter().find(|n| n.terminal) {
        Some(decision) if decision.label.eq_ignore_ascii_case("deny") => "deny",
        _ => "warn",
    };
    let trigger = &nodes[0].label;

    code.push_str(&format!(
        "{rule_name}[msg] {{\n  # 1. Scope Definition\n  input.protocol == \"http\"\n\n  # 2. Conditions\n"
    ));
    for node in nodes.iter().filter(|n| !n.terminal) {
        code.push_str(&format!("  # {}: {}\n", node.kind.as_str(), node.label));
        if !node.selector.is_empty() {
            code.push_str(&format!("  {}\n", node.selector));
        }
    }
    code.push_str(&format!(
        "\n  # 3. Outcome Message\n  msg := \"Policy Violation: Condition match detected on {trigger}\"\n}}\n"
    ));
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::types::NodeKind;

    fn node(kind: NodeKind, label: &str, selector: &str, terminal: bool) -> LogicNode {
        let mut n = LogicNode::new(kind, label, selector, Point::default());
        n.terminal = terminal;
        n
    }

    #[test]
    fn test_empty_chain_projection() {
        let code = render_source("New Policy", &[]);
        assert!(code.contains("package beacon.guardrails"));
        assert!(code.contains("# Empty policy"));
        assert!(!code.contains("[msg]"));
    }

    #[test]
    fn test_deny_terminal_yields_deny_rule() {
        let nodes = vec![
            node(NodeKind::Identity, "Billing Service", "spiffe://acme/billing", false),
            node(NodeKind::Action, "HTTP POST", "input.method == 'POST'", false),
            node(NodeKind::Decision, "DENY", "Audit & Block", true),
        ];
        let code = render_source("Block PII Egress", &nodes);
        assert!(code.contains("deny[msg] {"));
        assert!(code.contains("input.method == 'POST'"));
        assert!(code.contains("# Identity: Billing Service"));
        // Terminal node is the outcome, not a condition.
        assert!(!code.contains("Audit & Block"));
        assert!(code.contains("detected on Billing Service"));
    }

    #[test]
    fn test_non_deny_terminal_yields_warn_rule() {
        let nodes = vec![
            node(NodeKind::Filter, "Logic Block", "input.path", false),
            node(NodeKind::Decision, "ALLOW", "", true),
        ];
        let code = render_source("Audit", &nodes);
        assert!(code.contains("warn[msg] {"));
    }

    #[test]
    fn test_chain_without_terminal_warns() {
        let nodes = vec![node(NodeKind::Filter, "Logic Block", "input.path", false)];
        let code = render_source("Draft", &nodes);
        assert!(code.contains("warn[msg] {"));
    }
}

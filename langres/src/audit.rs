//! The audit engine: checks document text against the resource list.
//!
//! Two input shapes are supported. [`audit_document`] walks a hierarchical
//! design document (pages of nested nodes) and produces prioritized issues
//! plus coverage and score aggregates. [`audit_texts`] takes a flat text
//! array and reports matched/missing entries.

use serde::{Deserialize, Serialize};

use crate::matcher::{self, MatchKind, MatchOptions};
use crate::types::{Locale, Product, Resource};

/// A design document exported from the drawing tool: a tree of named nodes,
/// where `TEXT` leaves carry the strings to audit. The audit never mutates
/// this tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DesignDocument {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub pages: Vec<DesignPage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DesignPage {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub children: Vec<DesignNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DesignNode {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Node kind as exported by the tool; only `"TEXT"` nodes are audited.
    #[serde(rename = "type", default)]
    pub node_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DesignNode>,
}

/// One auditable text occurrence: a non-empty `TEXT` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit<'a> {
    pub node_id: &'a str,
    /// Trimmed node text.
    pub text: &'a str,
    /// Ancestor names joined with `" > "`, ending at the node itself.
    pub location: String,
}

/// Collects text units depth-first, children in array order.
pub fn collect_text_units(document: &DesignDocument) -> Vec<TextUnit<'_>> {
    let mut units = Vec::new();
    for page in &document.pages {
        for node in &page.children {
            collect_node(node, &page.name, &mut units);
        }
    }
    units
}

fn collect_node<'a>(node: &'a DesignNode, path: &str, units: &mut Vec<TextUnit<'a>>) {
    let location = if path.is_empty() {
        node.name.clone()
    } else {
        format!("{} > {}", path, node.name)
    };

    if node.node_type == "TEXT" {
        if let Some(text) = node.text.as_deref() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                units.push(TextUnit {
                    node_id: &node.id,
                    text: trimmed,
                    location: location.clone(),
                });
            }
        }
    }

    for child in &node.children {
        collect_node(child, &location, units);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuePriority {
    High,
    Medium,
    Low,
}

/// A single finding from a document audit. Transient: re-derived on every
/// call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuditIssue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: IssuePriority,
    pub location: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    pub total_texts: usize,
    pub matched: usize,
    pub issues_found: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    /// Percentage of text units with an exact or product-specific match.
    pub coverage: u32,
    /// `max(0, 100 - issues * 5)`.
    pub overall_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentAuditReport {
    pub issues: Vec<AuditIssue>,
    pub stats: AuditStats,
    pub summary: AuditSummary,
}

/// Audits every text node of `document` against the resource list.
///
/// Per unit: an exact or product-specific match counts as covered and emits
/// no issue; a fuzzy-only match emits a medium-priority issue recommending
/// the registered text; no match emits a high-priority issue. Independently
/// of the match outcome, text shorter than two characters emits an
/// additional low-priority issue.
pub fn audit_document(
    document: &DesignDocument,
    resources: &[Resource],
    locale: Locale,
    product: Option<Product>,
    options: MatchOptions,
) -> DocumentAuditReport {
    let pool = matcher::candidates(resources, locale, product);
    let units = collect_text_units(document);

    let mut issues = Vec::new();
    let mut matched = 0usize;

    for unit in &units {
        match matcher::find_match(unit.text, pool.iter().copied(), locale, options) {
            Some(found) if found.kind != MatchKind::Fuzzy => matched += 1,
            Some(found) => issues.push(AuditIssue {
                id: format!("{}-similar", unit.node_id),
                title: "Similar resource found".to_string(),
                description: format!(
                    "\"{}\" is close to the registered resource \"{}\"",
                    unit.text, found.resource.key
                ),
                priority: IssuePriority::Medium,
                location: unit.location.clone(),
                recommendation: format!("Use the registered text: \"{}\"", found.matched_text),
            }),
            None => issues.push(AuditIssue {
                id: format!("{}-missing", unit.node_id),
                title: "Text not in resources".to_string(),
                description: format!("\"{}\" has no registered {} resource", unit.text, locale),
                priority: IssuePriority::High,
                location: unit.location.clone(),
                recommendation:
                    "Register this text as a language resource or replace it with a registered one"
                        .to_string(),
            }),
        }

        if unit.text.chars().count() < 2 {
            issues.push(AuditIssue {
                id: format!("{}-short", unit.node_id),
                title: "Text too short".to_string(),
                description: format!("\"{}\" is shorter than two characters", unit.text),
                priority: IssuePriority::Low,
                location: unit.location.clone(),
                recommendation: "Check whether this label carries enough meaning on its own"
                    .to_string(),
            });
        }
    }

    let total = units.len();
    let coverage = if total == 0 {
        100
    } else {
        ((matched as f64 / total as f64) * 100.0).round() as u32
    };
    let overall_score = 100u32.saturating_sub(issues.len() as u32 * 5);

    DocumentAuditReport {
        stats: AuditStats {
            total_texts: total,
            matched,
            issues_found: issues.len(),
        },
        summary: AuditSummary {
            coverage,
            overall_score,
        },
        issues,
    }
}

/// One matched input from a flat text audit.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuditMatch {
    pub input: String,
    pub resource: Resource,
    #[serde(rename = "matchedText")]
    pub matched_text: String,
    #[serde(rename = "match")]
    pub kind: MatchKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TextAuditStats {
    /// Non-empty inputs only.
    pub total: usize,
    pub matched: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextAuditReport {
    pub matched: Vec<AuditMatch>,
    pub missing: Vec<String>,
    pub stats: TextAuditStats,
}

/// Audits a flat text array. Unlike document coverage, the `matched` list
/// here includes fuzzy hits; inputs that are empty after trimming are
/// skipped entirely.
pub fn audit_texts(
    texts: &[String],
    resources: &[Resource],
    locale: Locale,
    product: Option<Product>,
    options: MatchOptions,
) -> TextAuditReport {
    let pool = matcher::candidates(resources, locale, product);

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total = 0usize;

    for raw in texts {
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }
        total += 1;

        match matcher::find_match(input, pool.iter().copied(), locale, options) {
            Some(found) => matched.push(AuditMatch {
                input: input.to_string(),
                resource: found.resource.clone(),
                matched_text: found.matched_text.to_string(),
                kind: found.kind,
            }),
            None => missing.push(input.to_string()),
        }
    }

    let stats = TextAuditStats {
        total,
        matched: matched.len(),
        missing: missing.len(),
    };

    TextAuditReport {
        matched,
        missing,
        stats,
    }
}

#![forbid(unsafe_code)]
//! Language-resource matching, audit, and suggestion toolkit.
//!
//! Stores short product UI strings (Korean/English/…) tagged by product,
//! category, and component, and answers three questions about arbitrary
//! input text: does it match a registered resource (exact, fuzzy, or
//! product-specific), how healthy is a document or the repository as a
//! whole, and what text should be used instead.
//!
//! # Quick Start
//!
//! ```rust
//! use langres::normalize::norm;
//! use langres::{MatchKind, MatchOptions, Resource, find_match, Locale};
//!
//! // Normalization for search and indexing
//! assert_eq!(norm("Hello,   World!"), "hello world");
//!
//! // Matching against a resource list
//! let resources: Vec<Resource> = serde_json::from_str(r#"[{
//!     "id": "1",
//!     "key": "login.button",
//!     "products": ["knox"],
//!     "translations": { "ko-KR": "로그인" },
//!     "status": "approved",
//!     "metadata": { "createdAt": "2024-01-15", "updatedAt": "2024-01-15", "author": "designer1" }
//! }]"#).unwrap();
//!
//! let found = find_match("로그인", &resources, Locale::KoKr, MatchOptions::default()).unwrap();
//! assert_eq!(found.kind, MatchKind::Exact);
//! ```
//!
//! # Components
//!
//! - [`normalize`] — canonical text normalization (`norm` / `normalize_query`)
//! - [`matcher`] — exact/fuzzy/product-specific classification over a list
//! - [`audit`] — document-tree and flat-text audits with coverage and score
//! - [`health`] — repository-wide health report
//! - [`search`] — filter + substring search
//! - [`store`] — JSON-file-backed store with an explicit cache lifecycle
//! - [`suggest`] / [`model`] — suggestion engine with an optional external
//!   generative collaborator

pub mod audit;
pub mod error;
pub mod health;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod search;
pub mod store;
pub mod suggest;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    audit::{
        AuditIssue, AuditMatch, DesignDocument, DesignNode, DesignPage, DocumentAuditReport,
        IssuePriority, TextAuditReport, audit_document, audit_texts,
    },
    error::Error,
    health::{HealthReport, health_report},
    matcher::{Match, MatchKind, MatchOptions, classify_match, find_match},
    normalize::{norm, normalize_query},
    search::{SearchQuery, SearchResults, search},
    store::{NewResource, ResourcePatch, ResourceStore},
    suggest::{Suggestion, SuggestionSource, suggest, suggest_all, suggest_with_model},
    types::{
        Category, Locale, Product, ProductVariant, Resource, ResourceMetadata, ResourceStatus,
    },
};

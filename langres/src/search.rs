//! Filter + substring search over the resource list.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_query;
use crate::types::{Locale, Product, Resource};

pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Search parameters. An absent or blank `query` lists everything that
/// passes the filters. `locale` is echoed to callers but does not restrict
/// matching: the query is compared against every language's text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub locale: Option<Locale>,
    pub product: Option<Product>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResults {
    pub data: Vec<Resource>,
    /// Full match count, before the limit is applied to `data`.
    pub total: usize,
}

/// Runs a search over the resource list.
///
/// The query is normalized with [`normalize_query`] (punctuation kept) and
/// compared case-insensitively as a substring of the key, every generic
/// translation, and every product-specific translation. Product and
/// category filters are applied first; the category filter is a
/// case-insensitive substring over all category fields.
pub fn search(resources: &[Resource], query: &SearchQuery) -> SearchResults {
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let needle = query
        .query
        .as_deref()
        .map(normalize_query)
        .filter(|q| !q.is_empty());

    let matches: Vec<&Resource> = resources
        .iter()
        .filter(|resource| query.product.is_none_or(|p| resource.has_product(p)))
        .filter(|resource| {
            query
                .category
                .as_deref()
                .is_none_or(|c| resource.category.matches(c))
        })
        .filter(|resource| {
            needle
                .as_deref()
                .is_none_or(|q| resource_contains(resource, q))
        })
        .collect();

    SearchResults {
        total: matches.len(),
        data: matches.into_iter().take(limit).cloned().collect(),
    }
}

fn resource_contains(resource: &Resource, needle: &str) -> bool {
    if resource.key.to_lowercase().contains(needle) {
        return true;
    }
    if resource
        .translations
        .values()
        .any(|text| text.to_lowercase().contains(needle))
    {
        return true;
    }
    resource
        .product_specific
        .values()
        .flat_map(|texts| texts.values())
        .any(|text| text.to_lowercase().contains(needle))
}

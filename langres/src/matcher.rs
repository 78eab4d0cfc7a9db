//! The matching engine: decides whether and how an input string matches a
//! stored resource translation.
//!
//! Matching is locale-scoped and ordered: exact equality (generic, then
//! product-specific) always beats fuzzy containment. When scanning a list,
//! the whole list is tried for exact matches before any fuzzy match is
//! considered, so list order never lets a fuzzy hit shadow an exact one.

use serde::{Deserialize, Serialize};

use crate::types::{Locale, Product, ProductVariant, Resource};

/// How an input matched a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// Trimmed, case-sensitive equality with the generic translation.
    Exact,
    /// Trimmed, case-sensitive equality with a product-specific translation.
    ProductSpecific,
    /// Bidirectional case-insensitive substring containment.
    Fuzzy,
}

/// Options controlling match behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Look up product-specific translations before generic ones. The
    /// default is generic-first.
    pub variant_first: bool,
}

/// A successful match against one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub resource: &'a Resource,
    pub matched_text: &'a str,
    pub kind: MatchKind,
    /// Set when the matched text came from a product-specific block.
    pub variant: Option<ProductVariant>,
}

fn exact_generic<'a>(input: &str, resource: &'a Resource, locale: Locale) -> Option<Match<'a>> {
    let target = resource.translation(locale)?;
    (target.trim() == input).then_some(Match {
        resource,
        matched_text: target,
        kind: MatchKind::Exact,
        variant: None,
    })
}

fn exact_variant<'a>(input: &str, resource: &'a Resource, locale: Locale) -> Option<Match<'a>> {
    resource
        .variant_translations(locale)
        .find(|(_, text)| text.trim() == input)
        .map(|(variant, text)| Match {
            resource,
            matched_text: text,
            kind: MatchKind::ProductSpecific,
            variant: Some(variant),
        })
}

fn contains_either(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

fn fuzzy_generic<'a>(input: &str, resource: &'a Resource, locale: Locale) -> Option<Match<'a>> {
    let target = resource.translation(locale)?;
    contains_either(target, input).then_some(Match {
        resource,
        matched_text: target,
        kind: MatchKind::Fuzzy,
        variant: None,
    })
}

fn fuzzy_variant<'a>(input: &str, resource: &'a Resource, locale: Locale) -> Option<Match<'a>> {
    resource
        .variant_translations(locale)
        .find(|(_, text)| contains_either(text, input))
        .map(|(variant, text)| Match {
            resource,
            matched_text: text,
            kind: MatchKind::Fuzzy,
            variant: Some(variant),
        })
}

/// Exact classification of `input` against one resource: trimmed,
/// case-sensitive equality with the generic or product-specific translation
/// for `locale`.
pub fn classify_exact<'a>(
    input: &str,
    resource: &'a Resource,
    locale: Locale,
    options: MatchOptions,
) -> Option<Match<'a>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if options.variant_first {
        exact_variant(input, resource, locale).or_else(|| exact_generic(input, resource, locale))
    } else {
        exact_generic(input, resource, locale).or_else(|| exact_variant(input, resource, locale))
    }
}

/// Fuzzy classification of `input` against one resource: case-insensitive
/// substring containment in either direction. No Unicode normalization is
/// applied on this path.
pub fn classify_fuzzy<'a>(
    input: &str,
    resource: &'a Resource,
    locale: Locale,
    options: MatchOptions,
) -> Option<Match<'a>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if options.variant_first {
        fuzzy_variant(input, resource, locale).or_else(|| fuzzy_generic(input, resource, locale))
    } else {
        fuzzy_generic(input, resource, locale).or_else(|| fuzzy_variant(input, resource, locale))
    }
}

/// Full ordered classification against one resource: exact first, fuzzy as
/// the fallback. Returns `None` for empty input or when nothing matches.
pub fn classify_match<'a>(
    input: &str,
    resource: &'a Resource,
    locale: Locale,
    options: MatchOptions,
) -> Option<Match<'a>> {
    classify_exact(input, resource, locale, options)
        .or_else(|| classify_fuzzy(input, resource, locale, options))
}

/// Scans a resource list for the best match.
///
/// The exact pass runs over the entire list before the fuzzy pass starts:
/// any exact match anywhere beats any fuzzy match, regardless of list order.
/// Within a pass, the first resource in list order wins.
pub fn find_match<'a, I>(
    input: &str,
    resources: I,
    locale: Locale,
    options: MatchOptions,
) -> Option<Match<'a>>
where
    I: IntoIterator<Item = &'a Resource>,
    I::IntoIter: Clone,
{
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let iter = resources.into_iter();
    iter.clone()
        .find_map(|resource| classify_exact(input, resource, locale, options))
        .or_else(|| iter.clone().find_map(|resource| classify_fuzzy(input, resource, locale, options)))
}

/// Applies the locale and product pre-filters to a resource list.
///
/// A candidate must carry text for `locale` (generic or product-specific)
/// and, when a product filter is given, must be tagged with that product.
pub fn candidates<'a>(
    resources: &'a [Resource],
    locale: Locale,
    product: Option<Product>,
) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|resource| product.is_none_or(|p| resource.has_product(p)))
        .filter(|resource| {
            resource.translation(locale).is_some()
                || resource.variant_translations(locale).next().is_some()
        })
        .collect()
}

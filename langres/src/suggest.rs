//! The suggestion engine: proposes a replacement for one UI string.
//!
//! The pure path ([`suggest`]) only consults the resource list: an exact
//! match returns the registered text verbatim, a fuzzy match proposes the
//! closest resource's text, and anything else falls back to a templated
//! suggestion. [`suggest_with_model`] additionally consults an external
//! generative collaborator for the fallback case, bounded by a timeout and
//! degrading to the template on any failure.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::matcher::{self, MatchKind, MatchOptions};
use crate::model::SuggestionModel;
use crate::types::{Locale, Product, Resource};

pub const EXACT_CONFIDENCE: f32 = 0.95;
pub const FUZZY_CONFIDENCE: f32 = 0.7;
pub const GENERATIVE_CONFIDENCE: f32 = 0.6;
pub const TEMPLATE_CONFIDENCE: f32 = 0.3;

/// Where a suggestion came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SuggestionSource {
    /// The input is already registered; `key` names the resource.
    Existing { key: String },
    /// A similar resource was found; `key` names it.
    Similar { key: String },
    /// An external model produced the text.
    Generative { model: String },
    /// Templated fallback.
    Template,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Suggestion {
    pub suggestion: String,
    pub rationale: String,
    /// In `[0, 1]`; exact > fuzzy > generative > template.
    pub confidence: f32,
    pub source: SuggestionSource,
}

/// Produces a suggestion for `text` from the resource list alone.
pub fn suggest(
    text: &str,
    resources: &[Resource],
    locale: Locale,
    product: Option<Product>,
    style_guide: Option<&str>,
    options: MatchOptions,
) -> Suggestion {
    let trimmed = text.trim();
    let pool = matcher::candidates(resources, locale, product);

    match matcher::find_match(trimmed, pool.iter().copied(), locale, options) {
        Some(found) if found.kind != MatchKind::Fuzzy => {
            let mut rationale = registered_rationale(locale, &found.resource.key);
            append_notes(&mut rationale, locale, product, style_guide);
            Suggestion {
                suggestion: found.matched_text.to_string(),
                rationale,
                confidence: EXACT_CONFIDENCE,
                source: SuggestionSource::Existing {
                    key: found.resource.key.clone(),
                },
            }
        }
        Some(found) => {
            let mut suggestion = found.matched_text.to_string();
            let mut rationale = similar_rationale(locale, &found.resource.key);
            // The requested product's variant text overrides the generic
            // suggestion when present.
            if let Some(product) = product {
                if let Some(variant_text) =
                    found.resource.variant_translation(product.variant(), locale)
                {
                    suggestion = variant_text.to_string();
                    rationale.push_str(&variant_note(locale, product));
                }
            }
            append_notes(&mut rationale, locale, product, style_guide);
            Suggestion {
                suggestion,
                rationale,
                confidence: FUZZY_CONFIDENCE,
                source: SuggestionSource::Similar {
                    key: found.resource.key.clone(),
                },
            }
        }
        None => {
            let mut rationale = template_rationale(locale);
            append_notes(&mut rationale, locale, product, style_guide);
            Suggestion {
                suggestion: format!("{}{}", trimmed, template_marker(locale)),
                rationale,
                confidence: TEMPLATE_CONFIDENCE,
                source: SuggestionSource::Template,
            }
        }
    }
}

/// Batch form of [`suggest`] for a selection of texts. Inputs that are empty
/// after trimming are skipped; results keep the order of the surviving
/// inputs.
pub fn suggest_all(
    texts: &[String],
    resources: &[Resource],
    locale: Locale,
    product: Option<Product>,
    style_guide: Option<&str>,
    options: MatchOptions,
) -> Vec<Suggestion> {
    texts
        .iter()
        .filter(|text| !text.trim().is_empty())
        .map(|text| suggest(text, resources, locale, product, style_guide, options))
        .collect()
}

/// Like [`suggest`], but consults `model` when the pure path falls back to
/// the template. The model call is bounded by `timeout`; on error or timeout
/// the templated suggestion is returned unchanged (a degraded result, not a
/// failure).
pub async fn suggest_with_model(
    text: &str,
    resources: &[Resource],
    locale: Locale,
    product: Option<Product>,
    style_guide: Option<&str>,
    options: MatchOptions,
    model: &dyn SuggestionModel,
    timeout: Duration,
) -> Suggestion {
    let base = suggest(text, resources, locale, product, style_guide, options);
    if !matches!(base.source, SuggestionSource::Template) {
        return base;
    }

    match tokio::time::timeout(timeout, model.improve(text.trim(), locale, style_guide)).await {
        Ok(Ok(improved)) => Suggestion {
            suggestion: improved,
            rationale: base.rationale,
            confidence: GENERATIVE_CONFIDENCE,
            source: SuggestionSource::Generative {
                model: model.name().to_string(),
            },
        },
        Ok(Err(error)) => {
            warn!(model = model.name(), %error, "suggestion model failed, using template fallback");
            base
        }
        Err(_) => {
            warn!(
                model = model.name(),
                timeout_ms = timeout.as_millis() as u64,
                "suggestion model timed out, using template fallback"
            );
            base
        }
    }
}

fn registered_rationale(locale: Locale, key: &str) -> String {
    match locale {
        Locale::KoKr => format!("이미 등록된 리소스입니다: \"{}\"", key),
        _ => format!("Already registered as resource \"{}\"", key),
    }
}

fn similar_rationale(locale: Locale, key: &str) -> String {
    match locale {
        Locale::KoKr => format!("기존 리소스에서 유사한 표현을 찾았습니다: \"{}\"", key),
        _ => format!("Found similar expression in existing resources: \"{}\"", key),
    }
}

fn variant_note(locale: Locale, product: Product) -> String {
    let name = product.variant().display_name();
    match locale {
        Locale::KoKr => format!(" {} 전용 표현으로 개선했습니다.", name),
        _ => format!(" Improved with {} specific expression.", name),
    }
}

fn template_rationale(locale: Locale) -> String {
    match locale {
        Locale::KoKr => "더 명확하고 일관된 표현으로 개선했습니다.".to_string(),
        _ => "Improved for clarity and consistency.".to_string(),
    }
}

fn template_marker(locale: Locale) -> &'static str {
    match locale {
        Locale::KoKr => " (개선 제안)",
        Locale::EnUs => " (suggested)",
        _ => " (建议)",
    }
}

fn append_notes(
    rationale: &mut String,
    locale: Locale,
    product: Option<Product>,
    style_guide: Option<&str>,
) {
    // Only the Korean and English paths carry the extra guidance notes.
    if !matches!(locale, Locale::KoKr | Locale::EnUs) {
        return;
    }
    if let Some(guide) = style_guide {
        match locale {
            Locale::KoKr => rationale.push_str(&format!(" 스타일 가이드 \"{}\"를 적용했습니다.", guide)),
            _ => rationale.push_str(&format!(" Applied style guide: \"{}\".", guide)),
        }
    }
    if let Some(product) = product {
        match locale {
            Locale::KoKr => rationale.push_str(&format!(
                " {} 제품의 톤앤매너를 고려했습니다.",
                product.display_name()
            )),
            _ => rationale.push_str(&format!(
                " Considered {} product tone and manner.",
                product.display_name()
            )),
        }
    }
}

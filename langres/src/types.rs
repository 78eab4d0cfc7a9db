//! Core types for langres: locales, products, and the resource record.
//! The matching, audit, and suggestion engines all operate on these.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Supported language-region codes.
///
/// The set is closed: resources only ever carry translations for these five
/// locales, and every wire representation uses the literal tags below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Locale {
    #[serde(rename = "ko-KR")]
    KoKr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "ja-JP")]
    JaJp,
    #[serde(rename = "vi-VN")]
    ViVn,
}

impl Locale {
    pub const ALL: [Locale; 5] = [
        Locale::KoKr,
        Locale::EnUs,
        Locale::ZhCn,
        Locale::JaJp,
        Locale::ViVn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::KoKr => "ko-KR",
            Locale::EnUs => "en-US",
            Locale::ZhCn => "zh-CN",
            Locale::JaJp => "ja-JP",
            Locale::ViVn => "vi-VN",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko-kr" | "ko" => Ok(Locale::KoKr),
            "en-us" | "en" => Ok(Locale::EnUs),
            "zh-cn" | "zh" => Ok(Locale::ZhCn),
            "ja-jp" | "ja" => Ok(Locale::JaJp),
            "vi-vn" | "vi" => Ok(Locale::ViVn),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}

/// Product tags a resource can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Knox,
    Brity,
}

impl Product {
    /// The product-specific override block this product reads from.
    pub fn variant(self) -> ProductVariant {
        match self {
            Product::Knox => ProductVariant::KnoxTeams,
            Product::Brity => ProductVariant::BrityMessenger,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Product::Knox => "Knox",
            Product::Brity => "Brity",
        }
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Product::Knox => write!(f, "knox"),
            Product::Brity => write!(f, "brity"),
        }
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "knox" => Ok(Product::Knox),
            "brity" => Ok(Product::Brity),
            _ => Err(format!("Unknown product: {}", s)),
        }
    }
}

/// Keys of the per-product translation override block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductVariant {
    KnoxTeams,
    BrityMessenger,
}

impl ProductVariant {
    pub fn product(self) -> Product {
        match self {
            ProductVariant::KnoxTeams => Product::Knox,
            ProductVariant::BrityMessenger => Product::Brity,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProductVariant::KnoxTeams => "Knox Teams",
            ProductVariant::BrityMessenger => "Brity Messenger",
        }
    }
}

/// Review status of a resource.
///
/// Status affects repository health scoring only; it never affects matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Approved,
    Draft,
    Review,
}

impl Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceStatus::Approved => write!(f, "approved"),
            ResourceStatus::Draft => write!(f, "draft"),
            ResourceStatus::Review => write!(f, "review"),
        }
    }
}

impl FromStr for ResourceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Ok(ResourceStatus::Approved),
            "draft" => Ok(ResourceStatus::Draft),
            "review" => Ok(ResourceStatus::Review),
            _ => Err(format!("Unknown resource status: {}", s)),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Free-text classification of a resource.
///
/// `common` marks a resource that is not product-specific. All text fields
/// are optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "is_false")]
    pub common: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artboard: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl Category {
    /// Case-insensitive substring test over all text fields.
    ///
    /// This is the single filtering policy for category filters everywhere in
    /// the crate.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        [
            &self.section1,
            &self.section2,
            &self.artboard,
            &self.component,
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Authorship and lifecycle dates for a resource.
///
/// Dates are plain `YYYY-MM-DD` strings; `updated_at` is refreshed on every
/// field mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,

    #[serde(default)]
    pub author: String,
}

/// A single localizable string entry.
///
/// Persisted as one element of a flat JSON array. Optional locales and the
/// `productSpecific` block may be absent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    /// Store-assigned identifier, immutable after creation.
    pub id: String,

    /// Human-assigned logical name (e.g. `"homepage.title"`).
    #[serde(default)]
    pub key: String,

    /// Products that use this resource.
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub category: Category,

    /// Generic translations by locale.
    #[serde(default)]
    pub translations: BTreeMap<Locale, String>,

    /// Per-product override translations. Generic text wins by default; see
    /// `matcher::MatchOptions`.
    #[serde(
        rename = "productSpecific",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub product_specific: BTreeMap<ProductVariant, BTreeMap<Locale, String>>,

    pub status: ResourceStatus,

    pub metadata: ResourceMetadata,
}

impl Resource {
    /// Non-empty generic translation for a locale, if present.
    pub fn translation(&self, locale: Locale) -> Option<&str> {
        self.translations
            .get(&locale)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// Non-empty product-specific translation for a variant and locale.
    pub fn variant_translation(&self, variant: ProductVariant, locale: Locale) -> Option<&str> {
        self.product_specific
            .get(&variant)?
            .get(&locale)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// All non-empty product-specific translations for a locale.
    pub fn variant_translations(
        &self,
        locale: Locale,
    ) -> impl Iterator<Item = (ProductVariant, &str)> {
        self.product_specific.iter().filter_map(move |(variant, texts)| {
            texts
                .get(&locale)
                .map(String::as_str)
                .filter(|text| !text.trim().is_empty())
                .map(|text| (*variant, text))
        })
    }

    pub fn has_product(&self, product: Product) -> bool {
        self.products.contains(&product)
    }

    pub fn is_common(&self) -> bool {
        self.category.common
    }

    /// Checks the record-level invariants: non-empty Korean text and at least
    /// one of a product tag or the common flag.
    pub fn validate(&self) -> Result<(), Error> {
        if self.translation(Locale::KoKr).is_none() {
            return Err(Error::validation(format!(
                "resource {}: Korean (ko-KR) text is required",
                self.id
            )));
        }
        if self.products.is_empty() && !self.is_common() {
            return Err(Error::validation(format!(
                "resource {}: at least one product or the common flag is required",
                self.id
            )));
        }
        Ok(())
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Resource {{ id: {}, key: {}, status: {} }}",
            self.id, self.key, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn sample_json() -> &'static str {
        indoc! {r#"
            {
              "id": "1",
              "key": "login.button",
              "products": ["knox"],
              "category": { "section1": "인증", "component": "Button" },
              "translations": { "ko-KR": "로그인", "en-US": "Log In" },
              "productSpecific": { "knoxTeams": { "ko-KR": "Knox 로그인" } },
              "status": "approved",
              "metadata": { "createdAt": "2024-01-15", "updatedAt": "2024-01-15", "author": "designer1" }
            }
        "#}
    }

    #[test]
    fn test_resource_deserialization() {
        let resource: Resource = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(resource.id, "1");
        assert_eq!(resource.key, "login.button");
        assert_eq!(resource.products, vec![Product::Knox]);
        assert_eq!(resource.translation(Locale::KoKr), Some("로그인"));
        assert_eq!(resource.translation(Locale::EnUs), Some("Log In"));
        assert_eq!(resource.translation(Locale::JaJp), None);
        assert_eq!(
            resource.variant_translation(ProductVariant::KnoxTeams, Locale::KoKr),
            Some("Knox 로그인")
        );
        assert_eq!(resource.status, ResourceStatus::Approved);
        assert_eq!(resource.metadata.author, "designer1");
    }

    #[test]
    fn test_resource_roundtrip() {
        let resource: Resource = serde_json::from_str(sample_json()).unwrap();
        let encoded = serde_json::to_string(&resource).unwrap();
        let decoded: Resource = serde_json::from_str(&encoded).unwrap();
        assert_eq!(resource, decoded);
        assert!(encoded.contains("\"ko-KR\""));
        assert!(encoded.contains("\"productSpecific\""));
        assert!(encoded.contains("\"createdAt\""));
    }

    #[test]
    fn test_missing_optional_blocks_tolerated() {
        let minimal = indoc! {r#"
            {
              "id": "2",
              "key": "min",
              "translations": { "ko-KR": "저장" },
              "category": { "common": true },
              "status": "draft",
              "metadata": { "createdAt": "2024-02-01", "updatedAt": "2024-02-01", "author": "a" }
            }
        "#};
        let resource: Resource = serde_json::from_str(minimal).unwrap();
        assert!(resource.products.is_empty());
        assert!(resource.product_specific.is_empty());
        assert!(resource.is_common());
        assert!(resource.validate().is_ok());
    }

    #[test]
    fn test_empty_translation_is_filtered() {
        let mut resource: Resource = serde_json::from_str(sample_json()).unwrap();
        resource
            .translations
            .insert(Locale::ZhCn, "   ".to_string());
        assert_eq!(resource.translation(Locale::ZhCn), None);
    }

    #[test]
    fn test_validate_requires_korean() {
        let mut resource: Resource = serde_json::from_str(sample_json()).unwrap();
        resource.translations.remove(&Locale::KoKr);
        assert!(resource.validate().is_err());
    }

    #[test]
    fn test_validate_requires_product_or_common() {
        let mut resource: Resource = serde_json::from_str(sample_json()).unwrap();
        resource.products.clear();
        resource.category.common = false;
        assert!(resource.validate().is_err());

        resource.category.common = true;
        assert!(resource.validate().is_ok());
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!(Locale::from_str("ko-KR").unwrap(), Locale::KoKr);
        assert_eq!(Locale::from_str("EN-us").unwrap(), Locale::EnUs);
        assert_eq!(Locale::from_str("ja").unwrap(), Locale::JaJp);
        assert!(Locale::from_str("fr-FR").is_err());
    }

    #[test]
    fn test_product_from_str_and_variant() {
        assert_eq!(Product::from_str("knox").unwrap(), Product::Knox);
        assert_eq!(Product::from_str("Brity").unwrap(), Product::Brity);
        assert!(Product::from_str("acme").is_err());
        assert_eq!(Product::Knox.variant(), ProductVariant::KnoxTeams);
        assert_eq!(ProductVariant::BrityMessenger.product(), Product::Brity);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            ResourceStatus::from_str("approved").unwrap(),
            ResourceStatus::Approved
        );
        assert_eq!(
            ResourceStatus::from_str("REVIEW").unwrap(),
            ResourceStatus::Review
        );
        assert!(ResourceStatus::from_str("published").is_err());
    }

    #[test]
    fn test_category_matches_is_case_insensitive_substring() {
        let category = Category {
            common: false,
            section1: Some("인증".to_string()),
            section2: None,
            artboard: Some("Login Screen".to_string()),
            component: Some("Button".to_string()),
        };
        assert!(category.matches("button"));
        assert!(category.matches("login"));
        assert!(category.matches("인증"));
        assert!(!category.matches("checkbox"));
    }

    #[test]
    fn test_resource_display() {
        let resource: Resource = serde_json::from_str(sample_json()).unwrap();
        let display = format!("{}", resource);
        assert!(display.contains("login.button"));
        assert!(display.contains("approved"));
    }
}

//! Repository-wide health reporting over a flat resource list.
//!
//! Unlike the document audit, this looks at the resources themselves:
//! missing English translations, product-assignment inconsistencies, and
//! review status, aggregated into a weighted 0–100 score.

use serde::{Deserialize, Serialize};

use crate::types::{Locale, Product, Resource, ResourceStatus};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MissingTranslation {
    pub id: String,
    pub korean_text: String,
    pub missing_locales: Vec<Locale>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProductIssue {
    pub id: String,
    pub korean_text: String,
    pub issue: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RepoStats {
    pub total_resources: usize,
    pub approved: usize,
    pub draft: usize,
    pub review: usize,
    pub knox_resources: usize,
    pub brity_resources: usize,
    pub common_resources: usize,
    pub english_translations: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthReport {
    pub health_score: u32,
    pub stats: RepoStats,
    pub missing_translations: Vec<MissingTranslation>,
    pub inconsistent_products: Vec<ProductIssue>,
    pub recommendations: Vec<String>,
}

/// Builds the health report for a resource list, optionally restricted to
/// one product.
///
/// A resource can contribute several inconsistency records (one per failed
/// check), and the score ratio divides record counts by the resource count:
/// `score = round(max(0, 100 - missing/total*50 - inconsistent/total*30
/// - draft/total*10 - review/total*10))`, or 100 for an empty list.
pub fn health_report(resources: &[Resource], product: Option<Product>) -> HealthReport {
    let pool: Vec<&Resource> = resources
        .iter()
        .filter(|resource| product.is_none_or(|p| resource.has_product(p)))
        .collect();

    let mut missing_translations = Vec::new();
    let mut inconsistent_products = Vec::new();

    for resource in &pool {
        let korean_text = resource
            .translation(Locale::KoKr)
            .unwrap_or_default()
            .to_string();

        if resource.translation(Locale::EnUs).is_none() {
            missing_translations.push(MissingTranslation {
                id: resource.id.clone(),
                korean_text: korean_text.clone(),
                missing_locales: vec![Locale::EnUs],
            });
        }

        if resource.products.is_empty() && !resource.is_common() {
            inconsistent_products.push(ProductIssue {
                id: resource.id.clone(),
                korean_text: korean_text.clone(),
                issue: "No products assigned (knox, brity, or common)".to_string(),
            });
        }

        if resource.translation(Locale::KoKr).is_none() {
            inconsistent_products.push(ProductIssue {
                id: resource.id.clone(),
                korean_text: korean_text.clone(),
                issue: "Missing Korean text (main content)".to_string(),
            });
        }

        if resource.metadata.author.trim().is_empty() {
            inconsistent_products.push(ProductIssue {
                id: resource.id.clone(),
                korean_text,
                issue: "Missing author information".to_string(),
            });
        }
    }

    let stats = RepoStats {
        total_resources: pool.len(),
        approved: count_status(&pool, ResourceStatus::Approved),
        draft: count_status(&pool, ResourceStatus::Draft),
        review: count_status(&pool, ResourceStatus::Review),
        knox_resources: pool.iter().filter(|r| r.has_product(Product::Knox)).count(),
        brity_resources: pool.iter().filter(|r| r.has_product(Product::Brity)).count(),
        common_resources: pool.iter().filter(|r| r.is_common()).count(),
        english_translations: pool
            .iter()
            .filter(|r| r.translation(Locale::EnUs).is_some())
            .count(),
    };

    let health_score = score(
        &stats,
        missing_translations.len(),
        inconsistent_products.len(),
    );
    let recommendations = recommendations(&stats, &missing_translations, &inconsistent_products);

    HealthReport {
        health_score,
        stats,
        missing_translations,
        inconsistent_products,
        recommendations,
    }
}

fn count_status(pool: &[&Resource], status: ResourceStatus) -> usize {
    pool.iter().filter(|r| r.status == status).count()
}

fn score(stats: &RepoStats, missing: usize, inconsistent: usize) -> u32 {
    if stats.total_resources == 0 {
        return 100;
    }
    let total = stats.total_resources as f64;
    let penalty = (missing as f64 / total) * 50.0
        + (inconsistent as f64 / total) * 30.0
        + (stats.draft as f64 / total) * 10.0
        + (stats.review as f64 / total) * 10.0;
    (100.0 - penalty).max(0.0).round() as u32
}

fn recommendations(
    stats: &RepoStats,
    missing: &[MissingTranslation],
    inconsistent: &[ProductIssue],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing.is_empty() {
        recommendations.push(format!(
            "Complete missing translations for {} resources",
            missing.len()
        ));
    }
    if !inconsistent.is_empty() {
        recommendations.push(format!(
            "Fix product assignments for {} resources",
            inconsistent.len()
        ));
    }
    if stats.draft > 0 {
        recommendations.push(format!(
            "Review and approve {} draft resources",
            stats.draft
        ));
    }
    if stats.review > 0 {
        recommendations.push(format!(
            "Complete review process for {} resources",
            stats.review
        ));
    }
    if recommendations.is_empty() {
        recommendations.push("All resources are in good shape".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ResourceMetadata};
    use std::collections::BTreeMap;

    fn resource(id: &str, korean: &str, english: &str, status: ResourceStatus) -> Resource {
        let mut translations = BTreeMap::new();
        if !korean.is_empty() {
            translations.insert(Locale::KoKr, korean.to_string());
        }
        if !english.is_empty() {
            translations.insert(Locale::EnUs, english.to_string());
        }
        Resource {
            id: id.to_string(),
            key: format!("key.{}", id),
            products: vec![Product::Knox],
            category: Category::default(),
            translations,
            product_specific: BTreeMap::new(),
            status,
            metadata: ResourceMetadata {
                created_at: "2024-01-01".to_string(),
                updated_at: "2024-01-01".to_string(),
                author: "tester".to_string(),
            },
        }
    }

    #[test]
    fn test_healthy_repository_scores_100() {
        let resources = vec![
            resource("1", "로그인", "Log In", ResourceStatus::Approved),
            resource("2", "저장", "Save", ResourceStatus::Approved),
        ];
        let report = health_report(&resources, None);
        assert_eq!(report.health_score, 100);
        assert!(report.missing_translations.is_empty());
        assert!(report.inconsistent_products.is_empty());
        assert_eq!(
            report.recommendations,
            vec!["All resources are in good shape".to_string()]
        );
    }

    #[test]
    fn test_empty_repository_scores_100() {
        let report = health_report(&[], None);
        assert_eq!(report.health_score, 100);
        assert_eq!(report.stats.total_resources, 0);
    }

    #[test]
    fn test_score_formula() {
        // 4 resources: one missing English (50 * 1/4 = 12.5) and one draft
        // (10 * 1/4 = 2.5) -> 100 - 15 = 85.
        let resources = vec![
            resource("1", "로그인", "Log In", ResourceStatus::Approved),
            resource("2", "저장", "", ResourceStatus::Approved),
            resource("3", "닫기", "Close", ResourceStatus::Draft),
            resource("4", "확인", "OK", ResourceStatus::Approved),
        ];
        let report = health_report(&resources, None);
        assert_eq!(report.health_score, 85);
        assert_eq!(report.missing_translations.len(), 1);
        assert_eq!(report.stats.draft, 1);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut broken = resource("1", "", "", ResourceStatus::Draft);
        broken.products.clear();
        broken.metadata.author = String::new();
        // Missing English (50), three inconsistency records (3 * 30 = 90),
        // draft (10): the raw score is far below zero.
        let report = health_report(&[broken], None);
        assert_eq!(report.health_score, 0);
        assert_eq!(report.inconsistent_products.len(), 3);
    }

    #[test]
    fn test_inconsistency_detection() {
        let mut no_products = resource("1", "로그인", "Log In", ResourceStatus::Approved);
        no_products.products.clear();

        let mut common = resource("2", "저장", "Save", ResourceStatus::Approved);
        common.products.clear();
        common.category.common = true;

        let mut no_author = resource("3", "닫기", "Close", ResourceStatus::Approved);
        no_author.metadata.author = "  ".to_string();

        let report = health_report(&[no_products, common, no_author], None);
        assert_eq!(report.inconsistent_products.len(), 2);
        assert!(report.inconsistent_products[0].issue.contains("No products"));
        assert!(report.inconsistent_products[1].issue.contains("author"));
    }

    #[test]
    fn test_product_filter_restricts_pool() {
        let mut brity = resource("2", "로그아웃", "", ResourceStatus::Approved);
        brity.products = vec![Product::Brity];
        let resources = vec![
            resource("1", "로그인", "Log In", ResourceStatus::Approved),
            brity,
        ];

        let knox_report = health_report(&resources, Some(Product::Knox));
        assert_eq!(knox_report.stats.total_resources, 1);
        assert_eq!(knox_report.health_score, 100);

        let brity_report = health_report(&resources, Some(Product::Brity));
        assert_eq!(brity_report.stats.total_resources, 1);
        // Missing English: 100 - 50 = 50.
        assert_eq!(brity_report.health_score, 50);
    }

    #[test]
    fn test_stats_counters() {
        let mut common = resource("3", "공통", "Common", ResourceStatus::Review);
        common.category.common = true;
        common.products = vec![Product::Knox, Product::Brity];
        let resources = vec![
            resource("1", "로그인", "Log In", ResourceStatus::Approved),
            resource("2", "저장", "", ResourceStatus::Draft),
            common,
        ];

        let report = health_report(&resources, None);
        assert_eq!(report.stats.total_resources, 3);
        assert_eq!(report.stats.approved, 1);
        assert_eq!(report.stats.draft, 1);
        assert_eq!(report.stats.review, 1);
        assert_eq!(report.stats.knox_resources, 3);
        assert_eq!(report.stats.brity_resources, 1);
        assert_eq!(report.stats.common_resources, 1);
        assert_eq!(report.stats.english_translations, 2);
    }

    #[test]
    fn test_recommendations_list() {
        let resources = vec![
            resource("1", "로그인", "", ResourceStatus::Draft),
            resource("2", "저장", "Save", ResourceStatus::Review),
        ];
        let report = health_report(&resources, None);
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.recommendations[0].contains("missing translations"));
        assert!(report.recommendations[1].contains("draft"));
        assert!(report.recommendations[2].contains("review process"));
    }
}

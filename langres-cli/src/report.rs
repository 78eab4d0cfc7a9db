//! Printing for search, audit, check, health, and suggest results, in both
//! human-readable and JSON forms.

use langres::{
    DocumentAuditReport, HealthReport, Locale, SearchResults, Suggestion, TextAuditReport,
};

pub fn print_search(results: &SearchResults, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(results).unwrap());
        return;
    }

    println!("=== Search ===");
    println!("Total: {}", results.total);
    println!("Shown: {}", results.data.len());
    for resource in &results.data {
        println!(
            "  [{}] {}  ko-KR: {}  en-US: {}",
            resource.id,
            resource.key,
            resource.translation(Locale::KoKr).unwrap_or("-"),
            resource.translation(Locale::EnUs).unwrap_or("-")
        );
    }
}

pub fn print_document_audit(report: &DocumentAuditReport, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(report).unwrap());
        return;
    }

    println!("=== Document audit ===");
    println!("Texts: {}", report.stats.total_texts);
    println!("Matched: {}", report.stats.matched);
    println!("Coverage: {}%", report.summary.coverage);
    println!("Score: {}", report.summary.overall_score);
    println!("Issues: {}", report.stats.issues_found);

    for issue in &report.issues {
        println!("\n  [{:?}] {}", issue.priority, issue.title);
        println!("    Location: {}", issue.location);
        println!("    {}", issue.description);
        println!("    Recommendation: {}", issue.recommendation);
    }
}

pub fn print_text_audit(report: &TextAuditReport, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(report).unwrap());
        return;
    }

    println!("=== Check ===");
    println!(
        "Total: {}, Matched: {}, Missing: {}",
        report.stats.total, report.stats.matched, report.stats.missing
    );
    for matched in &report.matched {
        println!(
            "  \"{}\" -> \"{}\" ({:?}, {})",
            matched.input, matched.matched_text, matched.kind, matched.resource.key
        );
    }
    for missing in &report.missing {
        println!("  \"{}\" -> no match", missing);
    }
}

pub fn print_health(report: &HealthReport, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(report).unwrap());
        return;
    }

    println!("=== Repository health ===");
    println!("Score: {}", report.health_score);
    println!("Resources: {}", report.stats.total_resources);
    println!(
        "By status: approved {}, draft {}, review {}",
        report.stats.approved, report.stats.draft, report.stats.review
    );
    println!(
        "Products: knox {}, brity {}, common {}",
        report.stats.knox_resources, report.stats.brity_resources, report.stats.common_resources
    );
    println!(
        "English translations: {}/{}",
        report.stats.english_translations, report.stats.total_resources
    );

    if !report.missing_translations.is_empty() {
        println!("\nMissing translations:");
        for missing in &report.missing_translations {
            println!("  [{}] {}", missing.id, missing.korean_text);
        }
    }
    if !report.inconsistent_products.is_empty() {
        println!("\nInconsistencies:");
        for issue in &report.inconsistent_products {
            println!("  [{}] {}", issue.id, issue.issue);
        }
    }

    println!("\nRecommendations:");
    for recommendation in &report.recommendations {
        println!("  - {}", recommendation);
    }
}

pub fn print_suggestion(suggestion: &Suggestion, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(suggestion).unwrap());
        return;
    }

    println!("Suggestion: {}", suggestion.suggestion);
    println!("Rationale: {}", suggestion.rationale);
    println!("Confidence: {:.2}", suggestion.confidence);
}

use langres::{Locale, Resource};

/// Print a view of the resources in a resource file.
pub fn print_view(resources: &[Resource], locale_filter: Option<Locale>, full: bool) {
    if resources.is_empty() {
        eprintln!("No resources found");
        std::process::exit(1);
    }

    println!("Found {} resource(s)", resources.len());

    for (i, resource) in resources.iter().enumerate() {
        println!("\n=== Resource {} (id {}) ===", i + 1, resource.id);
        println!("Key: {}", resource.key);
        println!("Status: {}", resource.status);
        println!("Products: {}", products_display(resource));
        if let Some(section1) = &resource.category.section1 {
            println!("Section: {}", section1);
        }
        if let Some(component) = &resource.category.component {
            println!("Component: {}", component);
        }
        println!("Author: {}", resource.metadata.author);

        for (locale, text) in &resource.translations {
            if locale_filter.is_some_and(|filter| filter != *locale) {
                continue;
            }
            println!("  {}: {}", locale, truncated(text, full));
        }

        for (variant, texts) in &resource.product_specific {
            for (locale, text) in texts {
                if locale_filter.is_some_and(|filter| filter != *locale) {
                    continue;
                }
                println!(
                    "  {} ({}): {}",
                    locale,
                    variant.display_name(),
                    truncated(text, full)
                );
            }
        }
    }
}

fn products_display(resource: &Resource) -> String {
    let mut names: Vec<&str> = resource
        .products
        .iter()
        .map(|product| product.display_name())
        .collect();
    if resource.is_common() {
        names.push("공통");
    }
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

fn truncated(value: &str, full: bool) -> String {
    if full || value.chars().count() <= 50 {
        value.to_string()
    } else {
        let cut: String = value.chars().take(50).collect();
        format!("{}...", cut)
    }
}

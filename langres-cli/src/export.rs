//! CSV export: one row per resource with a column per locale.

use std::path::Path;

use langres::{Locale, Resource};

pub fn export_csv(resources: &[Resource], output: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(output)?;

    let mut header = vec![
        "id".to_string(),
        "key".to_string(),
        "status".to_string(),
        "products".to_string(),
        "author".to_string(),
    ];
    header.extend(Locale::ALL.iter().map(|locale| locale.to_string()));
    writer.write_record(&header)?;

    for resource in resources {
        let mut record = vec![
            resource.id.clone(),
            resource.key.clone(),
            resource.status.to_string(),
            resource
                .products
                .iter()
                .map(|product| product.to_string())
                .collect::<Vec<_>>()
                .join("|"),
            resource.metadata.author.clone(),
        ];
        record.extend(
            Locale::ALL
                .iter()
                .map(|locale| resource.translations.get(locale).cloned().unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(resources.len())
}

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::GlobalOptions;

pub fn run(options: &GlobalOptions) -> Result<(), String> {
    let loader = super::loader(options)?;
    let registry = loader.registry();
    let factory = loader.factory();

    for base in registry.bases() {
        println!("  {} [{}]", base.bold(), "abstract".dimmed());

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Variant", "Fields", "Commands"]);

        for variant in registry.variants(base).unwrap_or_default() {
            let fields: Vec<&str> = variant.fields().iter().map(|f| f.name()).collect();
            let commands: Vec<&str> = factory
                .names()
                .filter(|name| factory.parameter_type(name) == Some(variant.name()))
                .collect();
            table.add_row(vec![
                variant.name().to_string(),
                fields.join(", "),
                if commands.is_empty() {
                    "—".to_string()
                } else {
                    commands.join(", ")
                },
            ]);
        }
        println!("{table}");
        println!();
    }

    let conflicts = registry.shape_conflicts();
    if conflicts.is_empty() {
        println!("  No shape conflicts.");
    } else {
        for conflict in &conflicts {
            println!(
                "  {} {} variants {} share fields {{{}}}",
                "warning:".yellow(),
                conflict.base,
                conflict.variants.join(", "),
                conflict.fields.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }
    }
    Ok(())
}

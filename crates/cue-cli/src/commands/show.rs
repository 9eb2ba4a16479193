use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use cue_script::{CommandData, Parameters};

use crate::GlobalOptions;

pub fn run(options: &GlobalOptions, file: &Path) -> Result<(), String> {
    let loader = super::loader(options)?;
    let source = super::read_script(file)?;
    let entries = loader
        .parse_str(&source)
        .map_err(|err| super::report(file, &source, &err))?;

    if entries.is_empty() {
        println!("  No commands found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Command", "Parameters", "Values"]);

    for (i, entry) in entries.iter().enumerate() {
        let known = loader.factory().contains(&entry.command_name);
        let command = if known {
            entry.command_name.clone()
        } else {
            format!("{} (unknown)", entry.command_name)
        };
        let variant = entry
            .parameters
            .as_ref()
            .map_or("—", Parameters::type_name)
            .to_string();
        table.add_row(vec![(i + 1).to_string(), command, variant, values(entry)]);
    }

    println!("{table}");
    println!();
    println!("  {} commands", entries.len());

    Ok(())
}

fn values(entry: &CommandData) -> String {
    match &entry.parameters {
        Some(Parameters::ShowDialog(p)) => format!(
            "character={}, text={}, position={}",
            p.character, p.text, p.position
        ),
        Some(Parameters::SwitchScene(p)) => format!("sceneName={}", p.scene_name),
        None => "—".to_string(),
    }
}

use std::path::PathBuf;

use colored::Colorize;
use cue_json::diagnostics::{control_character_warnings, render_diagnostics};
use cue_script::ScriptLoader;
use tracing::debug;

use crate::GlobalOptions;

pub fn run(options: &GlobalOptions, paths: &[PathBuf]) -> Result<(), String> {
    let loader = super::loader(options)?;
    let files = expand(&loader, paths)?;
    debug!(files = files.len(), "checking_scripts");

    let mut failed = 0;
    for file in &files {
        let source = match super::read_script(file) {
            Ok(source) => source,
            Err(message) => {
                failed += 1;
                eprintln!("  {} {message}", "failed".red());
                continue;
            }
        };
        match loader.load_str(&source) {
            Ok(commands) => {
                println!(
                    "  {} {} ({} command{})",
                    "ok".green(),
                    file.display(),
                    commands.len(),
                    if commands.len() == 1 { "" } else { "s" }
                );
                let warnings = control_character_warnings(&source);
                if !warnings.is_empty() {
                    let filename = file.display().to_string();
                    eprint!("{}", render_diagnostics(&source, &filename, &warnings));
                }
            }
            Err(err) => {
                failed += 1;
                let message = super::report(file, &source, &err);
                eprintln!("  {} {message}", "failed".red());
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} scripts failed", files.len()));
    }
    println!("  All checks passed for {} script{}.", files.len(), if files.len() == 1 { "" } else { "s" });
    Ok(())
}

/// Files are taken as given; directories contribute their script files.
fn expand(loader: &ScriptLoader, paths: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = loader.script_files(path).map_err(|e| e.to_string())?;
            if found.is_empty() {
                return Err(format!("no scripts found in {}", path.display()));
            }
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}


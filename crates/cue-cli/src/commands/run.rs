use std::path::Path;

use colored::Colorize;
use cue_script::{ScriptRunner, StageEvent};

use crate::GlobalOptions;

pub fn run(options: &GlobalOptions, file: &Path) -> Result<(), String> {
    let loader = super::loader(options)?;
    let source = super::read_script(file)?;
    let commands = loader
        .load_str(&source)
        .map_err(|err| super::report(file, &source, &err))?;

    let mut runner = ScriptRunner::new(commands);
    let mut printed = 0;
    while runner.step() {
        for event in &runner.context().events()[printed..] {
            print_event(event);
        }
        printed = runner.context().events().len();
    }

    println!();
    println!("  {} commands executed", runner.executed());
    if let Some(scene) = runner.context().scene() {
        println!("  final scene: {}", scene.bold());
    }
    Ok(())
}

fn print_event(event: &StageEvent) {
    match event {
        StageEvent::Dialog {
            character,
            text,
            position,
        } => println!("  {} {}: {text}", character.bold(), format!("[{position}]").dimmed()),
        StageEvent::SceneSwitch { scene } => {
            println!("  {} {}", "scene ->".cyan(), scene.bold());
        }
    }
}

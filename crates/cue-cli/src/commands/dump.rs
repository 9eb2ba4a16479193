use std::path::Path;

use crate::GlobalOptions;

pub fn run(options: &GlobalOptions, file: &Path, pretty: bool) -> Result<(), String> {
    let loader = super::loader(options)?;
    let source = super::read_script(file)?;
    let value = loader
        .normalize_str(&source)
        .map_err(|err| super::report(file, &source, &err))?;

    if pretty {
        println!("{}", cue_json::to_string_pretty(&value));
    } else {
        println!("{value}");
    }
    Ok(())
}

pub mod check;
pub mod dump;
pub mod run;
pub mod schema;
pub mod show;

use std::path::Path;

use cue_json::diagnostics::{Diagnostic, render_diagnostics};
use cue_schema::VariantMatching;
use cue_script::{LoaderConfig, ScriptError, ScriptLoader};

use crate::GlobalOptions;

/// Build a loader from the global flags.
fn loader(options: &GlobalOptions) -> Result<ScriptLoader, String> {
    let matching = if options.ignore_extra_keys {
        VariantMatching::IgnoreExtraKeys
    } else {
        VariantMatching::Exact
    };
    let config = LoaderConfig::default()
        .with_matching(matching)
        .with_skip_unknown_commands(options.skip_unknown);
    ScriptLoader::new(config).map_err(|e| e.to_string())
}

fn read_script(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Print a parse error with source context via ariadne, and return the
/// one-line message for any error.
fn report(path: &Path, source: &str, err: &ScriptError) -> String {
    if let ScriptError::Parse(parse) = err.root_cause() {
        let filename = path.display().to_string();
        let rendered = render_diagnostics(source, &filename, &[Diagnostic::from(parse)]);
        eprint!("{rendered}");
    }
    format!("{}: {err}", path.display())
}

use std::path::PathBuf;

use odrive_lib::{Diagnostics, DiagnosticsPrinter, LoadConfig};

use super::input::load_or_exit;

pub struct CheckArgs {
    pub input: PathBuf,
    pub strict: bool,
    pub color: bool,
    pub config: LoadConfig,
}

pub fn run(args: CheckArgs) {
    let (document, _map, diagnostics) = load_or_exit(&args.input, args.config);

    if !diagnostics.is_empty() {
        let rendered = DiagnosticsPrinter::new(&diagnostics)
            .source(&document.text)
            .path(&document.path)
            .colored(args.color)
            .render();
        eprint!("{}", rendered);
    }

    if !passes(&diagnostics, args.strict) {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

/// Errors always fail; warnings only with `--strict`.
pub fn passes(diagnostics: &Diagnostics, strict: bool) -> bool {
    !diagnostics.has_errors() && !(strict && diagnostics.has_warnings())
}

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use odrive_lib::map::Map;
use odrive_lib::{Diagnostics, LoadConfig, Loader};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),
}

/// Document text together with the name diagnostics refer to.
pub struct Document {
    pub path: String,
    pub text: String,
}

/// Reads a file, or stdin for "-".
pub fn read_document(path: &Path) -> Result<Document, InputError> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(InputError::Stdin)?;
        return Ok(Document {
            path: "<stdin>".to_string(),
            text,
        });
    }

    let text = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read document");
    Ok(Document {
        path: path.display().to_string(),
        text,
    })
}

/// Reads and loads `path`, exiting with status 1 if either step fails.
pub fn load_or_exit(path: &Path, config: LoadConfig) -> (Document, Map, Diagnostics) {
    let document = match read_document(path) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    match Loader::new(&document.text).with_config(config).load() {
        Ok((map, diagnostics)) => (document, map, diagnostics),
        Err(err) => {
            eprintln!("error: {}: {}", document.path, err);
            std::process::exit(1);
        }
    }
}

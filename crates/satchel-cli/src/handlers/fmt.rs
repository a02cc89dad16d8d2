//! Format (normalize) command handler

use crate::cli::FmtArgs;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use satchel_core::{stamp_schema_url, to_pretty_string, DocumentParser, SchemaVersion};
use std::fs;
use tracing::{debug, instrument};

/// Handle the fmt command
#[instrument(skip(args, output), fields(file = %args.file.display(), write = args.write))]
pub fn handle_fmt(args: FmtArgs, output: &mut OutputWriter) -> Result<()> {
    if !args.file.exists() {
        return Err(Error::FileNotFound {
            path: args.file.clone(),
        });
    }

    let parser = DocumentParser::new();
    let mut document = if args.salvage {
        let salvaged = parser.salvage_file(&args.file)?;
        debug!(method = %salvaged.method, "document repaired");
        salvaged.value
    } else {
        parser.parse_file(&args.file)?
    };

    // Re-stamping pins the current URI before validation and lands the
    // requested version after, so the schema check always sees a
    // current-version URI whichever version the document arrived with.
    if args.schema_version.is_some() {
        stamp_schema_url(&mut document, SchemaVersion::V2_2_0);
    }

    let violations = satchel_core::validate(&document);
    if !violations.is_empty() {
        return Err(satchel_core::Error::validation(violations).into());
    }

    if let Some(version) = args.schema_version.filter(|v| *v != SchemaVersion::V2_2_0) {
        stamp_schema_url(&mut document, version);
        debug!(version = %version, "schema URI re-stamped");
    }

    if args.write {
        let formatted = to_pretty_string(&document)?;
        fs::write(&args.file, format!("{}\n", formatted))?;
        output.success(&format!("Rewrote {}", args.file.display()))?;
    } else {
        output.data(&document)?;
    }

    Ok(())
}

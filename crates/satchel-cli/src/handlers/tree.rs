//! Tree command handler

use crate::cli::{OutputFormat, TreeArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use satchel_core::Item;
use tracing::instrument;

/// Handle the tree command
#[instrument(skip(args, output), fields(file = %args.file.display()))]
pub fn handle_tree(args: TreeArgs, output: &mut OutputWriter) -> Result<()> {
    if !args.file.exists() {
        return Err(Error::FileNotFound {
            path: args.file.clone(),
        });
    }

    let collection = satchel_core::parse(&args.file)?;

    if output.format() == OutputFormat::Json {
        output.data(&collection)?;
        return Ok(());
    }

    output.writeln(&collection.info.name)?;
    for item in &collection.item {
        render_item(output, item, 1)?;
    }

    let folders = collection.items().filter(|i| i.is_folder()).count();
    let requests = collection.requests().count();
    output.info(&format!(
        "{} folder(s), {} request(s)",
        folders, requests
    ))?;

    Ok(())
}

/// One line per node, indented by depth; folders get a trailing slash
fn render_item(output: &mut OutputWriter, item: &Item, depth: usize) -> Result<()> {
    let indent = "  ".repeat(depth);

    if item.is_folder() {
        output.writeln(&format!("{}{}/", indent, item.name))?;
        for child in item.children() {
            render_item(output, child, depth + 1)?;
        }
    } else if let Some(request) = &item.request {
        output.writeln(&format!(
            "{}{} {} ({})",
            indent, request.method, item.name, request.url
        ))?;
    } else {
        output.writeln(&format!("{}{}", indent, item.name))?;
    }

    Ok(())
}

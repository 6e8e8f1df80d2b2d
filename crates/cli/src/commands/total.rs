use storefront_core::config::LoadOptions;

use crate::commands::{load_store, CommandResult};

pub fn run(options: &LoadOptions, json_output: bool) -> CommandResult {
    let (_, catalog) = match load_store("total", options) {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let message = format!("Total number of items in store: {}", catalog.total_quantity());
    if json_output {
        CommandResult::success("total", message)
    } else {
        CommandResult::text(message)
    }
}

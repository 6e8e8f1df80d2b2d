use std::io;

use storefront_core::config::LoadOptions;

use crate::commands::{load_store, CommandResult};
use crate::logging::init_logging;
use crate::render::Renderer;
use crate::session::{Session, SessionOptions};

pub fn run(options: &LoadOptions) -> CommandResult {
    let (config, catalog) = match load_store("shop", options) {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };
    init_logging(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        catalog,
        stdin.lock(),
        stdout.lock(),
        Renderer::from_config(&config.shop),
        SessionOptions::from(&config.shop),
    );

    match session.run() {
        Ok(_) => CommandResult::quiet(),
        Err(error) => CommandResult::failure(
            "shop",
            "terminal_io",
            format!("shopping session aborted: {error}"),
            5,
        ),
    }
}

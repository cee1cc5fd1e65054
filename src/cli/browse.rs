//! Grid and info commands: drive the gallery controller against the
//! terminal view.

use std::future::Future;
use std::io;
use std::process::ExitCode;

use crate::api::HttpSpeciesApi;
use crate::config::GalleryConfig;
use crate::controller::GalleryController;
use crate::models::SpeciesId;
use crate::placeholder::SvgPlaceholder;
use crate::resolve::ImageResolver;
use crate::terminal::TerminalView;

use super::{EXIT_ERROR, EXIT_SUCCESS};

type TerminalController = GalleryController<HttpSpeciesApi, TerminalView<io::Stdout, io::Stderr>>;

fn build_controller(config: &GalleryConfig, page_base: Option<&str>) -> Result<TerminalController, ExitCode> {
    let api = match HttpSpeciesApi::new(&config.api) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    let view = TerminalView::new(io::stdout(), io::stderr());
    let mut resolver = ImageResolver::new(&config.assets, &SvgPlaceholder::from(&config.placeholder));
    if let Some(base) = page_base {
        resolver = resolver.with_page_base(base);
    }

    Ok(GalleryController::from_config(api, view, config).with_resolver(resolver))
}

/// Run a future on a single-threaded runtime, like the browser event loop.
fn block_on<F: Future>(future: F) -> Result<F::Output, ExitCode> {
    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => Ok(runtime.block_on(future)),
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Execute the grid command
pub fn run_grid(config: &GalleryConfig, page_base: Option<&str>) -> ExitCode {
    let controller = match build_controller(config, page_base) {
        Ok(controller) => controller,
        Err(code) => return code,
    };

    match block_on(controller.load_grid()) {
        Ok(Ok(count)) => {
            if count == 0 {
                println!("(no species)");
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(Err(_)) => ExitCode::from(EXIT_ERROR),
        Err(code) => code,
    }
}

/// Execute the info command
pub fn run_info(config: &GalleryConfig, page_base: Option<&str>, id: &str) -> ExitCode {
    let controller = match build_controller(config, page_base) {
        Ok(controller) => controller,
        Err(code) => return code,
    };

    let id = SpeciesId::from(id);
    match block_on(controller.load_info(&id)) {
        Ok(Ok(_)) => ExitCode::from(EXIT_SUCCESS),
        Ok(Err(_)) => ExitCode::from(EXIT_ERROR),
        Err(code) => code,
    }
}

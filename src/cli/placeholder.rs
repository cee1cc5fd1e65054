//! Placeholder command

use std::process::ExitCode;

use crate::config::GalleryConfig;
use crate::placeholder::{PlaceholderProvider, SvgPlaceholder};

use super::EXIT_SUCCESS;

/// Execute the placeholder command
pub fn run_placeholder(config: &GalleryConfig, svg: bool) -> ExitCode {
    let placeholder = SvgPlaceholder::from(&config.placeholder);
    if svg {
        println!("{}", placeholder.to_svg());
    } else {
        println!("{}", placeholder.data_uri());
    }
    ExitCode::from(EXIT_SUCCESS)
}

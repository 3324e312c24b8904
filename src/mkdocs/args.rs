//! Argument assembly for the mkdocs subcommands.
//!
//! Pure mappings from option structs to ordered argument vectors. The tool
//! command prefix is prepended by the invocation layer, never here. Optional
//! settings are omitted entirely when unset; boolean pairs always emit
//! exactly one of their two flags.

use std::path::Path;

use crate::config::{BuildOptions, DeployOptions, ServeOptions};

/// Host used for `--dev-addr` when only a port is configured.
const DEFAULT_HOST: &str = "localhost";

/// Port used for `--dev-addr` when only a host is configured.
const DEFAULT_PORT: u16 = 8000;

/// Assemble the argument vector for `mkdocs build`.
#[must_use]
pub fn build_args(options: &BuildOptions, config_file: Option<&Path>, verbose: bool) -> Vec<String> {
    let mut args = vec!["build".to_string()];

    if verbose {
        args.push("--verbose".to_string());
    }

    if options.strict {
        args.push("--strict".to_string());
    }

    if options.clean {
        args.push("--clean".to_string());
    } else {
        args.push("--dirty".to_string());
    }

    if let Some(path) = config_file {
        args.push("--config-file".to_string());
        args.push(path.display().to_string());
    }

    if let Some(theme) = &options.theme {
        args.push("--theme".to_string());
        args.push(theme.clone());
    }

    if let Some(dir) = &options.theme_dir {
        args.push("--theme-dir".to_string());
        args.push(dir.display().to_string());
    }

    args.push("--site-dir".to_string());
    args.push(options.site_dir.display().to_string());

    args
}

/// Assemble the argument vector for `mkdocs serve`.
#[must_use]
pub fn serve_args(options: &ServeOptions, config_file: Option<&Path>, verbose: bool) -> Vec<String> {
    let mut args = vec!["serve".to_string()];

    if verbose {
        args.push("--verbose".to_string());
    }

    if options.strict {
        args.push("--strict".to_string());
    }

    if let Some(path) = config_file {
        args.push("--config-file".to_string());
        args.push(path.display().to_string());
    }

    if options.host.is_some() || options.port.is_some() {
        let addr = format!(
            "{}:{}",
            options.host.as_deref().unwrap_or(DEFAULT_HOST),
            options.port.unwrap_or(DEFAULT_PORT)
        );
        args.push("--dev-addr".to_string());
        args.push(addr);
    }

    if let Some(theme) = &options.theme {
        args.push("--theme".to_string());
        args.push(theme.clone());
    }

    if let Some(dir) = &options.theme_dir {
        args.push("--theme-dir".to_string());
        args.push(dir.display().to_string());
    }

    if options.livereload {
        args.push("--livereload".to_string());
    } else {
        args.push("--no-livereload".to_string());
    }

    args
}

/// Assemble the argument vector for `mkdocs gh-deploy`.
#[must_use]
pub fn deploy_args(
    options: &DeployOptions,
    config_file: Option<&Path>,
    verbose: bool,
) -> Vec<String> {
    let mut args = vec!["gh-deploy".to_string()];

    if verbose {
        args.push("--verbose".to_string());
    }

    if options.clean {
        args.push("--clean".to_string());
    } else {
        args.push("--dirty".to_string());
    }

    if let Some(path) = config_file {
        args.push("--config-file".to_string());
        args.push(path.display().to_string());
    }

    if let Some(message) = &options.message {
        args.push("--message".to_string());
        args.push(message.clone());
    }

    if let Some(branch) = &options.remote_branch {
        args.push("--remote-branch".to_string());
        args.push(branch.clone());
    }

    if let Some(name) = &options.remote_name {
        args.push("--remote-name".to_string());
        args.push(name.clone());
    }

    if options.force {
        args.push("--force".to_string());
    }

    args
}

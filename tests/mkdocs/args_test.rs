//! Tests for mkdocs argument assembly.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use mkdocs_runner::config::{BuildOptions, DeployOptions, ServeOptions};
use mkdocs_runner::mkdocs::{build_args, deploy_args, serve_args};

/// Flags that consume the following argument as their value.
const VALUE_FLAGS: &[&str] = &[
    "--config-file",
    "--theme",
    "--theme-dir",
    "--site-dir",
    "--dev-addr",
    "--message",
    "--remote-branch",
    "--remote-name",
];

/// Parse an argument vector back into its flag set and flag values.
fn parse_flags(args: &[String]) -> (HashSet<String>, HashMap<String, String>) {
    let mut flags = HashSet::new();
    let mut values = HashMap::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            let value = iter.next().expect("value flag without a value");
            values.insert(arg.clone(), value.clone());
        } else if arg.starts_with("--") {
            flags.insert(arg.clone());
        }
    }

    (flags, values)
}

#[test]
fn build_emits_subcommand_first() {
    let args = build_args(&BuildOptions::default(), None, false);
    assert_eq!(args[0], "build");
}

#[test]
fn clean_true_yields_clean_never_dirty() {
    let args = build_args(&BuildOptions::default(), None, false);
    assert!(args.contains(&"--clean".to_string()));
    assert!(!args.contains(&"--dirty".to_string()));
}

#[test]
fn clean_false_yields_dirty_never_clean() {
    let options = BuildOptions {
        clean: false,
        ..Default::default()
    };
    let args = build_args(&options, None, false);
    assert!(args.contains(&"--dirty".to_string()));
    assert!(!args.contains(&"--clean".to_string()));
}

#[test]
fn build_round_trip_recovers_options() {
    let options = BuildOptions {
        theme: Some("material".to_string()),
        theme_dir: Some(PathBuf::from("themes/custom")),
        strict: true,
        site_dir: PathBuf::from("out/site"),
        clean: false,
    };
    let args = build_args(&options, Some(Path::new("doc/mkdocs.yml")), true);
    let (flags, values) = parse_flags(&args);

    let expected_flags: HashSet<String> = ["--verbose", "--strict", "--dirty"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(flags, expected_flags);

    assert_eq!(values.get("--config-file").unwrap(), "doc/mkdocs.yml");
    assert_eq!(values.get("--theme").unwrap(), "material");
    assert_eq!(values.get("--theme-dir").unwrap(), "themes/custom");
    assert_eq!(values.get("--site-dir").unwrap(), "out/site");
}

#[test]
fn serve_round_trip_recovers_options() {
    let options = ServeOptions {
        host: Some("127.0.0.1".to_string()),
        port: Some(8080),
        theme: None,
        theme_dir: None,
        strict: false,
        livereload: false,
    };
    let args = serve_args(&options, None, false);
    let (flags, values) = parse_flags(&args);

    let expected_flags: HashSet<String> =
        ["--no-livereload"].into_iter().map(String::from).collect();
    assert_eq!(flags, expected_flags);
    assert_eq!(values.get("--dev-addr").unwrap(), "127.0.0.1:8080");
    assert!(!values.contains_key("--theme"));
}

#[test]
fn serve_dev_addr_fills_in_missing_half() {
    let options = ServeOptions {
        port: Some(9000),
        ..Default::default()
    };
    let args = serve_args(&options, None, false);
    assert!(args.contains(&"localhost:9000".to_string()));

    let options = ServeOptions {
        host: Some("docs.local".to_string()),
        ..Default::default()
    };
    let args = serve_args(&options, None, false);
    assert!(args.contains(&"docs.local:8000".to_string()));
}

#[test]
fn serve_omits_dev_addr_when_unconfigured() {
    let args = serve_args(&ServeOptions::default(), None, false);
    assert!(!args.contains(&"--dev-addr".to_string()));
}

#[test]
fn deploy_round_trip_recovers_options() {
    let options = DeployOptions {
        clean: true,
        message: Some("release {version}".to_string()),
        remote_branch: Some("gh-pages".to_string()),
        remote_name: Some("origin".to_string()),
        force: true,
    };
    let args = deploy_args(&options, None, false);
    assert_eq!(args[0], "gh-deploy");

    let (flags, values) = parse_flags(&args);
    let expected_flags: HashSet<String> = ["--clean", "--force"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(flags, expected_flags);
    assert_eq!(values.get("--message").unwrap(), "release {version}");
    assert_eq!(values.get("--remote-branch").unwrap(), "gh-pages");
    assert_eq!(values.get("--remote-name").unwrap(), "origin");
}

#[test]
fn deploy_defaults_omit_optional_flags() {
    let args = deploy_args(&DeployOptions::default(), None, false);
    let (flags, values) = parse_flags(&args);

    assert_eq!(
        flags,
        ["--clean"].into_iter().map(String::from).collect()
    );
    assert!(values.is_empty());
}

#[test]
fn no_argument_is_ever_empty() {
    let options = BuildOptions {
        theme: Some("material".to_string()),
        ..Default::default()
    };
    let args = build_args(&options, Some(Path::new("mkdocs.yml")), true);
    assert!(args.iter().all(|a| !a.is_empty()));
}

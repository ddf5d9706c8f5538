//! Integration tests for configuration management

use chat_viz::config::{Config, ConfigOverrides};
use chat_viz::core::pricing::ModelChoice;
use chat_viz::core::render::Renderer;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert_eq!(config.render.max_file_depth, 3);
    assert!(config.render.allow_file_directives);
    assert!(
        config.model.name.parse::<ModelChoice>().is_ok(),
        "Default model must be priced"
    );
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[render]
max_file_depth = 1
allow_file_directives = false
file_root = "/srv/charts"

[paths]
reports_dir = "./reports"

[model]
name = "Haiku 3"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.render.max_file_depth, 1);
    assert!(!config.render.allow_file_directives);
    assert_eq!(config.render.file_root, "/srv/charts");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.model.name, "Haiku 3");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"

[render]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.render.max_file_depth, 3);
    assert!(config.render.allow_file_directives);
    assert_eq!(config.paths.reports_dir, "");
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$CHAT_VIZ/test.log"

[paths]
reports_dir = "$CHAT_VIZ/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("chatviz"));
    assert!(!config.logging.file.contains("$CHAT_VIZ"));
    assert!(config.paths.reports_dir.ends_with("reports"));
    assert!(!config.paths.reports_dir.contains("$CHAT_VIZ"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("max-file-depth", "5")
        .expect("Failed to set depth");
    assert_eq!(config.get("max_file_depth").unwrap(), "5");
    assert_eq!(config.render.max_file_depth, 5);

    config
        .set("allow_file_directives", "false")
        .expect("Failed to set flag");
    assert!(!config.render.allow_file_directives);

    assert!(config.set("max_file_depth", "deep").is_err());
    assert!(config.set("verbose", "maybe").is_err());

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("model", "Haiku 3").expect("Failed to set model");
    config.set("file_root", "/x").expect("Failed to set root");

    config.unset("model", &defaults).expect("Failed to unset");
    config.unset("file-root", &defaults).expect("Failed to unset");
    assert_eq!(config.model.name, defaults.model.name);
    assert_eq!(config.render.file_root, defaults.render.file_root);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("max_file_depth", "7").expect("Failed to set depth");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.render.max_file_depth, 7);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        max_file_depth: Some(0),
        file_root: Some("/data".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
        model: Some("Sonnet 3".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.render.max_file_depth, 0);
    assert_eq!(config.render.file_root, "/data");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.model.name, "Sonnet 3");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.reports_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.reports_dir, before);
}

#[test]
fn test_config_display_format() {
    let display_str = Config::from_defaults().to_string();

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[render]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[model]"));
    assert!(display_str.contains("max_file_depth = 3"));
}

#[test]
fn test_merge_defaults_fills_empty_strings() {
    let toml_str = r#"
[logging]
level = ""

[paths]
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert_eq!(config.model.name, defaults.model.name);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[model]
name = "Haiku 3"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.model.name, "Haiku 3");
}

#[test]
fn test_renderer_honors_config() {
    let mut config = Config::from_defaults();
    config
        .set("allow_file_directives", "false")
        .expect("Failed to set flag");

    let result = Renderer::from_config(&config.render).render(
        r#"<visualization type="file"><options><filename>x.xml</filename></options></visualization>"#,
    );
    assert_eq!(
        result.diagnostic().map(|d| d.message()),
        Some("File visualizations are disabled".to_string())
    );
}

#[test]
fn test_get_chatviz_dir() {
    let dir = Config::get_chatviz_dir();

    assert!(dir.to_string_lossy().contains("chatviz"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}

#[test]
fn test_overrides_leave_stored_config_untouched() {
    let mut stored = Config::from_toml("[render]\nmax_file_depth = 2\n").expect("Failed to parse");
    let run = stored.with_overrides(&ConfigOverrides {
        max_file_depth: Some(0),
        file_root: Some("/nowhere".to_string()),
        ..ConfigOverrides::default()
    });
    assert_eq!(run.render.max_file_depth, 0);
    assert_eq!(run.render.file_root, "/nowhere");

    stored.set("model", "Haiku 3").expect("Failed to set model");
    let saved = toml::to_string_pretty(&stored).expect("Failed to serialize");
    let reloaded = Config::from_toml(&saved).expect("Failed to reparse");

    assert_eq!(reloaded.model.name, "Haiku 3");
    assert_eq!(reloaded.render.max_file_depth, 2);
    assert_eq!(reloaded.render.file_root, "");
    assert!(!saved.contains("/nowhere"));
}

#[test]
fn test_config_without_logging_table_is_kept() {
    let mut config = Config::from_toml("[render]\nmax_file_depth = 1\n")
        .expect("A file with only [render] must parse");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.render.max_file_depth, 1);
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
}

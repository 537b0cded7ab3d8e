use clap::Parser;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use tempfile::tempdir;
use xxdupe::cli::{Cli, OutputFormat};
use xxdupe::config::{Config, ConfigError};

fn clear_env() {
    for key in [
        "XXDUPE_MIN_SIZE",
        "XXDUPE_MAX_SIZE",
        "XXDUPE_JOBS",
        "XXDUPE_HIDE_TIME",
        "XXDUPE_OUTPUT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config.min_size, 0);
    assert_eq!(config.jobs, 4);
    assert_eq!(config.output, OutputFormat::Text);
}

#[test]
fn test_config_load_from_env() {
    let _guard = crate::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var("XXDUPE_MIN_SIZE", "2048");
    std::env::set_var("XXDUPE_HIDE_TIME", "true");
    std::env::set_var("XXDUPE_OUTPUT", "json");

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("XXDUPE_"));
    let config: Result<Config, _> = figment.extract();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.min_size, 2048);
    assert!(config.hide_time);
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
min_size = 100
max_size = 5000
jobs = 8
hide_hash = true
skip_unreadable = true
"#,
    )
    .unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.min_size, 100);
    assert_eq!(config.max_size, 5000);
    assert_eq!(config.jobs, 8);
    assert!(config.hide_hash);
    assert!(config.skip_unreadable);
    assert!(!config.hide_recent);
}

#[test]
fn test_layer_precedence() {
    let _guard = crate::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "min_size = 10\nmax_size = 100\njobs = 8\n").unwrap();
    std::env::set_var("XXDUPE_JOBS", "6");
    std::env::set_var("XXDUPE_MAX_SIZE", "200");

    let cli = Cli::try_parse_from([
        "xxdupe",
        "--config",
        config_path.to_str().unwrap(),
        "-M",
        "300",
        "/data",
    ])
    .unwrap();
    let config = Config::resolve(&cli);
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.min_size, 10); // file
    assert_eq!(config.jobs, 6); // env over file
    assert_eq!(config.max_size, 300); // CLI over env
}

#[test]
fn test_resolve_rejects_inverted_bounds() {
    let _guard = crate::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let cli = Cli::try_parse_from(["xxdupe", "-m", "500", "-M", "100", "/data"]).unwrap();
    let result = Config::resolve(&cli);
    assert!(matches!(
        result,
        Err(ConfigError::EmptySizeRange { min: 500, max: 100 })
    ));
}

#[test]
fn test_resolve_missing_config_file() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let cli = Cli::try_parse_from(["xxdupe", "--config", missing.to_str().unwrap(), "/data"])
        .unwrap();

    let err = Config::resolve(&cli).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_config_save_toml() {
    let config = Config {
        jobs: 2,
        output: OutputFormat::Json,
        ..Config::default()
    };

    let content = toml::to_string_pretty(&config).unwrap();
    assert!(content.contains("jobs = 2"));
    assert!(content.contains("output = \"json\""));

    let parsed: Config = toml::from_str(&content).unwrap();
    assert_eq!(parsed, config);
}

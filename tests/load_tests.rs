//! Integration tests for loading and reading the active configuration.
//!
//! These tests share the process-wide table and the process environment, so
//! each one runs serially and scopes its environment with `temp_env`.

use envspec::config::{
    self, Coercions, EnvSnapshot, Loader, Options, Symbol, Value, ValueType, VariableSpec,
};
use envspec::ConfigError;
use serial_test::serial;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Writes env files into a temp dir and returns their paths in order.
fn env_files(temp: &TempDir, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, contents)| {
            let path = temp.path().join(name);
            std::fs::write(&path, contents).unwrap();
            path
        })
        .collect()
}

fn options_yaml(yaml: &str) -> Options {
    Options::from_yaml_str(yaml).expect("valid options yaml")
}

#[test]
#[serial]
fn test_inline_options_with_boolean_default() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file1", "")]);
    let options = options_yaml("VAR: { default: false, type: boolean }");

    temp_env::with_vars_unset(["VAR"], || {
        config::load(options, &files).unwrap();
        assert_eq!(config::get("VAR").unwrap(), Some(Value::Bool(false)));
    });
}

#[test]
#[serial]
fn test_options_from_yaml_file() {
    let temp = TempDir::new().unwrap();
    let options_path = temp.path().join("envspec.yml");
    std::fs::write(&options_path, "DEFAULT_MINUTES: { type: minutes, default: 2 }\n").unwrap();

    temp_env::with_vars_unset(["DEFAULT_MINUTES"], || {
        config::load(options_path.clone(), Vec::<PathBuf>::new()).unwrap();
        assert_eq!(
            config::get("DEFAULT_MINUTES").unwrap(),
            Some(Value::Integer(120))
        );
    });
}

#[test]
#[serial]
fn test_get_accepts_string_and_symbol_keys() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "VALUE=one\n")]);
    let options = options_yaml("VALUE: { type: string }");

    temp_env::with_vars_unset(["VALUE"], || {
        config::load(options, &files).unwrap();
        let expected = Some(Value::Str("one".to_string()));
        assert_eq!(config::get("VALUE").unwrap(), expected);
        assert_eq!(config::get(String::from("VALUE")).unwrap(), expected);
        assert_eq!(config::get(Symbol::intern("VALUE")).unwrap(), expected);
    });
}

#[test]
#[serial]
fn test_last_file_has_precedence() {
    let temp = TempDir::new().unwrap();
    let files = env_files(
        &temp,
        &[("file1", "VARIABLE=true\n"), ("file2", "VARIABLE=false\n")],
    );
    let options = options_yaml("VARIABLE: { type: boolean }");

    temp_env::with_vars_unset(["VARIABLE"], || {
        config::load(options, &files).unwrap();
        assert_eq!(config::get("VARIABLE").unwrap(), Some(Value::Bool(false)));
    });
}

#[test]
#[serial]
fn test_last_line_has_precedence() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "VARIABLE=true\nVARIABLE=false\n")]);
    let options = options_yaml("VARIABLE: { type: boolean }");

    temp_env::with_vars_unset(["VARIABLE"], || {
        config::load(options, &files).unwrap();
        assert_eq!(config::get("VARIABLE").unwrap(), Some(Value::Bool(false)));
    });
}

#[test]
#[serial]
fn test_environment_beats_file() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "VARIABLE=true\n")]);
    let options = options_yaml("VARIABLE: { type: boolean }");

    temp_env::with_var("VARIABLE", Some("false"), || {
        config::load(options, &files).unwrap();
        assert_eq!(config::get("VARIABLE").unwrap(), Some(Value::Bool(false)));
    });
}

#[test]
#[serial]
fn test_environment_used_when_file_lacks_value() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "")]);
    let options = options_yaml("VARIABLE: { type: boolean }");

    temp_env::with_var("VARIABLE", Some("true"), || {
        config::load(options, &files).unwrap();
        assert_eq!(config::get("VARIABLE").unwrap(), Some(Value::Bool(true)));
    });
}

#[test]
#[serial]
fn test_default_and_absent_when_no_source() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "")]);
    let options = options_yaml(
        r#"
WITH_DEFAULT: { type: boolean, default: "true" }
WITHOUT_DEFAULT: { type: boolean }
"#,
    );

    temp_env::with_vars_unset(["WITH_DEFAULT", "WITHOUT_DEFAULT"], || {
        config::load(options, &files).unwrap();
        assert_eq!(config::get("WITH_DEFAULT").unwrap(), Some(Value::Bool(true)));
        assert_eq!(config::get("WITHOUT_DEFAULT").unwrap(), None);
        assert_eq!(config::get("NEVER_DECLARED").unwrap(), None);
    });
}

#[test]
#[serial]
fn test_empty_file_value_falls_back_to_default() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "VARIABLE_WITH_DEFAULT=\n")]);
    let options = options_yaml("VARIABLE_WITH_DEFAULT: { default: one }");

    temp_env::with_vars_unset(["VARIABLE_WITH_DEFAULT"], || {
        config::load(options, &files).unwrap();
        assert_eq!(
            config::get("VARIABLE_WITH_DEFAULT").unwrap(),
            Some(Value::Str("one".to_string()))
        );
    });
}

#[test]
#[serial]
fn test_cast_types_from_file() {
    let temp = TempDir::new().unwrap();
    let files = env_files(
        &temp,
        &[(
            "file",
            "FALSE_UPCASE=FALSE\n\
             TRUE_CAPITALIZED=True\n\
             INTEGER=1\n\
             TIME=10\n\
             SOME_PATH=/some/path/to/here/\n\
             URL=https://some-website.co.uk/to/here/\n\
             DRIVER=poltergeist\n\
             WHATEVER=string\n",
        )],
    );
    let options = options_yaml(
        r#"
FALSE_UPCASE: { type: boolean }
TRUE_CAPITALIZED: { type: boolean }
INTEGER: { type: integer }
TIME: { type: minutes }
SOME_PATH: { type: path }
URL: { type: url }
DRIVER: { type: symbol }
WHATEVER: { required: true }
"#,
    );

    let names = [
        "FALSE_UPCASE",
        "TRUE_CAPITALIZED",
        "INTEGER",
        "TIME",
        "SOME_PATH",
        "URL",
        "DRIVER",
        "WHATEVER",
    ];
    temp_env::with_vars_unset(names, || {
        config::load(options, &files).unwrap();
        assert_eq!(config::get("FALSE_UPCASE").unwrap(), Some(Value::Bool(false)));
        assert_eq!(
            config::get("TRUE_CAPITALIZED").unwrap(),
            Some(Value::Bool(true))
        );
        assert_eq!(config::get("INTEGER").unwrap(), Some(Value::Integer(1)));
        assert_eq!(config::get("TIME").unwrap(), Some(Value::Integer(600)));
        assert_eq!(
            config::get("SOME_PATH").unwrap(),
            Some(Value::Str("some/path/to/here".to_string()))
        );
        assert_eq!(
            config::get("URL").unwrap(),
            Some(Value::Str("https://some-website.co.uk/to/here".to_string()))
        );
        assert_eq!(
            config::get("DRIVER").unwrap(),
            Some(Value::Symbol(Symbol::intern("poltergeist")))
        );
        assert_eq!(
            config::get("WHATEVER").unwrap(),
            Some(Value::Str("string".to_string()))
        );
    });
}

#[test]
#[serial]
fn test_comments_are_ignored() {
    let temp = TempDir::new().unwrap();
    let options = options_yaml("VAR: { type: string }");

    for contents in [
        "#\n  #\nVAR=value\n",
        "VAR=value  #  some comment\n",
        "VAR=value #\n",
    ] {
        let files = env_files(&temp, &[("file", contents)]);
        temp_env::with_vars_unset(["VAR"], || {
            config::load(options.clone(), &files).unwrap();
            assert_eq!(
                config::get("VAR").unwrap(),
                Some(Value::Str("value".to_string())),
                "contents: {contents:?}"
            );
        });
    }
}

#[test]
#[serial]
fn test_missing_required_fails_and_keeps_previous_table() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "PRESENT=yes\n")]);

    temp_env::with_vars_unset(["PRESENT", "REQUIRED", "REQUIRED_WITH_DEFAULT"], || {
        let good = Options::new().with(VariableSpec::new("PRESENT").required());
        config::load(good, &files).unwrap();

        let bad = Options::new()
            .with(VariableSpec::new("REQUIRED").required())
            .with(
                VariableSpec::new("REQUIRED_WITH_DEFAULT")
                    .with_type(ValueType::String)
                    .with_default("one")
                    .required(),
            );
        let err = config::load(bad, &files).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVariables(_)));
        assert_eq!(
            err.to_string(),
            "Missing configuration variables: REQUIRED, REQUIRED_WITH_DEFAULT"
        );

        // The earlier table is still active.
        assert_eq!(
            config::get("PRESENT").unwrap(),
            Some(Value::Str("yes".to_string()))
        );
        assert!(!config::current().unwrap().contains("REQUIRED"));
    });
}

#[test]
#[serial]
fn test_reload_replaces_active_table() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "A=1\nB=2\n")]);

    temp_env::with_vars_unset(["A", "B"], || {
        let first = config::load(options_yaml("A: { type: integer }"), &files).unwrap();
        let second = config::load(options_yaml("B: { type: integer }"), &files).unwrap();

        // Readers holding the old snapshot keep it intact.
        assert_eq!(first.get("A"), Some(&Value::Integer(1)));
        assert!(config::is_loaded());
        assert_eq!(config::get("A").unwrap(), None);
        assert_eq!(config::get("B").unwrap(), Some(Value::Integer(2)));
        assert_eq!(second.len(), 1);
    });
}

#[test]
#[serial]
fn test_load_with_publishes_configured_loader() {
    let temp = TempDir::new().unwrap();
    let files = env_files(&temp, &[("file", "TIMEOUT=5\nNAME=from_file\n")]);
    let loader = Loader::new(options_yaml(
        "TIMEOUT: { type: minutes }\nNAME: { type: string }",
    ))
    .env_files(&files)
    .env(EnvSnapshot::from_pairs([("NAME", "from_env")]))
    .coercions(Coercions::with_durations());

    let table = config::load_with(&loader).unwrap();

    assert!(Arc::ptr_eq(&table, &config::current().unwrap()));
    assert_eq!(
        config::get("TIMEOUT").unwrap(),
        Some(Value::Duration(Duration::from_secs(300)))
    );
    assert_eq!(
        config::get("NAME").unwrap(),
        Some(Value::Str("from_env".to_string()))
    );
}

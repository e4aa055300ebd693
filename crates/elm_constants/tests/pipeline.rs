//! End-to-end pipeline tests.
//!
//! Each test runs the generator in a scratch directory with an explicit
//! environment snapshot, so nothing here touches the process environment.

#![allow(clippy::pedantic)]

use std::fs;
use std::path::Path;

use elm_constants::{EnvSnapshot, Error, Generator, Options};
use tempfile::TempDir;

fn scratch(config: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("elm-constants.json"), config).expect("write config");
    dir
}

fn env(vars: &[(&str, &str)]) -> EnvSnapshot {
    vars.iter().copied().collect()
}

fn generator(dir: &Path) -> Generator {
    Generator::new(Options::default().working_dir(dir))
}

/// Reads `name -> "value"` pairs back out of a generated module.
fn scan_constants(text: &str) -> Vec<(String, String)> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();

    for window in lines.windows(3) {
        if let Some(name) = window[0].strip_suffix(" : String") {
            assert_eq!(window[1], format!("{name} ="));
            let literal = window[2]
                .strip_prefix("    \"")
                .and_then(|l| l.strip_suffix('"'))
                .expect("indented string literal");
            out.push((name.to_string(), literal.to_string()));
        }
    }

    out
}

fn exposing(text: &str) -> Vec<String> {
    let header = text.lines().next().expect("header");
    let list = header
        .split_once("exposing (")
        .and_then(|(_, rest)| rest.strip_suffix(')'))
        .expect("exposing list");
    list.split(", ").map(str::to_string).collect()
}

// ============================================================================
// Successful Generation
// ============================================================================

#[test]
fn test_round_trip_single_value() {
    let dir = scratch(r#"{"path": "out", "moduleName": "Env", "values": ["FOO"]}"#);
    fs::create_dir(dir.path().join("out")).unwrap();

    let report = generator(dir.path()).run(env(&[("FOO", "bar")])).unwrap();

    assert_eq!(report.count, 1);
    assert_eq!(report.path, Path::new("out/Env.elm"));
    assert_eq!(report.to_string(), "1 constants written to out/Env.elm");

    let text = fs::read_to_string(dir.path().join("out/Env.elm")).unwrap();
    assert_eq!(
        scan_constants(&text),
        vec![("foo".to_string(), "bar".to_string())]
    );
}

#[test]
fn test_declarations_follow_input_order() {
    let dir = scratch(
        r#"{
            "path": ".",
            "moduleName": "Config",
            "values": ["ZETA_VALUE", ["ALPHA", "first"], "API_KEY", "name"]
        }"#,
    );

    let report = generator(dir.path())
        .run(env(&[
            ("ZETA_VALUE", "z"),
            ("ALPHA", "a"),
            ("API_KEY", "secret"),
            ("name", "n"),
        ]))
        .unwrap();

    assert_eq!(report.count, 4);

    let text = fs::read_to_string(dir.path().join("Config.elm")).unwrap();
    let expected = ["zetaValue", "first", "apiKey", "name"];

    assert_eq!(exposing(&text), expected);
    let scanned: Vec<String> = scan_constants(&text).into_iter().map(|(n, _)| n).collect();
    assert_eq!(scanned, expected);
}

#[test]
fn test_runs_are_byte_identical() {
    let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["A_ONE", "B_TWO"]}"#);
    let snapshot = env(&[("A_ONE", "1"), ("B_TWO", "2")]);
    let target = dir.path().join("Env.elm");

    generator(dir.path()).run(snapshot.clone()).unwrap();
    let first = fs::read(&target).unwrap();

    generator(dir.path()).run(snapshot).unwrap();
    let second = fs::read(&target).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_previous_content_replaced() {
    let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["FOO"]}"#);
    fs::write(dir.path().join("Env.elm"), "module Env exposing (old)\n\n\nold = 1\n").unwrap();

    generator(dir.path()).run(env(&[("FOO", "new")])).unwrap();

    let text = fs::read_to_string(dir.path().join("Env.elm")).unwrap();
    assert!(!text.contains("old"));
    assert_eq!(exposing(&text), ["foo"]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_variable_writes_nothing() {
    let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["MISSING_VAR"]}"#);

    let err = generator(dir.path()).run(EnvSnapshot::new()).unwrap_err();

    assert!(matches!(err, Error::EnvVarNotFound { ref var, .. } if var == "MISSING_VAR"));
    assert!(!dir.path().join("Env.elm").exists());
}

#[test]
fn test_empty_values_before_env_lookup() {
    let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": []}"#);
    // A broken explicit env file would fail the env step if it ran first.
    let options = Options::default()
        .working_dir(dir.path())
        .env_path("does-not-exist.env");

    let err = Generator::new(options).run(EnvSnapshot::new()).unwrap_err();
    assert!(matches!(err, Error::EmptyValues));
}

#[test]
fn test_invalid_alias_rejected() {
    let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": [["X", "123bad"]]}"#);

    let err = generator(dir.path()).run(env(&[("X", "1")])).unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier { ref name } if name == "123bad"));
}

#[test]
fn test_output_dir_missing() {
    let dir = scratch(r#"{"path": "src/generated", "moduleName": "Env", "values": ["FOO"]}"#);

    let err = generator(dir.path()).run(env(&[("FOO", "bar")])).unwrap_err();

    assert!(matches!(err, Error::OutputPathNotFound { ref path, .. } if path == "src/generated"));
    assert!(err.to_string().contains("Maybe you forgot to create it?"));
}

#[test]
fn test_output_path_is_a_file() {
    let dir = scratch(r#"{"path": "taken", "moduleName": "Env", "values": ["FOO"]}"#);
    fs::write(dir.path().join("taken"), "plain file").unwrap();

    let err = generator(dir.path()).run(env(&[("FOO", "bar")])).unwrap_err();

    assert!(matches!(err, Error::WriteError { .. }));
    assert!(!err.to_string().contains("Maybe you forgot to create it?"));
}

#[test]
fn test_two_missing_variables() {
    let dir = scratch(
        r#"{"path": ".", "moduleName": "Env", "values": ["MISSING_A", "MISSING_B"]}"#,
    );

    let err = generator(dir.path()).run(EnvSnapshot::new()).unwrap_err();

    assert!(matches!(err, Error::EnvVarNotFound { ref var, .. } if var == "MISSING_A"));
    assert!(!dir.path().join("Env.elm").exists());
}

#[test]
fn test_config_parse_error() {
    let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["FOO",]}"#);

    let err = generator(dir.path()).run(env(&[("FOO", "bar")])).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
}

#[test]
fn test_explicit_config_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("conf")).unwrap();
    fs::write(
        dir.path().join("conf/constants.json"),
        r#"{"path": ".", "moduleName": "Env", "values": ["FOO"]}"#,
    )
    .unwrap();

    let options = Options::default()
        .working_dir(dir.path())
        .config_path("./conf/constants.json");
    let report = Generator::new(options).run(env(&[("FOO", "bar")])).unwrap();

    assert_eq!(report.count, 1);
    assert!(dir.path().join("Env.elm").exists());
}

// ============================================================================
// Env Files
// ============================================================================

#[cfg(feature = "dotenv")]
mod env_files {
    use super::*;

    #[test]
    fn test_default_env_file_loaded() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["FROM_FILE"]}"#);
        fs::write(dir.path().join(".env"), "FROM_FILE=\"file value\"\n").unwrap();

        generator(dir.path()).run(EnvSnapshot::new()).unwrap();

        let text = fs::read_to_string(dir.path().join("Env.elm")).unwrap();
        assert_eq!(
            scan_constants(&text),
            vec![("fromFile".to_string(), "file value".to_string())]
        );
    }

    #[test]
    fn test_process_env_wins_over_file() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["SHARED"]}"#);
        fs::write(dir.path().join(".env"), "SHARED=from-file\n").unwrap();

        generator(dir.path()).run(env(&[("SHARED", "from-process")])).unwrap();

        let text = fs::read_to_string(dir.path().join("Env.elm")).unwrap();
        assert!(text.contains("\"from-process\""));
        assert!(!text.contains("from-file"));
    }

    #[test]
    fn test_no_dotenv_skips_file() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["FROM_FILE"]}"#);
        fs::write(dir.path().join(".env"), "FROM_FILE=x\n").unwrap();

        let options = Options::default().working_dir(dir.path()).dotenv(false);
        let err = Generator::new(options).run(EnvSnapshot::new()).unwrap_err();

        assert!(matches!(err, Error::EnvVarNotFound { .. }));
    }

    #[test]
    fn test_production_mode_skips_file() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["FROM_FILE"]}"#);
        fs::write(dir.path().join(".env"), "FROM_FILE=x\n").unwrap();

        let err = generator(dir.path())
            .run(env(&[("NODE_ENV", "production")]))
            .unwrap_err();

        assert!(matches!(err, Error::EnvVarNotFound { .. }));
    }

    #[test]
    fn test_explicit_env_file() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["STAGE"]}"#);
        fs::write(dir.path().join(".env.staging"), "STAGE=staging\n").unwrap();

        let options = Options::default()
            .working_dir(dir.path())
            .env_path(".env.staging");
        Generator::new(options).run(EnvSnapshot::new()).unwrap();

        let text = fs::read_to_string(dir.path().join("Env.elm")).unwrap();
        assert!(text.contains("    \"staging\""));
    }

    #[test]
    fn test_explicit_env_file_badly_named() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["STAGE"]}"#);
        fs::write(dir.path().join("staging.txt"), "STAGE=staging\n").unwrap();

        let options = Options::default()
            .working_dir(dir.path())
            .env_path("staging.txt");
        let err = Generator::new(options).run(EnvSnapshot::new()).unwrap_err();

        assert!(matches!(err, Error::EnvFileNotFound { .. }));
    }

    #[test]
    fn test_malformed_env_line_skipped() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["GOOD"]}"#);
        fs::write(dir.path().join(".env"), "BAD=two words\nGOOD=kept\n").unwrap();

        generator(dir.path()).run(EnvSnapshot::new()).unwrap();

        let text = fs::read_to_string(dir.path().join("Env.elm")).unwrap();
        assert_eq!(scan_constants(&text), vec![("good".to_string(), "kept".to_string())]);
    }

    #[test]
    fn test_malformed_env_line_not_loaded() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["BAD"]}"#);
        fs::write(dir.path().join(".env"), "BAD=two words\n").unwrap();

        let err = generator(dir.path()).run(EnvSnapshot::new()).unwrap_err();
        assert!(matches!(err, Error::EnvVarNotFound { var, .. } if var == "BAD"));
    }

    #[test]
    fn test_unreadable_env_file() {
        let dir = scratch(r#"{"path": ".", "moduleName": "Env", "values": ["A_B"]}"#);
        fs::create_dir(dir.path().join(".env")).unwrap();

        let err = generator(dir.path()).run(env(&[("A_B", "1")])).unwrap_err();
        assert!(matches!(err, Error::EnvFileParse { .. }));
    }
}

//! End-to-end tests for the `elmbundle` binary.
//!
//! These run the real binary against throwaway projects. Elm compilation
//! uses a fake `elm` script, so no Elm toolchain is needed.

// assert_cmd::cargo_bin is deprecated but still works
#![allow(deprecated)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn elmbundle(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("elmbundle").unwrap();
    cmd.current_dir(dir)
        .env_remove("NODE_ENV")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn write_js_app(dir: &Path) {
    write(
        dir,
        "esbuild/index.js",
        "import { mount } from './mount.js';\n// entry comment\nmount(document.body);\n",
    );
    write(
        dir,
        "esbuild/mount.js",
        "export function mount(node) {\n    node.setAttribute('data-app', 'mounted');\n}\n",
    );
}

#[test]
fn test_build_js_entry_with_defaults() {
    let temp = TempDir::new().unwrap();
    write_js_app(temp.path());

    elmbundle(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Build Summary"));

    let code = fs::read_to_string(temp.path().join("index.js")).unwrap();
    assert!(code.contains("mounted"));
    assert!(!code.contains("entry comment"));
    assert!(!code.contains("import "));
}

#[test]
fn test_missing_entry_exits_with_status_1() {
    let temp = TempDir::new().unwrap();

    elmbundle(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Entry point not found"));

    assert!(!temp.path().join("index.js").exists());
}

#[test]
fn test_rerun_overwrites_output() {
    let temp = TempDir::new().unwrap();
    write_js_app(temp.path());

    elmbundle(temp.path()).assert().success();
    write(
        temp.path(),
        "esbuild/mount.js",
        "export function mount(node) { node.id = 'second-build'; }\n",
    );
    elmbundle(temp.path()).assert().success();

    let code = fs::read_to_string(temp.path().join("index.js")).unwrap();
    assert!(code.contains("second-build"));
    assert!(!code.contains("mounted"));
}

#[test]
fn test_cwd_flag_and_outdir() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("app");
    write_js_app(&project);

    Command::cargo_bin("elmbundle")
        .unwrap()
        .current_dir(temp.path())
        .args(["--quiet", "--cwd", "app", "--outdir", "public"])
        .assert()
        .success();

    assert!(project.join("public").join("index.js").exists());
}

#[test]
fn test_output_replacing_entry_is_refused() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "index.js", "document.title = 'source';\n");

    elmbundle(temp.path())
        .args(["--entry", "index.js", "--outdir", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("overwrite"));

    let source = fs::read_to_string(temp.path().join("index.js")).unwrap();
    assert_eq!(source, "document.title = 'source';\n");
}

#[test]
fn test_conflicting_outputs_in_config_file() {
    let temp = TempDir::new().unwrap();
    write_js_app(temp.path());
    write(
        temp.path(),
        "elmbundle.config.json",
        r#"{ "outdir": "dist", "outfile": "index.js" }"#,
    );

    elmbundle(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Conflicting options"));
}

#[test]
fn test_conflicting_output_flags() {
    let temp = TempDir::new().unwrap();

    elmbundle(temp.path())
        .args(["--outdir", "dist", "--outfile", "index.js"])
        .assert()
        .failure();
}

#[test]
fn test_pinned_options_rejected_in_config_file() {
    let temp = TempDir::new().unwrap();
    write_js_app(temp.path());
    write(temp.path(), "elmbundle.config.json", r#"{ "minify": false }"#);

    elmbundle(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("minify"));
    assert!(!temp.path().join("index.js").exists());
}

#[cfg(unix)]
mod elm {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Fake compiler: records its arguments, then writes a tiny Elm-style IIFE.
    const FAKE_ELM: &str = r#"#!/bin/sh
echo "$@" > "$PWD/elm-args.txt"
for arg in "$@"; do
  case "$arg" in
    --output=*) out="${arg#--output=}" ;;
  esac
done
printf '(function(scope){ scope.Elm = { Main: { init: function (o) { o.node.textContent = "elm-compiled"; } } }; }(this));' > "$out"
"#;

    const FAILING_ELM: &str = r#"#!/bin/sh
echo "-- TYPE MISMATCH ------------------------------------ src/Main.elm" >&2
exit 1
"#;

    fn install_elm(dir: &Path, script: &str) {
        let path = dir.join("bin").join("elm");
        write(dir, "bin/elm", script);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn write_elm_app(dir: &Path) {
        write(dir, "elm.json", r#"{"type":"application"}"#);
        write(dir, "src/Main.elm", "module Main exposing (main)\n");
        write(
            dir,
            "esbuild/index.js",
            "import { Elm } from '../src/Main.elm';\nElm.Main.init({ node: document.getElementById('app') });\n",
        );
    }

    #[test]
    fn test_elm_entry_compiles_optimized() {
        let temp = TempDir::new().unwrap();
        write_elm_app(temp.path());
        install_elm(temp.path(), FAKE_ELM);

        elmbundle(temp.path())
            .args(["--path-to-elm", "bin/elm"])
            .assert()
            .success();

        let code = fs::read_to_string(temp.path().join("index.js")).unwrap();
        assert!(code.contains("elm-compiled"));

        let args = fs::read_to_string(temp.path().join("elm-args.txt")).unwrap();
        assert!(args.starts_with("make"));
        assert!(args.contains("--optimize"));
        assert!(!args.contains("--debug"));
    }

    #[test]
    fn test_optimize_ignores_node_env() {
        let temp = TempDir::new().unwrap();
        write_elm_app(temp.path());
        install_elm(temp.path(), FAKE_ELM);

        elmbundle(temp.path())
            .env("NODE_ENV", "development")
            .args(["--path-to-elm", "bin/elm"])
            .assert()
            .success();

        let args = fs::read_to_string(temp.path().join("elm-args.txt")).unwrap();
        assert!(args.contains("--optimize"));
        assert!(!args.contains("--debug"));
    }

    #[test]
    fn test_elm_compile_error_reported() {
        let temp = TempDir::new().unwrap();
        write_elm_app(temp.path());
        install_elm(temp.path(), FAILING_ELM);

        elmbundle(temp.path())
            .args(["--path-to-elm", "bin/elm"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("TYPE MISMATCH"));

        assert!(!temp.path().join("index.js").exists());
    }

    #[test]
    fn test_project_local_elm_from_config_file() {
        let temp = TempDir::new().unwrap();
        write_elm_app(temp.path());
        install_elm(temp.path(), FAKE_ELM);
        write(
            temp.path(),
            "elmbundle.config.json",
            r#"{ "pathToElm": "bin/elm", "outfile": "public/app.js" }"#,
        );

        elmbundle(temp.path()).assert().success();

        let code = fs::read_to_string(temp.path().join("public").join("app.js")).unwrap();
        assert!(code.contains("elm-compiled"));
    }
}

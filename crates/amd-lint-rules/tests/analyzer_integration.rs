//! Integration test: built-in rules end-to-end via Analyzer.
//!
//! Uses the fixture project under `tests/fixtures/project/` to verify that
//! config loading, rule construction, file discovery and reporting work
//! together.

use amd_lint_core::{Analyzer, Config, LintResult, RuleBox, Severity};
use amd_lint_rules::{rules_by_name, rules_from_config};
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn fixture_config() -> Config {
    Config::from_file(&fixture_root().join("amd-lint.toml")).expect("fixture config should parse")
}

fn run(config: Config, rules: Vec<RuleBox>) -> LintResult {
    let mut builder = Analyzer::builder().root(fixture_root()).config(config);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    builder
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed")
}

fn render(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn recommended_preset_over_fixture_project() {
    let config = fixture_config();
    let rules = rules_from_config(&config).expect("rules should build");
    let result = run(config, rules);

    // broken.js is skipped, vendor/ is excluded.
    assert_eq!(result.files_checked, 3);
    insta::assert_snapshot!(render(&result), @r"
    src/app/main.js:6:1: error [AMD002] Named module form of `define` is not allowed
    src/app/views.js:1:34: error [AMD001] Not enough parameters in callback (expected 2, found 1).
    src/app/views.js:4:42: error [AMD001] Too many parameters in callback (expected 1, found 2).
    src/legacy.js:1:5: error [AMD003] Invalid assignment to `require`.
    ");
}

#[test]
fn allow_listed_plugin_dependency_is_accepted() {
    let config = fixture_config();
    let rules = rules_by_name(&["amd-function-arity"], &config).expect("rules should build");
    let result = run(config, rules);

    assert!(result
        .violations
        .iter()
        .all(|v| v.location.file != Path::new("src/app/main.js")));
    assert_eq!(result.violations.len(), 2);
}

#[test]
fn without_allow_list_plugin_dependency_is_reported() {
    let mut config = fixture_config();
    config.rules.clear();
    let rules = rules_by_name(&["AMD001"], &config).expect("rules should build");
    let result = run(config, rules);

    let main: Vec<_> = result
        .violations
        .iter()
        .filter(|v| v.location.file == Path::new("src/app/main.js"))
        .collect();
    assert_eq!(main.len(), 1);
    assert_eq!(
        main[0].message,
        "Not enough parameters in callback (expected 2, found 1)."
    );
    assert_eq!(main[0].labels[0].message, "2 dependencies declared here");
}

#[test]
fn severity_override_and_disabled_rules() {
    let toml = r#"
[analyzer]
exclude = ["**/vendor/**"]

[rules.amd-function-arity]
severity = "warning"
allowExtraDependencies = true

[rules.no-assign-require]
enabled = false
"#;
    let config = Config::parse(toml).expect("config should parse");
    let rules = rules_from_config(&config).expect("rules should build");
    let result = run(config, rules);

    let (errors, warnings, _) = result.count_by_severity();
    assert_eq!(errors, 1, "only no-named-define stays an error");
    assert_eq!(warnings, 1, "too-many stays reported, as a warning");
    assert!(result.violations.iter().all(|v| v.code != "AMD003"));
    assert!(result.has_violations_at(Severity::Warning));
}

#[test]
fn minimal_preset_only_checks_arity() {
    let mut config = fixture_config();
    config.preset = Some("minimal".to_string());
    let rules = rules_from_config(&config).expect("rules should build");
    let result = run(config, rules);

    assert!(result.violations.iter().all(|v| v.code == "AMD001"));
    assert_eq!(result.violations.len(), 2);
}

#[test]
fn fail_on_parse_error_reports_broken_file() {
    let config = fixture_config();
    let rules = rules_from_config(&config).expect("rules should build");
    let mut builder = Analyzer::builder()
        .root(fixture_root())
        .config(config)
        .fail_on_parse_error(true);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let err = builder
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect_err("broken.js should abort the run");
    assert!(err.to_string().contains("broken.js"));
}

#[test]
fn inline_source_with_allow_directive() {
    let analyzer = Analyzer::builder()
        .root("/project")
        .rule_box(Box::new(amd_lint_rules::NoNamedDefine::new()))
        .build()
        .expect("analyzer should build");

    let source = "/* amd-lint: allow(no-named-define) reason=\"bundled shim\" */\ndefine('shim', {});\ndefine('other', {});\n";
    let violations = analyzer
        .analyze_source(Path::new("/project/shim.js"), source)
        .expect("source should parse");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].location.line, 3);
}

#[test]
fn tempdir_project_with_node_modules() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("node_modules/lib")).expect("mkdir");
    std::fs::write(
        dir.path().join("node_modules/lib/index.js"),
        "define('lib', {});",
    )
    .expect("write");
    std::fs::write(dir.path().join("app.cjs"), "window.require = null;").expect("write");

    let config = Config::default();
    let rules = rules_from_config(&config).expect("rules should build");
    let mut builder = Analyzer::builder().root(dir.path()).config(config);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let result = builder.build().expect("build").analyze().expect("analyze");

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].code, "AMD003");
}

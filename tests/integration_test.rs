#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn tpf_cmd(dir: &Path) -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("tpf").unwrap();
	cmd.current_dir(dir)
		.env("TPF_NO_USER_CONFIG", "1")
		.env_remove("TPF_FILE")
		.env_remove("TPF_EOT")
		.env_remove("TPF_DIFF")
		.env_remove("RUST_LOG");
	cmd
}

const ARGOCD_CONFIG: &str = r#"
root: true
filters:
  helm_release:
    argocd: "customresourcedefinition.*"
"#;

const ARGOCD_PLAN: &str = r#"Terraform will perform the following actions:

  # helm_release.argocd will be updated in-place
  ~ resource "helm_release" "argocd" {
        id       = "argocd"
      ~ manifest = {
          ~ "customresourcedefinition.apiextensions.k8s.io/apiextensions.k8s.io/v1/applications.argoproj.io" = {
              + metadata = {}
              - status   = {}
            }
          ~ "deployment.apps/argocd/argocd-server" = {
              ~ replicas = 1 -> 2
            }
        }
      ~ values   = [
          - <<-EOT
                server:
                  replicas: 1
            EOT,
        ]
    }

Plan: 0 to add, 1 to change, 0 to destroy.
"#;

fn write_config(dir: &Path, content: &str) {
	fs::write(dir.join(".tpf.yaml"), content).unwrap();
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	tpf_cmd(temp_dir.path())
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Filter noisy blocks"))
		.stdout(predicate::str::contains("--eot"))
		.stdout(predicate::str::contains("--diff"));
}

#[test]
fn test_version_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	tpf_cmd(temp_dir.path())
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("tpf"));
}

// ============================================================================
// Filtering tests
// ============================================================================

#[test]
fn test_hides_matching_object() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), ARGOCD_CONFIG);

	let expected = ARGOCD_PLAN.replace(
		"              + metadata = {}\n              - status   = {}\n",
		"              # (2 lines hidden: 1 to add, 0 to change, 1 to destroy)\n",
	);

	tpf_cmd(temp_dir.path())
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.success()
		.stdout(expected);
}

#[test]
fn test_no_filters_passes_through() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), "root: true\n");

	tpf_cmd(temp_dir.path())
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.success()
		.stdout(ARGOCD_PLAN);
}

#[test]
fn test_explicit_file_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join("filter.yaml");
	fs::write(&config_path, ARGOCD_CONFIG).unwrap();

	tpf_cmd(temp_dir.path())
		.args(["-f", "filter.yaml"])
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.success()
		.stdout(predicate::str::contains("# (2 lines hidden"))
		.stdout(predicate::str::contains("~ replicas = 1 -> 2"));
}

#[test]
fn test_explicit_file_missing() {
	let temp_dir = tempfile::tempdir().unwrap();

	tpf_cmd(temp_dir.path())
		.args(["--file", "missing.yaml"])
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.failure()
		.stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_toml_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".tpf.toml"),
		r#"
root = true

[filters.helm_release]
argocd = "deployment.*"
"#,
	)
	.unwrap();

	tpf_cmd(temp_dir.path())
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"              # (1 lines hidden: 0 to add, 1 to change, 0 to destroy)\n            }\n",
		))
		.stdout(predicate::str::contains("+ metadata = {}"));
}

#[test]
fn test_invalid_pattern_fails_without_output() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(
		temp_dir.path(),
		r#"
root: true
filters:
  helm_release:
    argocd: "customresourcedefinition(.*"
"#,
	);

	tpf_cmd(temp_dir.path())
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.failure()
		.stdout(predicate::str::is_empty())
		.stderr(predicate::str::contains("Failed to populate filters"));
}

#[test]
fn test_eot_flag_hides_heredoc() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), "root: true\n");

	tpf_cmd(temp_dir.path())
		.arg("--eot")
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"          - <<-EOT\n              # (2 lines hidden),\n        ]\n",
		))
		.stdout(predicate::str::contains("replicas: 1").not());
}

#[test]
fn test_eot_from_environment() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), "root: true\n");

	tpf_cmd(temp_dir.path())
		.env("TPF_EOT", "true")
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.success()
		.stdout(predicate::str::contains("# (2 lines hidden),"));
}

#[test]
fn test_eot_from_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), "root: true\neot: true\n");

	tpf_cmd(temp_dir.path())
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.success()
		.stdout(predicate::str::contains("# (2 lines hidden),"));
}

#[test]
fn test_diff_flag_moves_signs() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), "root: true\n");

	tpf_cmd(temp_dir.path())
		.arg("-d")
		.write_stdin("   ~ foo = \"bar\"\n   + foo = \"bar\"\n   - foo = \"bar\"\n")
		.assert()
		.success()
		.stdout("~   !~foo = \"bar\"\n+   foo = \"bar\"\n-   foo = \"bar\"\n");
}

#[test]
fn test_filter_with_diff_and_eot() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), ARGOCD_CONFIG);

	tpf_cmd(temp_dir.path())
		.args(["-e", "-d"])
		.write_stdin(ARGOCD_PLAN)
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"~  !~resource \"helm_release\" \"argocd\" {\n",
		))
		.stdout(predicate::str::contains(
			"              # (2 lines hidden: 1 to add, 0 to change, 1 to destroy)\n            }\n",
		))
		.stdout(predicate::str::contains("-          <<-EOT\n"));
}

#[test]
fn test_crlf_input_is_preserved() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), ARGOCD_CONFIG);

	let plan = ARGOCD_PLAN.replace('\n', "\r\n");
	let expected = plan.replace(
		"              + metadata = {}\r\n              - status   = {}\r\n",
		"              # (2 lines hidden: 1 to add, 0 to change, 1 to destroy)\r\n",
	);

	tpf_cmd(temp_dir.path())
		.write_stdin(plan)
		.assert()
		.success()
		.stdout(expected);
}

// ============================================================================
// --init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".tpf.yaml");

	tpf_cmd(temp_dir.path())
		.arg("--init")
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .tpf.yaml"));

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root: true"));
	assert!(content.contains("filters:"));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), "# existing");

	tpf_cmd(temp_dir.path())
		.arg("--init")
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), "# existing");

	tpf_cmd(temp_dir.path())
		.args(["--init", "--force"])
		.assert()
		.success();

	let content = fs::read_to_string(temp_dir.path().join(".tpf.yaml")).unwrap();
	assert!(content.contains("root: true"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), ARGOCD_CONFIG);

	tpf_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"))
		.stdout(predicate::str::contains("(1 rules)"));
}

#[test]
fn test_config_validate_invalid_yaml() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), "filters: [unclosed");

	tpf_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_validate_invalid_pattern() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(
		temp_dir.path(),
		"root: true\nfilters:\n  helm_release:\n    argocd: \"[broken\"\n",
	);

	tpf_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid filter pattern"));
}

#[test]
fn test_config_show_displays_rules() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_config(temp_dir.path(), ARGOCD_CONFIG);

	tpf_cmd(temp_dir.path())
		.args(["config", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains(".tpf.yaml"))
		.stdout(predicate::str::contains(
			"helm_release.argocd: customresourcedefinition.*",
		));
}

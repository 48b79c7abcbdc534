//! End-to-End CLI Tests for heartpage

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get path to test fixtures
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Command pointing to the heartpage binary, run from an empty directory so
/// no stray `.heartpage/config.toml` is picked up.
fn heartpage(cwd: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("heartpage");
    cmd.current_dir(cwd.path()).env("RUST_LOG", "warn");
    cmd
}

// ============================================
// Basic CLI Tests
// ============================================

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        let temp = TempDir::new().unwrap();
        heartpage(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("replay"))
            .stdout(predicate::str::contains("palette"));
    }

    #[test]
    fn shows_version() {
        let temp = TempDir::new().unwrap();
        heartpage(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn lists_default_palette() {
        let temp = TempDir::new().unwrap();
        heartpage(&temp)
            .arg("palette")
            .assert()
            .success()
            .stdout(predicate::str::contains(" 0  linear-gradient(135deg, #667eea 0%, #764ba2 100%)"))
            .stdout(predicate::str::contains(" 9  linear-gradient(135deg, #fd79a8 0%, #fdcb6e 100%)"));
    }
}

// ============================================
// Replay Tests
// ============================================

mod replay {
    use super::*;

    #[test]
    fn prints_state_after_every_step() {
        let temp = TempDir::new().unwrap();
        heartpage(&temp)
            .arg("replay")
            .arg(fixtures_path().join("tour.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "slide 1/5 autoplay=running period=5000ms profile=normal",
            ))
            .stdout(predicate::str::contains("wait 5000ms ticks=1"))
            .stdout(predicate::str::contains(
                "slide 5/5 autoplay=running period=7000ms profile=narrow",
            ))
            .stdout(predicate::str::contains("wait 30000ms ticks=0"))
            .stdout(predicate::str::contains(
                "slide 1/5 autoplay=stopped period=7000ms profile=narrow",
            ));
    }

    #[test]
    fn json_prints_final_snapshot() {
        let temp = TempDir::new().unwrap();
        let output = heartpage(&temp)
            .arg("replay")
            .arg(fixtures_path().join("tour.txt"))
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(snapshot["slide"], 0);
        assert_eq!(snapshot["total"], 5);
        assert_eq!(snapshot["autoplay"], "stopped");
        assert_eq!(snapshot["period_ms"], 7000);
        assert_eq!(snapshot["profile"], "narrow");
        assert!(snapshot["background"].is_null());
    }

    #[test]
    fn explicit_config_is_applied() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("script.txt");
        std::fs::write(&script, "ready 500\ncolor\nwait 9000\n").unwrap();

        let output = heartpage(&temp)
            .arg("replay")
            .arg(&script)
            .arg("--config")
            .arg(fixtures_path().join("narrow.toml"))
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(snapshot["total"], 3);
        assert_eq!(snapshot["slide"], 1);
        assert_eq!(snapshot["period_ms"], 9000);
        assert_eq!(snapshot["background"], "#fff");
    }

    #[test]
    fn project_config_is_picked_up_from_cwd() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".heartpage")).unwrap();
        std::fs::write(temp.path().join(".heartpage/config.toml"), "slides = 2\n").unwrap();
        std::fs::write(temp.path().join("s.txt"), "ready\nleft\n").unwrap();

        heartpage(&temp)
            .args(["replay", "s.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("slide 2/2"));
    }

    #[test]
    fn malformed_script_fails_with_line_number() {
        let temp = TempDir::new().unwrap();
        heartpage(&temp)
            .arg("replay")
            .arg(fixtures_path().join("broken.txt"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("line 3: unknown command `jump`"));
    }

    #[test]
    fn missing_script_fails() {
        let temp = TempDir::new().unwrap();
        heartpage(&temp)
            .args(["replay", "does-not-exist.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to read script"));
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("bad.toml");
        std::fs::write(&config, "palette = []\n").unwrap();
        std::fs::write(temp.path().join("s.txt"), "ready\n").unwrap();

        heartpage(&temp)
            .args(["replay", "s.txt", "--config"])
            .arg(&config)
            .assert()
            .failure()
            .stderr(predicate::str::contains("palette is empty"));
    }
}

// ============================================
// Live Session Tests
// ============================================

mod live {
    use super::*;

    #[test]
    fn reads_commands_from_stdin_until_quit() {
        let temp = TempDir::new().unwrap();
        heartpage(&temp)
            .args(["run", "--seed", "1"])
            .write_stdin("right\nright\nclick 4\nspace\nquit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("slide 3/5"))
            .stdout(predicate::str::contains("slide 5/5 autoplay=paused"))
            .stdout(predicate::str::contains("autoplay=stopped"));
    }

    #[test]
    fn end_of_input_tears_down() {
        let temp = TempDir::new().unwrap();
        heartpage(&temp)
            .args(["run", "--width", "400"])
            .write_stdin("left\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("profile=narrow"))
            .stdout(predicate::str::contains("slide 5/5 autoplay=stopped period=7000ms"));
    }
}

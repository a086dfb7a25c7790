// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

// CLI Integration Tests
//
// Runs the built `ezfuse` binary with HOME pointed at a scratch directory and
// shell scripts standing in for the mount binary, then checks exit status,
// output and what is left behind in HOME.

use std::{
    ffi::OsStr,
    fs,
    os::unix::{
        ffi::OsStrExt,
        fs::{PermissionsExt, symlink},
    },
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use serial_test::serial;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        Self { dir }
    }

    fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    fn log(&self) -> PathBuf {
        self.dir.path().join("calls.log")
    }

    /// Executable script that logs `<name> <args...>` then runs `body`.
    fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join("bin").join(name);
        let content = format!(
            "#!/bin/sh\necho \"{name} $*\" >> '{}'\n{body}\n",
            self.log().display()
        );
        fs::write(&path, content).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn leftovers(&self) -> Vec<String> {
        fs::read_dir(self.home())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("ezmount-"))
            .collect()
    }

    fn ezfuse<I, S>(&self, args: I) -> Output
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        Command::new(env!("CARGO_BIN_EXE_ezfuse"))
            .args(args)
            .current_dir(self.dir.path())
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()
            .unwrap()
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
#[serial]
fn test_failed_mount_exits_2_and_removes_mountpoint() {
    let sb = Sandbox::new();
    let fs_bin = sb.script("brokenfs", "exit 1");

    let output = sb.ezfuse(["-t", &path_arg(&fs_bin), "--force", "remote:/"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(sb.leftovers().is_empty());
    let stdout = text(&output.stdout);
    assert!(stdout.contains("Error while mounting"));
    assert!(stdout.contains("Remove mountpoint"));
}

#[test]
#[serial]
fn test_interrupt_during_mount_cleans_up() {
    let sb = Sandbox::new();
    // Ctrl-C reaches ezfuse and the mount command alike; the command gives up
    let fs_bin = sb.script("slowfs", "kill -INT $PPID\nsleep 1\nexit 130");

    let output = sb.ezfuse(["-t", &path_arg(&fs_bin), "--force", "remote:/"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(sb.leftovers().is_empty());
    assert!(text(&output.stdout).contains("Remove mountpoint"));
}

#[test]
#[serial]
fn test_bare_program_name_cannot_pick_binary() {
    let sb = Sandbox::new();

    let output = sb.ezfuse(["remote:/"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("Cannot find fuse mount binary"));
    assert!(sb.leftovers().is_empty());
}

#[test]
#[serial]
fn test_verbose_logs_config_file() {
    let sb = Sandbox::new();

    let output = sb.ezfuse(["-v", "remote:/"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = text(&output.stderr);
    assert!(stderr.contains("Config file:"));
    assert!(stderr.contains("ezfuse/config.toml"));
}

#[test]
#[serial]
fn test_non_utf8_program_name_is_an_error_not_a_crash() {
    let sb = Sandbox::new();
    let link = sb
        .dir
        .path()
        .join("bin")
        .join(OsStr::from_bytes(b"ezbad\xfffs"));
    symlink(env!("CARGO_BIN_EXE_ezfuse"), &link).unwrap();

    let output = Command::new(&link)
        .arg("remote:/")
        .env("HOME", sb.home())
        .env("XDG_CONFIG_HOME", sb.home().join(".config"))
        .stdin(Stdio::null())
        .output()
        .unwrap();

    // The lossy name resolves to a binary that does not exist
    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("Cannot use"));
    assert!(sb.leftovers().is_empty());
}

#[test]
#[serial]
fn test_failing_version_check_exits_before_mountpoint() {
    let sb = Sandbox::new();
    let fs_bin = sb.script("badfs", "exit 1");

    let output = sb.ezfuse(["-t", &path_arg(&fs_bin), "remote:/"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(sb.leftovers().is_empty());
    assert_eq!(sb.calls(), vec!["badfs --version"]);
}

#[test]
#[serial]
fn test_force_skips_version_check() {
    let sb = Sandbox::new();
    let fs_bin = sb.script("goodfs", "exit 0");

    // stdin is empty, so the menu exits straight away
    let output = sb.ezfuse(["-t", &path_arg(&fs_bin), "--force", "remote:/"]);

    assert_eq!(output.status.code(), Some(0));
    let calls = sb.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("goodfs remote:/ "));
    assert!(calls[0].contains("/home/ezmount-goodfs-"));
    // Nothing was really mounted, so the directory goes away on exit
    assert!(sb.leftovers().is_empty());
}

#[test]
#[serial]
fn test_version_check_runs_without_force() {
    let sb = Sandbox::new();
    let fs_bin = sb.script("goodfs", "exit 0");

    let output = sb.ezfuse(["-t", &path_arg(&fs_bin), "remote:/"]);

    assert_eq!(output.status.code(), Some(0));
    let calls = sb.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], "goodfs --version");
    assert!(calls[1].starts_with("goodfs remote:/ "));
}

#[test]
#[serial]
fn test_show_config_merges_file_and_flags() {
    let sb = Sandbox::new();
    let config = sb.dir.path().join("config.toml");
    fs::write(&config, "opener = \"gio open\"\numount = [\"umount\", \"-l\"]\n").unwrap();

    let output = sb.ezfuse(["-c", &path_arg(&config), "--pwd", "--show-config"]);

    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["pwd"], true);
    assert_eq!(json["force"], false);
    assert_eq!(json["opener"], serde_json::json!(["gio", "open"]));
    assert_eq!(json["umount"], serde_json::json!(["umount", "-l"]));
    assert!(sb.leftovers().is_empty());
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() {
    let sb = Sandbox::new();

    let output = sb.ezfuse(["-c", "absent.toml", "--show-config"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("absent.toml"));
}

#[test]
#[serial]
fn test_version_flag() {
    let sb = Sandbox::new();

    let output = sb.ezfuse(["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        text(&output.stdout).trim_end(),
        format!("ezfuse version {}", env!("CARGO_PKG_VERSION"))
    );
}

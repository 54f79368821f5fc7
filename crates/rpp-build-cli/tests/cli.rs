use assert_cmd::Command;
use predicates::prelude::*;

const FLAGS: &[&str] = &[
    "BUILD_TESTS",
    "BUILD_WITH_MEM_SAFETY",
    "BUILD_WITH_THREAD_SAFETY",
    "BUILD_WITH_CODE_COVERAGE",
    "CXX17",
    "CXX20",
    "APPVEYOR",
    "RPP_PLATFORM",
    "RPP_TEST_EXE",
    "RPP_GDB",
    "RUST_LOG",
];

fn rpp_build() -> Command {
    let mut cmd = Command::cargo_bin("rpp-build").unwrap();
    for flag in FLAGS {
        cmd.env_remove(flag);
    }
    cmd
}

#[test]
fn options_from_env() {
    rpp_build()
        .args(["options", "--platform", "linux"])
        .env("BUILD_WITH_MEM_SAFETY", "ON")
        .env("CXX20", "1")
        .env("BUILD_WITH_CODE_COVERAGE", "0")
        .assert()
        .success()
        .stdout("-DBUILD_WITH_MEM_SAFETY=ON\n-DCXX20=TRUE\n");
}

#[test]
fn options_forced_and_extra() {
    rpp_build()
        .args([
            "options",
            "--platform",
            "raspi",
            "--tests",
            "-D",
            "BUILD_TESTS=OFF",
            "--effective",
        ])
        .assert()
        .success()
        .stdout("-DRPP_WITH_LIBDW=OFF\n-DBUILD_TESTS=OFF\n");
}

#[test]
fn options_json() {
    rpp_build()
        .args(["options", "--platform", "windows", "--cxx", "17", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"CXX17\""));
}

#[test]
fn syslibs_linker_args() {
    rpp_build()
        .args(["syslibs", "--platform", "mips"])
        .assert()
        .success()
        .stdout("-ldl\n-ldw\n-lrt\n-latomic\n");

    rpp_build()
        .args(["syslibs", "--platform", "ios"])
        .assert()
        .success()
        .stdout("-framework Foundation\n");
}

#[test]
fn syslibs_hints() {
    rpp_build()
        .args(["syslibs", "--platform", "linux", "--hints"])
        .assert()
        .success()
        .stdout("libdw-dev\n");
}

#[test]
fn unknown_platform_is_a_usage_error() {
    rpp_build()
        .args(["syslibs", "--platform", "beos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("beos"));
}

#[test]
fn resolve_json() {
    rpp_build()
        .args(["resolve", "--platform", "linux", "--test-args", "nogdb -v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"wrap_in_debugger\": false"))
        .stdout(predicate::str::contains("\"libdw-dev\""));
}

#[test]
fn platforms_lists_all() {
    rpp_build()
        .arg("platforms")
        .assert()
        .success()
        .stdout(predicate::str::contains("oclea"))
        .stdout(predicate::str::contains("mips"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn script(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("RppTests");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_propagates_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(&dir, "exit 7");

        rpp_build()
            .args(["test", "--platform", "linux", "--test-exe"])
            .arg(&exe)
            .args(["--", "nogdb", "-v"])
            .assert()
            .code(7)
            .stderr(predicate::str::contains(exe.display().to_string()))
            .stderr(predicate::str::contains("exit code 7"));
    }

    #[test]
    fn test_passes_args_through() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(&dir, r#"[ "$1" = "-v" ] && [ $# -eq 1 ]"#);

        rpp_build()
            .args(["test", "--platform", "windows", "--test-exe"])
            .arg(&exe)
            .args(["--", "nogdb", "-v"])
            .assert()
            .success();
    }

    #[test]
    fn test_runs_under_debugger_with_batch_flags() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(&dir, "exit 0");
        let record = dir.path().join("argv.txt");
        let gdb = dir.path().join("gdb");
        std::fs::write(
            &gdb,
            format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nexit 7\n", record.display()),
        )
        .unwrap();
        std::fs::set_permissions(&gdb, std::fs::Permissions::from_mode(0o755)).unwrap();

        rpp_build()
            .args(["test", "--platform", "linux", "--gdb"])
            .arg(&gdb)
            .arg("--test-exe")
            .arg(&exe)
            .args(["--", "-v"])
            .assert()
            .code(7)
            .stderr(predicate::str::contains(gdb.display().to_string()))
            .stderr(predicate::str::contains("exit code 7"));

        let recorded = std::fs::read_to_string(&record).unwrap();
        let exe = exe.display().to_string();
        assert_eq!(
            recorded.lines().collect::<Vec<_>>(),
            [
                "-batch",
                "-return-child-result",
                "-ex",
                "run",
                "-ex",
                "bt",
                "-ex",
                "quit",
                "--args",
                exe.as_str(),
                "-v"
            ]
        );
    }

    #[test]
    fn test_missing_gdb_falls_back_to_direct_run() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(&dir, "exit 0");

        rpp_build()
            .args(["test", "--platform", "linux", "--gdb", "/nonexistent/gdb", "--test-exe"])
            .arg(&exe)
            .assert()
            .success();
    }
}

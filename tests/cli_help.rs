use std::process::Command;

#[test]
fn help_lists_every_command() {
    let bin = env!("CARGO_BIN_EXE_gantry");

    let output = Command::new(bin).arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["init", "sync", "diff", "show", "enable", "disable"] {
        assert!(
            stdout.contains(command),
            "help output should list `{}`; got:\n{}",
            command,
            stdout
        );
    }
}

#[test]
fn version_prints_package_version() {
    let bin = env!("CARGO_BIN_EXE_gantry");

    let output = Command::new(bin).arg("--version").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

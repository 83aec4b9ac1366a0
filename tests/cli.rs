use std::process::Command;

#[test]
fn missing_font_exits_one_with_message() {
    let log = std::env::temp_dir()
        .join(format!("bandwidth-monitor-cli-{}.log", std::process::id()));
    let output = Command::new(env!("CARGO_BIN_EXE_bandwidth_monitor"))
        .env("BANDWIDTH_MONITOR_FONT", "/nonexistent/fonts/Missing.ttf")
        .env("BANDWIDTH_MONITOR_LOG", &log)
        .output()
        .unwrap();
    std::fs::remove_file(&log).ok();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.lines().any(|line| line.starts_with("Error: ")),
        "stderr was: {stderr}"
    );
}

use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_svg-choreo")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "svg-choreo.exe"
            } else {
                "svg-choreo"
            });
            p
        })
}

#[test]
fn cli_script_writes_timeline() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("timeline.json");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["script", "--in", "tests/data/stage_sequence.json", "--out"])
        .arg(out_path.to_string_lossy().as_ref())
        .status()
        .unwrap();
    assert!(status.success());

    let out: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let items = out.as_array().unwrap();
    assert_eq!(items.len(), 7);
    assert_eq!(items[1]["position"], "<");
    assert_eq!(items[1]["start"], 0.0);
}

#[test]
fn cli_load_prints_positioned_markup() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let svg_path = dir.join("door.svg");
    std::fs::write(
        &svg_path,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect id="door1"/></svg>"#,
    )
    .unwrap();

    let output = std::process::Command::new(exe())
        .args(["load", "--target", "stage", "--x", "3", "--y", "4", "--url"])
        .arg(svg_path.to_string_lossy().as_ref())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(r#"<div id="stage">"#));
    assert!(stdout.contains(r#"transform="translate(3 4)""#));
    assert!(stdout.contains(r#"<rect id="door1"/>"#));
}

use std::path::PathBuf;
use std::process::Command;

fn cargo_bin() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("target");
    path.push("debug");
    path.push("mdtohwpx");
    path
}

fn write_sample(dir: &std::path::Path) -> PathBuf {
    let input = dir.join("sample.md");
    std::fs::write(
        &input,
        "# 제목\n\n본문 문단입니다.\n\n- [x] 완료\n- [ ] 할 일\n",
    )
    .unwrap();
    input
}

#[test]
fn test_cli_basic_conversion() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_sample(tmp.path());
    let output = tmp.path().join("out.hwpx");

    let status = Command::new(cargo_bin())
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(output.exists());
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[0..2], &[0x50, 0x4B]); // ZIP magic
}

#[test]
fn test_cli_default_output_filename() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_sample(tmp.path());

    let status = Command::new(cargo_bin()).arg(&input).status().unwrap();

    assert!(status.success());
    let expected = tmp.path().join("sample.hwpx");
    assert!(expected.exists(), "기본 출력 파일 없음: {}", expected.display());
}

#[test]
fn test_cli_style_preset() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_sample(tmp.path());
    let output = tmp.path().join("styled.hwpx");

    let status = Command::new(cargo_bin())
        .arg(&input)
        .arg(&output)
        .arg("--style")
        .arg("academic")
        .status()
        .unwrap();

    assert!(status.success());
    assert!(output.exists());
}

#[test]
fn test_cli_unknown_style_exits_2() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_sample(tmp.path());

    let output = Command::new(cargo_bin())
        .arg(&input)
        .arg("--style")
        .arg("nonexistent")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nonexistent"), "stderr: {}", stderr);
}

#[test]
fn test_cli_missing_input_file_exits_3() {
    let tmp = tempfile::tempdir().unwrap();

    let output = Command::new(cargo_bin())
        .arg(tmp.path().join("없는파일.md"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_cli_no_arguments_exits_2() {
    let output = Command::new(cargo_bin()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_list_styles() {
    let output = Command::new(cargo_bin()).arg("--list-styles").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for preset in ["default", "academic", "business", "minimal"] {
        assert!(stdout.contains(preset), "{} 누락: {}", preset, stdout);
    }
}

#[test]
fn test_cli_warnings_on_stderr() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("warn.md");
    std::fs::write(&input, "본문[^없는각주]\n").unwrap();

    let output = Command::new(cargo_bin()).arg(&input).output().unwrap();

    assert!(output.status.success(), "경고는 변환을 막지 않는다");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("경고"), "stderr: {}", stderr);
}

#[test]
fn test_cli_local_image_resolved() {
    let tmp = tempfile::tempdir().unwrap();
    // 차원 헤더까지만 유효한 PNG
    let mut png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend_from_slice(&13u32.to_be_bytes());
    png.extend_from_slice(b"IHDR");
    png.extend_from_slice(&32u32.to_be_bytes());
    png.extend_from_slice(&32u32.to_be_bytes());
    png.extend_from_slice(&[8, 6, 0, 0, 0]);
    std::fs::write(tmp.path().join("pic.png"), &png).unwrap();

    let input = tmp.path().join("doc.md");
    std::fs::write(&input, "![로컬 그림](pic.png)\n").unwrap();
    let output = tmp.path().join("doc.hwpx");

    let status = Command::new(cargo_bin())
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    let bytes = std::fs::read(&output).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert!(archive.by_name("BinData/image1.png").is_ok());
}

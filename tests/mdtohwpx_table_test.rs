use std::io::{Cursor, Read};

use mdtohwpx::{convert, ConvertOptions, WarningKind};
use zip::ZipArchive;

fn section_of(source: &str) -> String {
    let bytes = convert(source.as_bytes(), "default", &ConvertOptions::default())
        .expect("변환 실패")
        .bytes;
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("ZIP 열기 실패");
    let mut section = String::new();
    archive
        .by_name("Contents/section0.xml")
        .unwrap()
        .read_to_string(&mut section)
        .unwrap();
    section
}

#[test]
fn test_gfm_table_scenario() {
    // 시나리오: 2열(왼쪽/오른쪽 정렬), 머리글 1행 + 몸통 1행
    let section = section_of("| a | b |\n|:--|--:|\n| 1 | 2 |\n");

    assert_eq!(section.matches("<hp:tbl ").count(), 1);
    assert_eq!(section.matches("<hp:tc ").count(), 4, "셀 수는 4");
    assert_eq!(section.matches("<hp:tr>").count(), 2);
    assert!(section.contains(r#"colCnt="2""#));
    assert!(section.contains(r#"rowCnt="2""#));

    // 열 정렬 오버레이
    assert!(section.contains(r#"align="LEFT""#));
    assert!(section.contains(r#"align="RIGHT""#));

    // 머리글 셀은 header="1" + 굵은 글자 역할(1)
    assert_eq!(section.matches(r#"header="1""#).count(), 2);
    assert!(section.contains(r#"<hp:run charPrIDRef="1"><hp:t>a</hp:t></hp:run>"#));
    // 몸통 셀은 기본 글자 역할(0)
    assert!(section.contains(r#"<hp:run charPrIDRef="0"><hp:t>1</hp:t></hp:run>"#));
}

#[test]
fn test_every_row_has_alignment_count_cells() {
    let section = section_of("| a | b | c |\n|---|---|---|\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |\n");
    for (idx, row) in section.split("<hp:tr>").skip(1).enumerate() {
        let row = row.split("</hp:tr>").next().unwrap();
        assert_eq!(row.matches("<hp:tc ").count(), 3, "{}번째 행 셀 수", idx);
    }
}

#[test]
fn test_short_row_padded_and_warned() {
    let conversion = convert(
        "| a | b | c |\n|---|---|---|\n| 1 |\n".as_bytes(),
        "default",
        &ConvertOptions::default(),
    )
    .unwrap();
    assert!(conversion
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::TableShape));

    let mut archive = ZipArchive::new(Cursor::new(conversion.bytes)).unwrap();
    let mut section = String::new();
    archive
        .by_name("Contents/section0.xml")
        .unwrap()
        .read_to_string(&mut section)
        .unwrap();
    assert_eq!(section.matches("<hp:tc ").count(), 6);
}

#[test]
fn test_long_row_truncated() {
    let conversion = convert(
        "| a | b |\n|---|---|\n| 1 | 2 | 3 | 4 |\n".as_bytes(),
        "default",
        &ConvertOptions::default(),
    )
    .unwrap();
    let mut archive = ZipArchive::new(Cursor::new(conversion.bytes)).unwrap();
    let mut section = String::new();
    archive
        .by_name("Contents/section0.xml")
        .unwrap()
        .read_to_string(&mut section)
        .unwrap();
    assert_eq!(section.matches("<hp:tc ").count(), 4);
}

#[test]
fn test_column_widths_sum_to_table_width() {
    let section = section_of("| a | b | c |\n|---|---|---|\n| 1 | 2 | 3 |\n");
    // 3열: 13333 + 13333 + 13334 = 40000, 마지막 열이 나머지 흡수
    assert!(section.contains(r#"width="13333""#));
    assert!(section.contains(r#"width="13334""#));
    assert!(section.contains(r#"width="40000""#));
}

#[test]
fn test_cell_addresses() {
    let section = section_of("| a | b |\n|---|---|\n| 1 | 2 |\n");
    for (col, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let addr = format!(r#"<hp:cellAddr colAddr="{}" rowAddr="{}"/>"#, col, row);
        assert!(section.contains(&addr), "{} 누락", addr);
    }
}

#[test]
fn test_no_merged_cells() {
    let section = section_of("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert_eq!(
        section.matches(r#"<hp:cellSpan colSpan="1" rowSpan="1"/>"#).count(),
        4
    );
}

#[test]
fn test_cell_inline_formatting_rendered() {
    let section = section_of("| 머리 |\n|---|\n| **굵은** 값 |\n");
    // 셀 내용도 일반 인라인 렌더링을 거친다
    assert!(section.contains(r#"<hp:run charPrIDRef="1"><hp:t>굵은</hp:t></hp:run>"#));
    assert!(section.contains("<hp:t> 값</hp:t>"));
}

#[test]
fn test_malformed_alignment_row_no_table() {
    let section = section_of("| a | b |\n| 깨진 정렬 |\n| 1 | 2 |\n");
    assert!(!section.contains("<hp:tbl"));
    assert!(section.contains("<hp:t>"));
}

#[test]
fn test_table_wrapped_in_paragraph_run() {
    let section = section_of("| a |\n|---|\n| 1 |\n");
    let tbl_pos = section.find("<hp:tbl ").unwrap();
    let wrap = &section[..tbl_pos];
    assert!(wrap.rfind("<hp:p ").is_some());
    assert!(wrap.rfind("<hp:run ").is_some());
}

use std::io::{Cursor, Read};

use mdtohwpx::{convert, ConvertOptions};
use zip::ZipArchive;

/// Markdown → HWPX 변환 헬퍼
fn convert_md(source: &str) -> Vec<u8> {
    convert(source.as_bytes(), "default", &ConvertOptions::default())
        .expect("변환 실패")
        .bytes
}

/// HWPX 바이트가 유효한 ZIP인지 확인하고 아카이브를 돌려준다
fn open_archive(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
    assert!(!bytes.is_empty(), "HWPX 바이트가 비어있음");
    assert!(
        bytes.len() >= 4 && bytes[0..2] == [0x50, 0x4B],
        "유효한 ZIP 파일이 아닙니다"
    );
    ZipArchive::new(Cursor::new(bytes)).expect("ZIP 아카이브를 열지 못했습니다")
}

fn read_member(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("{} 멤버 없음: {}", name, e))
        .read_to_string(&mut content)
        .expect("멤버 읽기 실패");
    content
}

fn section_of(source: &str) -> String {
    let mut archive = open_archive(convert_md(source));
    read_member(&mut archive, "Contents/section0.xml")
}

/// `hp:p` 여는 태그들에서 id 속성 값을 문서 순서대로 수집
fn para_ids(section: &str) -> Vec<u32> {
    let mut ids = Vec::new();
    for chunk in section.split("<hp:p ").skip(1) {
        let tag = &chunk[..chunk.find('>').expect("닫히지 않은 태그")];
        let start = tag.find(" id=\"").expect("id 속성 없음") + 5;
        let end = tag[start..].find('"').unwrap() + start;
        ids.push(tag[start..end].parse().unwrap());
    }
    ids
}

#[test]
fn test_mimetype_first_stored_with_exact_content() {
    let mut archive = open_archive(convert_md("# 문서\n"));
    let mut first = archive.by_index(0).unwrap();
    assert_eq!(first.name(), "mimetype");
    assert_eq!(first.compression(), zip::CompressionMethod::Stored);
    let mut content = String::new();
    first.read_to_string(&mut content).unwrap();
    assert_eq!(content, "application/hwp+zip");
}

#[test]
fn test_archive_member_layout() {
    let mut archive = open_archive(convert_md("본문\n"));
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "mimetype",
            "META-INF/container.xml",
            "META-INF/manifest.xml",
            "Contents/content.hpf",
            "Contents/header.xml",
            "Contents/section0.xml",
            "Preview/PrvText.txt",
            "settings.xml",
            "scripts.xml",
        ]
    );
}

#[test]
fn test_xml_members_have_declaration() {
    let mut archive = open_archive(convert_md("본문\n"));
    for name in [
        "META-INF/container.xml",
        "META-INF/manifest.xml",
        "Contents/content.hpf",
        "Contents/header.xml",
        "Contents/section0.xml",
    ] {
        let content = read_member(&mut archive, name);
        assert!(
            content.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#),
            "{} XML 선언 누락",
            name
        );
    }
}

#[test]
fn test_empty_input_single_empty_paragraph() {
    let conversion = convert(b"", "default", &ConvertOptions::default()).unwrap();
    assert!(conversion.warnings.is_empty(), "빈 입력에 경고 없음");
    let mut archive = open_archive(conversion.bytes);
    let section = read_member(&mut archive, "Contents/section0.xml");
    assert_eq!(section.matches("<hp:p ").count(), 1);
    assert!(section.contains("hp:secPr"));
}

#[test]
fn test_headings_one_through_six() {
    let section = section_of("# A\n## B\n### C\n#### D\n##### E\n###### F\n");
    assert_eq!(section.matches("<hp:p ").count(), 6);
    // h1..h6 문단 역할이 순서대로 (역할 ID 1..6)
    for level in 1..=6u32 {
        assert!(
            section.contains(&format!(r#"paraPrIDRef="{}""#, level)),
            "h{} 역할 누락",
            level
        );
    }
    for text in ["A", "B", "C", "D", "E", "F"] {
        assert!(section.contains(&format!("<hp:t>{}</hp:t>", text)));
    }
    let h1_pos = section.find(r#"paraPrIDRef="1""#).unwrap();
    let h6_pos = section.find(r#"paraPrIDRef="6""#).unwrap();
    assert!(h1_pos < h6_pos);
}

#[test]
fn test_paragraph_ids_unique_and_sequential() {
    let section = section_of(
        "# 제목\n\n문단[^n]\n\n> 인용\n\n- 하나\n- 둘\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n[^n]: 각주\n",
    );
    let ids = para_ids(&section);
    let expected: Vec<u32> = (0..ids.len() as u32).collect();
    assert_eq!(ids, expected, "문단 ID는 문서 순서대로 0..N-1");
}

#[test]
fn test_task_list_numberings() {
    let section = section_of("- [x] done\n- [ ] todo\n");
    assert!(section.contains(r#"numberingIDRef="3""#), "완료 항목 번호 매김");
    assert!(section.contains(r#"numberingIDRef="4""#), "미완료 항목 번호 매김");
    assert!(section.contains("<hp:t>done</hp:t>"));
    assert!(section.contains("<hp:t>todo</hp:t>"));
}

#[test]
fn test_fenced_code_block_preserved() {
    let section = section_of("```python\nprint(1)\n```\n");
    assert!(section.contains(r#"info="python""#));
    assert!(section.contains("<hp:t>print(1)</hp:t>"));
    // 코드 한 줄 + 종결 빈 문단이 코드 블록 역할(7)로 나온다
    assert_eq!(section.matches(r#"paraPrIDRef="7""#).count(), 2);
}

#[test]
fn test_footnote_reference_id_equals_definition_id() {
    let section = section_of("see[^a].\n\n[^a]: note\n");
    // 각주 내용은 참조 위치의 footNote 요소 안으로 끌어올려진다
    assert!(section.contains(r#"<hp:footNote id="0">"#));
    assert!(section.contains("<hp:t>note</hp:t>"));
    // 참조 런은 위첨자 글자 역할(7)
    assert!(section.contains(r#"<hp:run charPrIDRef="7"><hp:footNote id="0">"#));
}

#[test]
fn test_strikethrough_emitted_in_header() {
    let md = "~~지움~~\n";
    let mut archive = open_archive(convert_md(md));
    let header = read_member(&mut archive, "Contents/header.xml");
    assert!(
        header.contains(r##"<hh:strikeout color="#000000" shape="SINGLE"/>"##),
        "strike 역할은 SINGLE 취소선을 선언해야 함"
    );
    let section = read_member(&mut archive, "Contents/section0.xml");
    // strike 글자 역할(4)로 런이 나온다
    assert!(section.contains(r#"<hp:run charPrIDRef="4"><hp:t>지움</hp:t></hp:run>"#));
}

#[test]
fn test_deterministic_across_runs() {
    let source = "# 제목\n\n- [x] 할 일\n\n| a | b |\n|:--|--:|\n| 1 | 2 |\n\n각주[^f]\n\n[^f]: 내용\n";
    let first = convert_md(source);
    let second = convert_md(source);
    assert_eq!(first, second, "같은 입력은 바이트 단위로 같은 출력");
}

#[test]
fn test_preview_contains_document_text() {
    let mut archive = open_archive(convert_md("# 한글 제목\n\n한글 본문입니다.\n"));
    let preview = read_member(&mut archive, "Preview/PrvText.txt");
    assert!(preview.contains("한글 제목"));
    assert!(preview.contains("한글 본문입니다."));
}

#[test]
fn test_metadata_options_in_content_hpf() {
    let mut options = ConvertOptions::default();
    options.set("title", "보고서").unwrap();
    options.set("author", "홍길동").unwrap();
    let bytes = convert("본문\n".as_bytes(), "default", &options).unwrap().bytes;
    let mut archive = open_archive(bytes);
    let hpf = read_member(&mut archive, "Contents/content.hpf");
    assert!(hpf.contains("<op:Title>보고서</op:Title>"));
    assert!(hpf.contains("<op:Creator>홍길동</op:Creator>"));
}

#[test]
fn test_special_characters_escaped() {
    let section = section_of("특수문자: <tag> & \"quotes\"\n");
    assert!(section.contains("&lt;tag&gt;"));
    assert!(section.contains("&amp;"));
    assert!(!section.contains("<tag>"));
}

#[test]
fn test_presets_differ_in_header_only_where_expected() {
    let source = "# 제목\n\n본문\n".as_bytes();
    let default = convert(source, "default", &ConvertOptions::default()).unwrap().bytes;
    let academic = convert(source, "academic", &ConvertOptions::default()).unwrap().bytes;
    assert_ne!(default, academic);

    let mut archive = open_archive(academic);
    let header = read_member(&mut archive, "Contents/header.xml");
    assert!(header.contains("바탕"), "academic 프리셋은 바탕 글꼴 사용");
}

#[test]
fn test_hard_break_renders_line_break() {
    let section = section_of("첫 줄  \n둘째 줄\n");
    assert!(section.contains("<hp:lineBreak/>"));
}

#[test]
fn test_link_field_pair_with_href() {
    let section = section_of("[링크](https://example.com)\n");
    assert!(section.contains(r#"command="https://example.com""#));
    assert!(section.contains(r#"type="HYPERLINK""#));
    assert!(section.contains("<hp:fieldEnd"));
}

#[test]
fn test_unresolved_footnote_warning_and_literal() {
    let conversion =
        convert("본문[^없음]\n".as_bytes(), "default", &ConvertOptions::default()).unwrap();
    assert!(conversion
        .warnings
        .iter()
        .any(|w| w.kind == mdtohwpx::WarningKind::UnresolvedFootnote));
    let mut archive = open_archive(conversion.bytes);
    let section = read_member(&mut archive, "Contents/section0.xml");
    assert!(section.contains("[^없음]"));
    assert!(!section.contains("<hp:footNote"));
}

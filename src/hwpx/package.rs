//! HWPX archive assembly.
//!
//! Serializes the rendered XML documents and writes the ZIP container in
//! the member order HWPX viewers accept: `mimetype` first and uncompressed,
//! then container/manifest/package parts, contents, binary data, preview,
//! and the static stubs. Everything is built in memory; no temp files.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ConvertError, Result};
use crate::hwpx::image::BinItem;
use crate::hwpx::xml::XmlElement;

/// Namespace block carried verbatim on OWPML root elements
/// (header/section/package documents).
pub const OWPML_NAMESPACES: &str = concat!(
    r#"xmlns:ha="http://www.hancom.co.kr/hwpml/2011/app" "#,
    r#"xmlns:hp="http://www.hancom.co.kr/hwpml/2011/paragraph" "#,
    r#"xmlns:hp10="http://www.hancom.co.kr/hwpml/2016/paragraph" "#,
    r#"xmlns:hs="http://www.hancom.co.kr/hwpml/2011/section" "#,
    r#"xmlns:hc="http://www.hancom.co.kr/hwpml/2011/core" "#,
    r#"xmlns:hh="http://www.hancom.co.kr/hwpml/2011/head" "#,
    r#"xmlns:hhs="http://www.hancom.co.kr/hwpml/2011/history" "#,
    r#"xmlns:hm="http://www.hancom.co.kr/hwpml/2011/master-page" "#,
    r#"xmlns:hpf="http://www.hancom.co.kr/schema/2011/hpf" "#,
    r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
    r#"xmlns:op="http://www.idpf.org/2007/opf/" "#,
    r#"xmlns:ooxmlchart="http://www.hancom.co.kr/hwpml/2016/ooxmlchart" "#,
    r#"xmlns:hwpunitchar="http://www.hancom.co.kr/hwpml/2016/HwpUnitChar" "#,
    r#"xmlns:epub="http://www.idpf.org/2007/ops" "#,
    r#"xmlns:config="urn:oasis:names:tc:opendocument:xmlns:config:1.0""#
);

const MIMETYPE: &str = "application/hwp+zip";

/// `Contents/content.hpf` 메타데이터
#[derive(Debug, Clone, Default)]
pub struct DocumentMeta {
    pub title: String,
    pub creator: String,
    pub subject: String,
}

struct Member {
    path: String,
    media_type: &'static str,
    data: Vec<u8>,
    stored: bool,
}

/// Assemble the complete `.hwpx` byte buffer.
pub fn build(
    section: &XmlElement,
    header: &XmlElement,
    bin_items: &[BinItem],
    preview: &str,
    meta: &DocumentMeta,
) -> Result<Vec<u8>> {
    let mut members: Vec<Member> = Vec::new();

    // mimetype must be first and uncompressed
    members.push(Member {
        path: "mimetype".to_string(),
        media_type: MIMETYPE,
        data: MIMETYPE.as_bytes().to_vec(),
        stored: true,
    });
    members.push(Member {
        path: "META-INF/container.xml".to_string(),
        media_type: "application/xml",
        data: container_xml().into_bytes(),
        stored: false,
    });
    members.push(Member {
        path: "Contents/content.hpf".to_string(),
        media_type: "application/hwpml-package+xml",
        data: content_hpf(bin_items, meta).into_bytes(),
        stored: false,
    });
    members.push(Member {
        path: "Contents/header.xml".to_string(),
        media_type: "application/xml",
        data: header.serialize_document(OWPML_NAMESPACES).into_bytes(),
        stored: false,
    });
    members.push(Member {
        path: "Contents/section0.xml".to_string(),
        media_type: "application/xml",
        data: section.serialize_document(OWPML_NAMESPACES).into_bytes(),
        stored: false,
    });
    for item in bin_items {
        members.push(Member {
            path: item.href(),
            media_type: item.image.format.media_type(),
            data: item.image.data.clone(),
            stored: true,
        });
    }
    members.push(Member {
        path: "Preview/PrvText.txt".to_string(),
        media_type: "text/plain",
        data: preview.as_bytes().to_vec(),
        stored: false,
    });
    members.push(Member {
        path: "settings.xml".to_string(),
        media_type: "application/xml",
        data: settings_xml().into_bytes(),
        stored: false,
    });
    members.push(Member {
        path: "scripts.xml".to_string(),
        media_type: "application/xml",
        data: scripts_xml().into_bytes(),
        stored: false,
    });

    // manifest enumerates every other member, in archive order
    let manifest = Member {
        path: "META-INF/manifest.xml".to_string(),
        media_type: "application/xml",
        data: manifest_xml(&members).into_bytes(),
        stored: false,
    };
    members.insert(2, manifest);

    write_zip(&members)
}

fn write_zip(members: &[Member]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    // 고정 타임스탬프: 같은 입력이면 바이트 단위로 같은 아카이브가 나온다
    let stored = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(zip::DateTime::default());
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for member in members {
        let options = if member.stored { stored } else { deflated };
        zip.start_file(member.path.as_str(), options)
            .map_err(|e| ConvertError::Io(std::io::Error::other(e)))?;
        zip.write_all(&member.data).map_err(ConvertError::Io)?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| ConvertError::Io(std::io::Error::other(e)))?;
    Ok(cursor.into_inner())
}

fn container_xml() -> String {
    XmlElement::new("ocf:container")
        .child(
            XmlElement::new("ocf:rootfiles").child(
                XmlElement::new("ocf:rootfile")
                    .attr("full-path", "Contents/content.hpf")
                    .attr("media-type", "application/hwpml-package+xml"),
            ),
        )
        .serialize_document(concat!(
            r#"xmlns:ocf="urn:oasis:names:tc:opendocument:xmlns:container" "#,
            r#"xmlns:hpf="http://www.hancom.co.kr/schema/2011/hpf""#
        ))
}

fn manifest_xml(members: &[Member]) -> String {
    let mut manifest = XmlElement::new("odf:manifest");
    for member in members {
        manifest.push(
            XmlElement::new("odf:file-entry")
                .attr("full-path", member.path.clone())
                .attr("media-type", member.media_type),
        );
    }
    manifest.serialize_document(
        r#"xmlns:odf="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0""#,
    )
}

fn content_hpf(bin_items: &[BinItem], meta: &DocumentMeta) -> String {
    let mut package = XmlElement::new("op:package")
        .attr("id", "")
        .attr("unique-identifier", "")
        .attr("version", "");

    let metadata = XmlElement::new("op:metadata")
        .child(XmlElement::new("op:Title").text(meta.title.clone()))
        .child(XmlElement::new("op:Creator").text(meta.creator.clone()))
        .child(XmlElement::new("op:Subject").text(meta.subject.clone()))
        .child(XmlElement::new("op:language").text("ko"));
    package.push(metadata);

    let mut manifest = XmlElement::new("op:manifest");
    manifest.push(package_item("header", "Contents/header.xml", "application/xml"));
    manifest.push(package_item(
        "section0",
        "Contents/section0.xml",
        "application/xml",
    ));
    for item in bin_items {
        manifest.push(
            XmlElement::new("op:item")
                .attr("href", item.href())
                .attr("id", item.item_id())
                .attr("isEmbeded", "1")
                .attr("media-type", item.image.format.media_type()),
        );
    }
    manifest.push(package_item("settings", "settings.xml", "application/xml"));
    manifest.push(package_item("scripts", "scripts.xml", "application/xml"));
    package.push(manifest);

    let spine = XmlElement::new("op:spine")
        .child(
            XmlElement::new("op:itemref")
                .attr("idref", "header")
                .attr("linear", "yes"),
        )
        .child(
            XmlElement::new("op:itemref")
                .attr("idref", "section0")
                .attr("linear", "yes"),
        );
    package.push(spine);

    package.serialize_document(OWPML_NAMESPACES)
}

fn package_item(id: &str, href: &str, media_type: &'static str) -> XmlElement {
    XmlElement::new("op:item")
        .attr("href", href)
        .attr("id", id)
        .attr("media-type", media_type)
}

fn settings_xml() -> String {
    XmlElement::new("ha:HWPApplicationSetting")
        .child(
            XmlElement::new("ha:CaretPosition")
                .attr("listIDRef", "0")
                .attr("paraIDRef", "0")
                .attr("pos", "0"),
        )
        .serialize_document(concat!(
            r#"xmlns:ha="http://www.hancom.co.kr/hwpml/2011/app" "#,
            r#"xmlns:config="urn:oasis:names:tc:opendocument:xmlns:config:1.0""#
        ))
}

fn scripts_xml() -> String {
    XmlElement::new("ha:scripts")
        .attr("count", "0")
        .serialize_document(r#"xmlns:ha="http://www.hancom.co.kr/hwpml/2011/app""#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn build_minimal() -> Vec<u8> {
        let section = XmlElement::new("hs:sec");
        let header = XmlElement::new("hh:head");
        build(&section, &header, &[], "미리보기", &DocumentMeta::default()).unwrap()
    }

    #[test]
    fn test_mimetype_first_and_stored() {
        let bytes = build_minimal();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
        let mut content = String::new();
        first.read_to_string(&mut content).unwrap();
        assert_eq!(content, "application/hwp+zip");
    }

    #[test]
    fn test_member_order() {
        let bytes = build_minimal();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
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
    fn test_manifest_enumerates_other_members() {
        let bytes = build_minimal();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut manifest = String::new();
        archive
            .by_name("META-INF/manifest.xml")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        for path in [
            "mimetype",
            "META-INF/container.xml",
            "Contents/content.hpf",
            "Contents/header.xml",
            "Contents/section0.xml",
            "Preview/PrvText.txt",
            "settings.xml",
            "scripts.xml",
        ] {
            assert!(manifest.contains(path), "manifest에 {} 누락", path);
        }
        assert!(!manifest.contains("META-INF/manifest.xml"));
    }

    #[test]
    fn test_content_hpf_metadata() {
        let meta = DocumentMeta {
            title: "문서 <제목>".to_string(),
            creator: "홍길동".to_string(),
            subject: String::new(),
        };
        let hpf = content_hpf(&[], &meta);
        assert!(hpf.contains("<op:Title>문서 &lt;제목&gt;</op:Title>"));
        assert!(hpf.contains("<op:Creator>홍길동</op:Creator>"));
        assert!(hpf.contains("<op:Subject/>"));
        assert!(hpf.contains(r#"<op:itemref idref="section0" linear="yes"/>"#));
    }

    #[test]
    fn test_deterministic_output() {
        assert_eq!(build_minimal(), build_minimal());
    }
}

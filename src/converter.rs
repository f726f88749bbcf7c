//! 변환 파사드.
//!
//! 파서(C2) → 렌더러(C4) → 패키저(C5)를 한 문서에 대해 순서대로 묶는다.
//! 변환 한 번은 동기적인 CPU 작업이며 프로세스 전역 가변 상태가 없다.
//! 카탈로그는 불변이고 ID 카운터는 호출 내부에만 있으므로 여러 변환을
//! 워커 스레드에서 병렬로 실행해도 된다.

use std::path::Path;

use crate::error::{ConvertError, Result, Warning};
use crate::hwpx::{self, DocumentMeta};
use crate::parser;
use crate::renderer;
use crate::styles;

/// 이미지 src를 바이트로 해석하는 콜백. 바이트를 돌려주면 `BinData/`에
/// 포장되고, `None`이면 자리표시자로 출력된다. 코어는 직접 I/O를 하지
/// 않으므로 파일/네트워크 접근은 전부 이 콜백의 몫이다.
pub type ImageResolver = Box<dyn Fn(&str) -> Option<Vec<u8>> + Send + Sync>;

/// 변환 옵션
pub struct ConvertOptions {
    /// `<op:Title>`
    pub title: Option<String>,
    /// `<op:Creator>`
    pub author: Option<String>,
    /// 목록/인용 중첩 한 단계당 들여쓰기 (HWPUNIT)
    pub base_indent: u32,
    pub image_resolver: Option<ImageResolver>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            base_indent: 1000,
            image_resolver: None,
        }
    }
}

impl std::fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("title", &self.title)
            .field("author", &self.author)
            .field("base_indent", &self.base_indent)
            .field("image_resolver", &self.image_resolver.is_some())
            .finish()
    }
}

impl ConvertOptions {
    /// 문자열 키로 옵션을 설정한다. 알 수 없는 키는 `ConfigError`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "title" => self.title = Some(value.to_string()),
            "author" => self.author = Some(value.to_string()),
            "base_indent" => {
                self.base_indent = value.parse().map_err(|_| {
                    ConvertError::Config(format!("base_indent 값이 올바르지 않음: '{}'", value))
                })?;
            }
            other => {
                return Err(ConvertError::Config(format!(
                    "알 수 없는 옵션 키: '{}'",
                    other
                )));
            }
        }
        Ok(())
    }
}

/// 변환 결과: HWPX 바이트와 진단 경고 목록
#[derive(Debug)]
pub struct Conversion {
    pub bytes: Vec<u8>,
    pub warnings: Vec<Warning>,
}

/// Markdown 바이트를 HWPX 바이트로 변환한다.
///
/// 입력은 UTF-8이어야 하며(BOM 허용) 아니면 `EncodingError`. 알 수 없는
/// 프리셋은 `ConfigError`. 그 외의 깨진 Markdown 조각은 로컬에서 복구해
/// 최선의 출력을 만들고 경고로 알린다.
pub fn convert(source: &[u8], preset: &str, options: &ConvertOptions) -> Result<Conversion> {
    let text = std::str::from_utf8(source)
        .map_err(|e| ConvertError::Encoding(format!("입력이 유효한 UTF-8이 아님: {}", e)))?;

    let catalog = styles::resolve(preset)?;
    let (doc, mut warnings) = parser::parse(text);
    let output = renderer::render(&catalog, options, &doc);
    warnings.extend(output.warnings);

    let meta = DocumentMeta {
        title: options.title.clone().unwrap_or_default(),
        creator: options.author.clone().unwrap_or_default(),
        subject: String::new(),
    };
    let header = catalog.header_xml(&output.bin_items);
    let bytes = hwpx::build(
        &output.section,
        &header,
        &output.bin_items,
        &output.preview,
        &meta,
    )?;

    Ok(Conversion { bytes, warnings })
}

/// Markdown 파일을 읽어 HWPX 파일로 저장한다.
pub fn convert_to_file(
    input: &Path,
    output: &Path,
    preset: &str,
    options: &ConvertOptions,
) -> Result<Vec<Warning>> {
    let source = std::fs::read(input)?;
    let conversion = convert(&source, preset, options)?;
    std::fs::write(output, &conversion.bytes)?;
    Ok(conversion.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_simple_text() {
        let result = convert("# 안녕\n\n본문입니다.\n".as_bytes(), "default", &ConvertOptions::default());
        let conversion = result.unwrap();
        assert!(!conversion.bytes.is_empty());
        // ZIP 매직 바이트 (PK\x03\x04)
        assert_eq!(&conversion.bytes[0..2], &[0x50, 0x4B]);
        assert!(conversion.warnings.is_empty());
    }

    #[test]
    fn test_unknown_preset_fails() {
        let err = convert(b"x", "nonexistent", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let err = convert(&[0xFF, 0xFE, 0x00], "default", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Encoding(_)));
    }

    #[test]
    fn test_all_presets_produce_output() {
        for preset in crate::styles::PRESETS {
            let conversion =
                convert("# 제목\n\n본문.\n".as_bytes(), preset, &ConvertOptions::default())
                    .unwrap();
            assert!(!conversion.bytes.is_empty(), "{} 프리셋 출력 없음", preset);
        }
    }

    #[test]
    fn test_option_set_known_keys() {
        let mut options = ConvertOptions::default();
        options.set("title", "문서 제목").unwrap();
        options.set("author", "작성자").unwrap();
        options.set("base_indent", "1500").unwrap();
        assert_eq!(options.title.as_deref(), Some("문서 제목"));
        assert_eq!(options.author.as_deref(), Some("작성자"));
        assert_eq!(options.base_indent, 1500);
    }

    #[test]
    fn test_option_set_unknown_key_fails() {
        let mut options = ConvertOptions::default();
        let err = options.set("page_size", "A4").unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_option_set_bad_value_fails() {
        let mut options = ConvertOptions::default();
        let err = options.set("base_indent", "넓게").unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_deterministic_bytes() {
        let source = "# a\n\n- [x] b\n\n| c | d |\n|:--|--:|\n| 1 | 2 |\n".as_bytes();
        let first = convert(source, "default", &ConvertOptions::default()).unwrap();
        let second = convert(source, "default", &ConvertOptions::default()).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_bom_stripped() {
        let conversion =
            convert("\u{feff}# 제목\n".as_bytes(), "default", &ConvertOptions::default())
                .unwrap();
        assert!(!conversion.bytes.is_empty());
    }
}

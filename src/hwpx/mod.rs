//! HWPX 포맷 계층: OWPML XML 트리, 바이너리 이미지, ZIP 패키징.

pub mod image;
pub mod package;
pub mod xml;

pub use image::{BinImage, BinImageFormat, BinItem};
pub use package::{build, DocumentMeta, OWPML_NAMESPACES};
pub use xml::{escape, XmlElement, XmlNode};

/// Binary image payload packaged under `BinData/`.
///
/// The converter never fetches or transcodes images itself; callers hand it
/// raw bytes through the image resolver and this type sniffs just enough to
/// package them: container format and pixel dimensions.
#[derive(Debug, Clone)]
pub struct BinImage {
    pub data: Vec<u8>,
    pub format: BinImageFormat,
    pub width_px: Option<u32>,
    pub height_px: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl BinImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 8 {
            return None;
        }
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Some(Self::Png)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if data.starts_with(b"GIF") {
            Some(Self::Gif)
        } else if data.starts_with(b"BM") {
            Some(Self::Bmp)
        } else {
            None
        }
    }
}

impl BinImage {
    /// Returns `None` for unrecognized container formats.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let format = BinImageFormat::from_bytes(&data)?;
        let (width_px, height_px) = read_dimensions(&data, format);
        Some(Self {
            data,
            format,
            width_px,
            height_px,
        })
    }

    /// Size in HWPUNIT (1/7200 inch) assuming 96 DPI pixels; falls back to
    /// 50mm square when the dimensions could not be read.
    pub fn hwp_size(&self) -> (u32, u32) {
        const FALLBACK: u32 = 14_173; // 50mm
        match (self.width_px, self.height_px) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w * 75, h * 75),
            _ => (FALLBACK, FALLBACK),
        }
    }
}

fn read_dimensions(data: &[u8], format: BinImageFormat) -> (Option<u32>, Option<u32>) {
    match format {
        BinImageFormat::Png => read_png_dimensions(data),
        BinImageFormat::Jpeg => read_jpeg_dimensions(data),
        BinImageFormat::Gif => read_gif_dimensions(data),
        BinImageFormat::Bmp => read_bmp_dimensions(data),
    }
}

fn read_png_dimensions(data: &[u8]) -> (Option<u32>, Option<u32>) {
    // PNG: 8-byte sig + 4-byte chunk_len + 4-byte "IHDR" + width + height
    if data.len() < 24 {
        return (None, None);
    }
    let w = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let h = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    (Some(w), Some(h))
}

fn read_jpeg_dimensions(data: &[u8]) -> (Option<u32>, Option<u32>) {
    // JPEG: SOF0(0xFFC0) 또는 SOF2(0xFFC2) 마커 찾기
    let mut i = 2;
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        if marker == 0xC0 || marker == 0xC2 {
            if i + 9 < data.len() {
                let h = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
                let w = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
                return (Some(w), Some(h));
            }
            return (None, None);
        }
        if i + 3 < data.len() {
            let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            i += 2 + seg_len;
        } else {
            break;
        }
    }
    (None, None)
}

fn read_gif_dimensions(data: &[u8]) -> (Option<u32>, Option<u32>) {
    // GIF: 6-byte sig + 2-byte width(LE) + 2-byte height(LE)
    if data.len() < 10 {
        return (None, None);
    }
    let w = u16::from_le_bytes([data[6], data[7]]) as u32;
    let h = u16::from_le_bytes([data[8], data[9]]) as u32;
    (Some(w), Some(h))
}

fn read_bmp_dimensions(data: &[u8]) -> (Option<u32>, Option<u32>) {
    // BMP: width(LE i32) at offset 18, height(LE i32) at offset 22
    if data.len() < 26 {
        return (None, None);
    }
    let w = i32::from_le_bytes([data[18], data[19], data[20], data[21]]).unsigned_abs();
    let h = i32::from_le_bytes([data[22], data[23], data[24], data[25]]).unsigned_abs();
    (Some(w), Some(h))
}

/// One `BinData/` archive member plus its allocated binary item ID.
#[derive(Debug, Clone)]
pub struct BinItem {
    /// 1-based; `binaryItemIDRef="0"` is reserved for unresolved placeholders.
    pub id: u32,
    pub image: BinImage,
}

impl BinItem {
    pub fn item_id(&self) -> String {
        format!("image{}", self.id)
    }

    pub fn href(&self) -> String {
        format!("BinData/image{}.{}", self.id, self.image.format.extension())
    }
}

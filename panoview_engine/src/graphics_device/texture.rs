/// Texture trait, texture descriptor, and texture info

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    /// Half-float, used by the ping-pong buffers
    R16G16B16A16_SFLOAT,
}

impl TextureFormat {
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::R8G8B8A8_SRGB | TextureFormat::R8G8B8A8_UNORM => 4,
            TextureFormat::R16G16B16A16_SFLOAT => 8,
        }
    }
}

/// Texture dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Plain 2D texture (equirectangular or flat media)
    D2,
    /// Six-face cube map, layers ordered +X, -X, +Y, -Y, +Z, -Z
    Cube,
}

impl TextureKind {
    pub fn layer_count(&self) -> u32 {
        match self {
            TextureKind::D2 => 1,
            TextureKind::Cube => 6,
        }
    }
}

/// Data for a single layer
#[derive(Debug, Clone)]
pub struct TextureLayerData {
    /// Target layer index (0-based)
    pub layer: u32,
    /// Raw pixel bytes for this layer
    pub data: Vec<u8>,
}

/// Data to upload to a texture at creation time
#[derive(Debug, Clone)]
pub enum TextureData {
    /// Single image data (2D textures)
    Single(Vec<u8>),
    /// Per-layer data (cube maps). Missing layers stay uninitialized.
    Layers(Vec<TextureLayerData>),
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    pub name: String,
    /// Width in pixels (per face for cube maps)
    pub width: u32,
    /// Height in pixels (per face for cube maps)
    pub height: u32,
    pub format: TextureFormat,
    pub kind: TextureKind,
    /// Optional initial data to upload at creation time
    pub data: Option<TextureData>,
}

/// Read-only properties of a created texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub kind: TextureKind,
}

impl TextureInfo {
    pub fn is_cube(&self) -> bool {
        self.kind == TextureKind::Cube
    }

    /// Expected byte size of one layer
    pub fn layer_size(&self) -> usize {
        (self.width * self.height * self.format.bytes_per_pixel()) as usize
    }
}

/// Texture resource trait
///
/// The texture is automatically destroyed when dropped.
pub trait Texture: Send + Sync {
    fn info(&self) -> &TextureInfo;
}

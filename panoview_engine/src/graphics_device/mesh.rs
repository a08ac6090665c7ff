/// Mesh resources

use bytemuck::{Pod, Zeroable};

/// Background geometry vertex: position + texture coordinate
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// Descriptor for uploading an indexed triangle list
#[derive(Debug, Clone, Default)]
pub struct MeshDesc {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshDesc {
    /// Raw vertex bytes, as uploaded to the vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Uploaded mesh
pub trait Mesh: Send + Sync {
    fn name(&self) -> &str;

    fn vertex_count(&self) -> u32;

    fn index_count(&self) -> u32;
}

/// Shader programs and uniform values

use glam::{Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;

/// Descriptor for compiling a shader program
#[derive(Debug, Clone, Default)]
pub struct ShaderProgramDesc {
    pub name: String,
    pub vertex_source: String,
    pub fragment_source: String,
    /// Uniform names the program declares
    pub uniforms: Vec<String>,
}

/// Compiled shader program
pub trait ShaderProgram: Send + Sync {
    fn name(&self) -> &str;

    /// Uniform names declared by the program
    fn uniforms(&self) -> &[String];

    /// Whether the program declares `uniform`
    fn declares(&self, uniform: &str) -> bool {
        self.uniforms().iter().any(|u| u == uniform)
    }
}

/// A single uniform value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Named uniform values bound together with a program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformSet {
    values: FxHashMap<String, UniformValue>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: UniformValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<UniformValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every value of `other` into this set, overwriting duplicates
    pub fn merge(&mut self, other: &UniformSet) {
        for (name, value) in other.iter() {
            self.values.insert(name.to_string(), *value);
        }
    }
}

/// Effect registry - resolves an effect-set id to shader pass descriptors.

use rustc_hash::FxHashMap;
use crate::engine_warn;
use crate::graphics_device::{ShaderProgramDesc, UniformSet};

/// One shader pass of an effect set, not yet compiled
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    pub program: ShaderProgramDesc,
    pub uniforms: UniformSet,
}

impl EffectDescriptor {
    pub fn new(program: ShaderProgramDesc, uniforms: UniformSet) -> Self {
        Self { program, uniforms }
    }
}

pub trait EffectRegistry: Send {
    /// Ordered shader passes of `fx_set`. Unknown sets resolve to no pass.
    fn parse_shader_passes(&self, fx_set: &str) -> Vec<EffectDescriptor>;
}

/// In-memory registry
#[derive(Debug, Default)]
pub struct StaticEffectRegistry {
    sets: FxHashMap<String, Vec<EffectDescriptor>>,
}

impl StaticEffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an effect set
    pub fn register(&mut self, fx_set: &str, passes: Vec<EffectDescriptor>) {
        self.sets.insert(fx_set.to_string(), passes);
    }

    pub fn contains(&self, fx_set: &str) -> bool {
        self.sets.contains_key(fx_set)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl EffectRegistry for StaticEffectRegistry {
    fn parse_shader_passes(&self, fx_set: &str) -> Vec<EffectDescriptor> {
        match self.sets.get(fx_set) {
            Some(passes) => passes.clone(),
            None => {
                engine_warn!("panoview::Effects", "Unknown effect set '{}'", fx_set);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "effects_tests.rs"]
mod tests;

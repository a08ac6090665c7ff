/// Built-in GLSL programs used by the pipeline passes.

use crate::graphics_device::ShaderProgramDesc;

pub(crate) const FULLSCREEN_VERTEX: &str = r#"#version 300 es
out vec2 vUv;
void main() {
    vec2 pos = vec2(float((gl_VertexID << 1) & 2), float(gl_VertexID & 2));
    vUv = pos;
    gl_Position = vec4(pos * 2.0 - 1.0, 0.0, 1.0);
}
"#;

const TEXTURE_FRAGMENT: &str = r#"#version 300 es
precision highp float;
uniform sampler2D tDiffuse;
uniform float opacity;
in vec2 vUv;
out vec4 fragColor;
void main() {
    fragColor = opacity * texture(tDiffuse, vUv);
}
"#;

const ADDITION_FRAGMENT: &str = r#"#version 300 es
precision highp float;
uniform sampler2D tDiffuse;
in vec2 vUv;
out vec4 fragColor;
void main() {
    fragColor = texture(tDiffuse, vUv);
}
"#;

pub(crate) fn texture_program() -> ShaderProgramDesc {
    ShaderProgramDesc {
        name: "panoview.texture".to_string(),
        vertex_source: FULLSCREEN_VERTEX.to_string(),
        fragment_source: TEXTURE_FRAGMENT.to_string(),
        uniforms: vec!["tDiffuse".to_string(), "opacity".to_string()],
    }
}

pub(crate) fn addition_program() -> ShaderProgramDesc {
    ShaderProgramDesc {
        name: "panoview.addition".to_string(),
        vertex_source: FULLSCREEN_VERTEX.to_string(),
        fragment_source: ADDITION_FRAGMENT.to_string(),
        uniforms: vec!["tDiffuse".to_string()],
    }
}

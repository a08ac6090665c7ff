/// GLSL programs of the background renderers.

use crate::graphics_device::ShaderProgramDesc;
use crate::render_pipeline::shaders::FULLSCREEN_VERTEX;

const MESH_VERTEX: &str = r#"#version 300 es
uniform mat4 modelViewProjection;
in vec3 position;
in vec2 uv;
out vec2 vUv;
out vec3 vDirection;
void main() {
    vUv = uv;
    vDirection = position;
    gl_Position = modelViewProjection * vec4(position, 1.0);
}
"#;

const MESH_FRAGMENT: &str = r#"#version 300 es
precision highp float;
uniform sampler2D tDiffuse;
uniform samplerCube tCube;
uniform int format;
in vec2 vUv;
in vec3 vDirection;
out vec4 fragColor;
void main() {
    if (format == 1) {
        fragColor = texture(tCube, vDirection);
    } else {
        fragColor = texture(tDiffuse, vUv);
    }
}
"#;

const REPROJECTION_FRAGMENT: &str = r#"#version 300 es
precision highp float;
#define PI 3.14159265358979
uniform sampler2D tDiffuse;
uniform samplerCube tCube;
uniform mat4 rotation;
uniform vec2 pan;
uniform float aspect;
uniform float projectionFov;
uniform float zoom;
uniform float mediaAspect;
uniform float cameraDistance;
uniform int mode;
uniform int format;
in vec2 vUv;
out vec4 fragColor;

vec4 sampleDirection(vec3 d) {
    if (format == 1) {
        return texture(tCube, d);
    }
    float lon = atan(d.x, -d.z);
    float lat = asin(clamp(d.y, -1.0, 1.0));
    return texture(tDiffuse, vec2(lon / (2.0 * PI) + 0.5, 0.5 - lat / PI));
}

void main() {
    vec2 ndc = vUv * 2.0 - 1.0;
    if (mode == 2) {
        vec2 canvas = pan + ndc * vec2(aspect, 1.0) / zoom;
        if (format == 2) {
            vec2 uv = canvas / vec2(mediaAspect, 1.0) * 0.5 + 0.5;
            if (any(lessThan(uv, vec2(0.0))) || any(greaterThan(uv, vec2(1.0)))) {
                discard;
            }
            fragColor = texture(tDiffuse, vec2(uv.x, 1.0 - uv.y));
            return;
        }
        float lon = canvas.x / mediaAspect * PI;
        float lat = canvas.y * 0.5 * PI;
        if (abs(lat) > 0.5 * PI) {
            discard;
        }
        fragColor = sampleDirection(vec3(cos(lat) * sin(lon), sin(lat), -cos(lat) * cos(lon)));
        return;
    }
    float tanHalf = tan(projectionFov * 0.5);
    vec3 ray = normalize(vec3(ndc.x * tanHalf * aspect, ndc.y * tanHalf, -1.0));
    if (mode == 1) {
        // ray from behind the unit sphere centre, far intersection
        vec3 origin = vec3(0.0, 0.0, cameraDistance);
        float b = dot(origin, ray);
        float c = dot(origin, origin) - 1.0;
        float h = b * b - c;
        if (h < 0.0) {
            discard;
        }
        ray = normalize(origin + ray * (-b + sqrt(h)));
    }
    fragColor = sampleDirection((rotation * vec4(ray, 0.0)).xyz);
}
"#;

pub(crate) fn mesh_program() -> ShaderProgramDesc {
    ShaderProgramDesc {
        name: "panoview.background.mesh".to_string(),
        vertex_source: MESH_VERTEX.to_string(),
        fragment_source: MESH_FRAGMENT.to_string(),
        uniforms: ["modelViewProjection", "tDiffuse", "tCube", "format"]
            .iter().map(|u| u.to_string()).collect(),
    }
}

pub(crate) fn reprojection_program() -> ShaderProgramDesc {
    ShaderProgramDesc {
        name: "panoview.background.shader".to_string(),
        vertex_source: FULLSCREEN_VERTEX.to_string(),
        fragment_source: REPROJECTION_FRAGMENT.to_string(),
        uniforms: [
            "tDiffuse", "tCube", "rotation", "pan", "aspect", "projectionFov",
            "zoom", "mediaAspect", "cameraDistance", "mode", "format",
        ]
        .iter().map(|u| u.to_string()).collect(),
    }
}

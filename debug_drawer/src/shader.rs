//! Debug draw shader sources (GLSL) and the names they are registered under.
//!
//! Hosts must ship every entry of [`bundled_shaders`] with the program and
//! make it resolvable through [`RenderContext::find_shader`](crate::RenderContext::find_shader).
//! A missing entry is tolerated at runtime: the pipeline state cache falls
//! back to [`COLORED_SHADER`] and then to [`FALLBACK_SHADER`].

/// Unlit shader: vertex color multiplied by the material tint.
pub const COLORED_SHADER: &str = "dbgdraw/colored";

/// Flat-lit shader for solid stamps.
pub const SHADED_SHADER: &str = "dbgdraw/shaded";

/// Generic colored-unlit shader most hosts already provide.
pub const FALLBACK_SHADER: &str = "unlit/color";

/// Colored shader source.
///
/// Transforms position by a view-projection matrix and passes through
/// vertex color times tint.
pub const COLORED_SHADER_SOURCE: &str = r#"#version 450

layout(set = 0, binding = 0) uniform DebugUniforms {
    mat4 view_proj;
    vec4 tint;
};

#ifdef VERTEX

layout(location = 0) in vec3 position;
layout(location = 5) in vec4 color;

layout(location = 0) out vec4 v_color;

void main() {
    gl_Position = view_proj * vec4(position, 1.0);
    v_color = color * tint;
}

#endif

#ifdef FRAGMENT

layout(location = 0) in vec4 v_color;
layout(location = 0) out vec4 out_color;

void main() {
    out_color = v_color;
}

#endif
"#;

/// Shaded shader source.
///
/// Lights each face with a normal reconstructed from screen-space
/// derivatives, so it works for meshes without normals and for immediate
/// triangle strips alike.
pub const SHADED_SHADER_SOURCE: &str = r#"#version 450

layout(set = 0, binding = 0) uniform DebugUniforms {
    mat4 view_proj;
    vec4 tint;
};

#ifdef VERTEX

layout(location = 0) in vec3 position;
layout(location = 5) in vec4 color;

layout(location = 0) out vec4 v_color;
layout(location = 1) out vec3 v_world;

void main() {
    gl_Position = view_proj * vec4(position, 1.0);
    v_color = color * tint;
    v_world = position;
}

#endif

#ifdef FRAGMENT

layout(location = 0) in vec4 v_color;
layout(location = 1) in vec3 v_world;
layout(location = 0) out vec4 out_color;

const vec3 LIGHT_DIR = normalize(vec3(0.4, 1.0, 0.25));

void main() {
    vec3 n = normalize(cross(dFdx(v_world), dFdy(v_world)));
    float lambert = abs(dot(n, LIGHT_DIR));
    out_color = vec4(v_color.rgb * mix(0.45, 1.0, lambert), v_color.a);
}

#endif
"#;

/// Every shader the debug drawer asks for, with its source.
pub fn bundled_shaders() -> [(&'static str, &'static str); 2] {
    [
        (COLORED_SHADER, COLORED_SHADER_SOURCE),
        (SHADED_SHADER, SHADED_SHADER_SOURCE),
    ]
}

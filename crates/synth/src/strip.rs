//! Source cleanup: preview-shim removal and shader conflict resolution.
//!
//! Artifacts authored for the sandboxed preview environment carry
//! hand-rolled stand-ins (a fake animation namespace, a no-op
//! class-name helper, destructuring from a CDN-injected global) that
//! must not reach a real bundler, plus GLSL attribute declarations the
//! 3D runtime now injects itself.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Preview shims
// ---------------------------------------------------------------------------

/// A hand-rolled `const motion = { ... };` animation stand-in.  Matches
/// from the declaration to the first line that closes the object at
/// column zero.
static MOTION_SHIM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^const\s+motion\s*=\s*\{.*?^\};?[ \t]*$\n?").expect("motion shim regex")
});

/// A one-line no-op class-name helper, e.g.
/// `const cn = (...args) => args.filter(Boolean).join(' ');`
static CN_SHIM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^const\s+cn\s*=\s*\([^)]*\)\s*=>.*$\n?").expect("cn shim regex")
});

/// Destructuring from a CDN-injected global namespace, e.g.
/// `const { Button, Card } = window.UI;` or `const { Line } = Recharts;`
static GLOBAL_DESTRUCTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*const\s*\{[^}]*\}\s*=\s*(?:window\.\w+|lucide|LucideIcons|Recharts|FramerMotion|Motion)\s*;?[ \t]*$\n?",
    )
    .expect("global destructure regex")
});

/// Remove preview-environment shims that only existed to make the
/// artifact runnable in the sandboxed renderer.
pub fn strip_preview_shims(code: &str) -> String {
    let code = MOTION_SHIM.replace_all(code, "");
    let code = CN_SHIM.replace_all(&code, "");
    let code = GLOBAL_DESTRUCTURE.replace_all(&code, "");
    code.into_owned()
}

// ---------------------------------------------------------------------------
// Shader attribute conflicts
// ---------------------------------------------------------------------------

static SHADER_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)attribute\s+vec[234]\s+(position|normal|uv)\s*;[ \t]*$")
        .expect("shader attribute regex")
});

/// Whether the code contains a custom shader block at all.
fn has_shader_block(code: &str) -> bool {
    code.contains("shaderMaterial") || code.contains("ShaderMaterial") || code.contains("glsl`")
}

/// Remove manually declared GLSL attributes that the 3D runtime injects
/// automatically, leaving a comment so the omission is not mistaken for
/// an accident.  Without this, builds fail with a duplicate-declaration
/// shader compile error.
pub fn resolve_shader_conflicts(code: &str) -> String {
    if !has_shader_block(code) {
        return code.to_string();
    }
    SHADER_ATTRIBUTE
        .replace_all(code, "$1// '$2' attribute removed: injected by the 3D runtime")
        .into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

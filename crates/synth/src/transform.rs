//! The component transform pipeline.
//!
//! Ordered steps, each feeding the next: strip preview shims, resolve
//! shader attribute conflicts, collect required imports, remove the
//! original import lines, render the clean import block, guarantee a
//! default export, and normalize whitespace.  Dependency resolution
//! runs against the same collection result.

use shipwright_core::analyzer::ParsedArtifact;
use shipwright_core::packages::resolve_dependencies;
use shipwright_core::types::ArtifactKind;

use crate::exports::ensure_default_export;
use crate::imports::{collect_required_imports, remove_import_lines, render_import_block};
use crate::project::{GeneratedProject, SynthError};
use crate::scaffold;
use crate::strip::{resolve_shader_conflicts, strip_preview_shims};

/// Synthesize a complete project from a parsed artifact.
pub fn transform(parsed: &ParsedArtifact) -> Result<GeneratedProject, SynthError> {
    let project = match parsed.kind {
        ArtifactKind::React => react_project(parsed)?,
        ArtifactKind::Html => scaffold::html_project(parsed),
        ArtifactKind::Vue | ArtifactKind::Svelte => {
            return Err(SynthError::UnsupportedFramework(
                parsed.kind.as_str().to_string(),
            ))
        }
    };
    project.check_invariants()?;
    Ok(project)
}

fn react_project(parsed: &ParsedArtifact) -> Result<GeneratedProject, SynthError> {
    let code = strip_preview_shims(&parsed.code);
    let code = resolve_shader_conflicts(&code);

    let required = collect_required_imports(&code, parsed);
    let body = remove_import_lines(&code);
    let body = ensure_default_export(body.trim(), &parsed.component_name);

    let import_block = render_import_block(&required);
    let component_code = normalize_whitespace(&format!("{import_block}\n\n{body}"));

    let deps = resolve_dependencies(
        &required.packages(),
        parsed.uses_typescript,
        parsed.uses_tailwind,
    );

    Ok(scaffold::react_project(parsed, &component_code, &deps))
}

/// Collapse runs of three or more blank lines down to two and strip
/// whitespace-only lines.  Always ends with a single trailing newline.
pub fn normalize_whitespace(code: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in code.lines() {
        let line = if line.trim().is_empty() { "" } else { line };
        if line.is_empty() {
            blank_run += 1;
            if blank_run >= 3 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push(line);
    }

    while out.last() == Some(&"") {
        out.pop();
    }

    let mut result = out.join("\n");
    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_three_blank_lines_to_two() {
        let code = "a\n\n\n\n\nb\n";
        assert_eq!(normalize_whitespace(code), "a\n\n\nb\n");
    }

    #[test]
    fn strips_whitespace_only_lines() {
        let code = "a\n   \t\nb\n";
        assert_eq!(normalize_whitespace(code), "a\n\nb\n");
    }

    #[test]
    fn single_blank_lines_survive() {
        let code = "a\n\nb\n";
        assert_eq!(normalize_whitespace(code), "a\n\nb\n");
    }

    #[test]
    fn trailing_blank_lines_are_trimmed() {
        assert_eq!(normalize_whitespace("a\n\n\n"), "a\n");
    }
}

//! Artifact source analysis.
//!
//! Parses artifact source text into a structured [`ParsedArtifact`]:
//! import/export statements, framework kind, component name, and
//! feature flags.  Pattern matching is regex-shaped by design; the
//! analyzer never fails — malformed input degrades to best-effort
//! defaults so the caller always gets a usable description.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Artifact, ArtifactKind, ArtifactLanguage};

// ---------------------------------------------------------------------------
// Parsed structures
// ---------------------------------------------------------------------------

/// One import statement, in any of the five recognized shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatement {
    /// Module specifier as written (e.g. `react`, `./utils`).
    pub source: String,
    /// Default import binding, if present.
    pub default_import: Option<String>,
    /// Named import bindings (local names, after any `as` rename).
    pub named_imports: Vec<String>,
    /// Namespace binding from `import * as X`.
    pub namespace_import: Option<String>,
    /// True iff the specifier starts with `.` or `/`.
    pub is_relative: bool,
}

/// The kind of an export statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// `export default ...` (named or anonymous).
    Default,
    /// `export const/function/class Name` or an `export { ... }` list.
    Named,
    /// `export { ... } from '...'`.
    ReExport,
    /// `export * from '...'`.
    ExportAll,
}

/// One export statement.  Multiple exports of the same kind are all
/// recorded; there is no dedup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStatement {
    pub kind: ExportKind,
    /// Exported identifier, when one is syntactically present.
    pub identifier: Option<String>,
    /// Source module for re-export / export-all forms.
    pub source: Option<String>,
}

/// Structured description of an artifact's source.  Computed fresh on
/// every transform call; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedArtifact {
    /// Detected framework family.
    pub kind: ArtifactKind,
    /// Declared language, carried through unchanged.
    pub language: ArtifactLanguage,
    /// Normalized source text (LF line endings).
    pub code: String,
    /// Inferred component name (always non-empty).
    pub component_name: String,
    /// True when the component name came from the title fallback rather
    /// than a declaration in the source.
    pub component_name_is_fallback: bool,
    /// Top-level package specifiers referenced by non-relative imports.
    pub dependencies: Vec<String>,
    pub imports: Vec<ImportStatement>,
    pub exports: Vec<ExportStatement>,
    pub uses_hooks: bool,
    pub uses_tailwind: bool,
    pub uses_typescript: bool,
}

// ---------------------------------------------------------------------------
// Regexes
// ---------------------------------------------------------------------------

static IMPORT_COMBINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+([A-Za-z_$][\w$]*)\s*,\s*\{([^}]*)\}\s*from\s*['"]([^'"]+)['"]"#)
        .expect("combined import regex")
});

static IMPORT_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+\*\s+as\s+([A-Za-z_$][\w$]*)\s+from\s*['"]([^'"]+)['"]"#)
        .expect("namespace import regex")
});

static IMPORT_NAMED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+(?:type\s+)?\{([^}]*)\}\s*from\s*['"]([^'"]+)['"]"#)
        .expect("named import regex")
});

static IMPORT_DEFAULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+([A-Za-z_$][\w$]*)\s+from\s*['"]([^'"]+)['"]"#)
        .expect("default import regex")
});

static IMPORT_SIDE_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s*['"]([^'"]+)['"]"#).expect("side-effect import regex")
});

static EXPORT_DEFAULT_NAMED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+(?:async\s+)?(?:function|class)\s+([A-Za-z_$][\w$]*)")
        .expect("default named export regex")
});

static EXPORT_DEFAULT_ANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+default\b").expect("default export regex"));

static EXPORT_NAMED_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:async\s+)?(?:const|let|var|function|class)\s+([A-Za-z_$][\w$]*)")
        .expect("named export regex")
});

static EXPORT_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"export\s*\{([^}]*)\}(?:\s*from\s*['"]([^'"]+)['"])?"#)
        .expect("export list regex")
});

static EXPORT_ALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"export\s+\*\s+from\s*['"]([^'"]+)['"]"#).expect("export-all regex")
});

static FUNCTION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"function\s+([A-Z]\w*)\s*\(").expect("function decl regex")
});

static ARROW_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:const|let|var)\s+([A-Z]\w*)\s*=\s*(?:async\s*)?(?:\([^)]*\)|[\w$]+)\s*=>")
        .expect("arrow assignment regex")
});

static CLASS_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"class\s+([A-Z]\w*)\s+extends\s+(?:React\.)?(?:Pure)?Component")
        .expect("class component regex")
});

static HOOK_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\buse[A-Z]\w+").expect("hook identifier regex"));

static JSX_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][\w.]*(?:\s[^<>]*)?/?>").expect("jsx tag regex"));

static TAILWIND_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:className|class)\s*=\s*["'][^"']*(?:\b(?:flex|grid|hidden|block|container)\b|(?:bg|text|p|px|py|pt|pb|pl|pr|m|mx|my|mt|mb|ml|mr|w|h|gap|space|rounded|border|shadow|font|items|justify|min|max)-)"#,
    )
    .expect("tailwind class regex")
});

static TYPE_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\binterface\s+[A-Z]\w*|\btype\s+[A-Z]\w*\s*=|:\s*(?:string|number|boolean|void|null|undefined|any|unknown)\b|React\.FC\b",
    )
    .expect("type annotation regex")
});

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Pre-flight check run before any remote call is issued.
pub fn validate_artifact(artifact: &Artifact) -> Result<(), CoreError> {
    if artifact.code.trim().is_empty() {
        return Err(CoreError::Validation(
            "Artifact has no source code".to_string(),
        ));
    }
    if artifact.title.trim().is_empty() {
        return Err(CoreError::Validation("Artifact has no title".to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an artifact into a [`ParsedArtifact`].
///
/// This function never fails: unrecognized input produces empty
/// import/export lists and a title-derived component name.
pub fn parse_artifact(artifact: &Artifact) -> ParsedArtifact {
    let code = artifact.code.replace("\r\n", "\n");

    let imports = extract_imports(&code);
    let exports = extract_exports(&code);
    let kind = detect_kind(artifact.language, &code, &imports);
    let (component_name, component_name_is_fallback) = infer_component_name(&code, &artifact.title);

    let dependencies: Vec<String> = imports
        .iter()
        .filter(|i| !i.is_relative)
        .map(|i| top_level_package(&i.source))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let uses_hooks = HOOK_IDENTIFIER.is_match(&code);
    let uses_tailwind = TAILWIND_CLASS.is_match(&code);
    let uses_typescript = artifact.language.is_typescript() || TYPE_ANNOTATION.is_match(&code);

    ParsedArtifact {
        kind,
        language: artifact.language,
        code,
        component_name,
        component_name_is_fallback,
        dependencies,
        imports,
        exports,
        uses_hooks,
        uses_tailwind,
        uses_typescript,
    }
}

/// Extract every import statement, covering the five shapes: default,
/// named, namespace, combined default+named, and side-effect-only.
pub fn extract_imports(code: &str) -> Vec<ImportStatement> {
    let mut imports = Vec::new();
    // Byte offsets already claimed by a more specific shape; the default
    // and side-effect regexes would otherwise re-match inside them.
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for cap in IMPORT_COMBINED.captures_iter(code) {
        let m = cap.get(0).unwrap();
        claimed.push((m.start(), m.end()));
        imports.push(ImportStatement {
            source: cap[3].to_string(),
            default_import: Some(cap[1].to_string()),
            named_imports: split_named_list(&cap[2]),
            namespace_import: None,
            is_relative: is_relative(&cap[3]),
        });
    }

    for cap in IMPORT_NAMESPACE.captures_iter(code) {
        let m = cap.get(0).unwrap();
        claimed.push((m.start(), m.end()));
        imports.push(ImportStatement {
            source: cap[2].to_string(),
            default_import: None,
            named_imports: Vec::new(),
            namespace_import: Some(cap[1].to_string()),
            is_relative: is_relative(&cap[2]),
        });
    }

    for cap in IMPORT_NAMED.captures_iter(code) {
        let m = cap.get(0).unwrap();
        if overlaps(&claimed, m.start()) {
            continue;
        }
        claimed.push((m.start(), m.end()));
        imports.push(ImportStatement {
            source: cap[2].to_string(),
            default_import: None,
            named_imports: split_named_list(&cap[1]),
            namespace_import: None,
            is_relative: is_relative(&cap[2]),
        });
    }

    for cap in IMPORT_DEFAULT.captures_iter(code) {
        let m = cap.get(0).unwrap();
        if overlaps(&claimed, m.start()) {
            continue;
        }
        claimed.push((m.start(), m.end()));
        imports.push(ImportStatement {
            source: cap[2].to_string(),
            default_import: Some(cap[1].to_string()),
            named_imports: Vec::new(),
            namespace_import: None,
            is_relative: is_relative(&cap[2]),
        });
    }

    for cap in IMPORT_SIDE_EFFECT.captures_iter(code) {
        let m = cap.get(0).unwrap();
        if overlaps(&claimed, m.start()) {
            continue;
        }
        imports.push(ImportStatement {
            source: cap[1].to_string(),
            default_import: None,
            named_imports: Vec::new(),
            namespace_import: None,
            is_relative: is_relative(&cap[1]),
        });
    }

    imports
}

/// Extract every export statement.
pub fn extract_exports(code: &str) -> Vec<ExportStatement> {
    let mut exports = Vec::new();

    let named_defaults: Vec<(usize, String)> = EXPORT_DEFAULT_NAMED
        .captures_iter(code)
        .map(|cap| (cap.get(0).unwrap().start(), cap[1].to_string()))
        .collect();

    for m in EXPORT_DEFAULT_ANY.find_iter(code) {
        let identifier = named_defaults
            .iter()
            .find(|(start, _)| *start == m.start())
            .map(|(_, name)| name.clone());
        exports.push(ExportStatement {
            kind: ExportKind::Default,
            identifier,
            source: None,
        });
    }

    for cap in EXPORT_NAMED_DECL.captures_iter(code) {
        exports.push(ExportStatement {
            kind: ExportKind::Named,
            identifier: Some(cap[1].to_string()),
            source: None,
        });
    }

    for cap in EXPORT_LIST.captures_iter(code) {
        match cap.get(2) {
            Some(source) => exports.push(ExportStatement {
                kind: ExportKind::ReExport,
                identifier: None,
                source: Some(source.as_str().to_string()),
            }),
            None => {
                for name in split_named_list(&cap[1]) {
                    exports.push(ExportStatement {
                        kind: ExportKind::Named,
                        identifier: Some(name),
                        source: None,
                    });
                }
            }
        }
    }

    for cap in EXPORT_ALL.captures_iter(code) {
        exports.push(ExportStatement {
            kind: ExportKind::ExportAll,
            identifier: None,
            source: Some(cap[1].to_string()),
        });
    }

    exports
}

/// Detect the framework family of an artifact.
///
/// Precedence: explicit declared language (html/vue/svelte) wins
/// outright; then a Vue or Svelte import; then a React import; then
/// structural signals (JSX-like tags, hook-like identifiers); `html`
/// when nothing matches.
pub fn detect_kind(
    language: ArtifactLanguage,
    code: &str,
    imports: &[ImportStatement],
) -> ArtifactKind {
    match language {
        ArtifactLanguage::Html => return ArtifactKind::Html,
        ArtifactLanguage::Vue => return ArtifactKind::Vue,
        ArtifactLanguage::Svelte => return ArtifactKind::Svelte,
        ArtifactLanguage::Jsx | ArtifactLanguage::Tsx => {}
    }

    let imports_package = |pkg: &str| {
        imports
            .iter()
            .any(|i| !i.is_relative && top_level_package(&i.source) == pkg)
    };

    if imports_package("vue") {
        return ArtifactKind::Vue;
    }
    if imports_package("svelte") {
        return ArtifactKind::Svelte;
    }
    if imports_package("react") {
        return ArtifactKind::React;
    }
    if JSX_TAG.is_match(code) || HOOK_IDENTIFIER.is_match(code) {
        return ArtifactKind::React;
    }
    ArtifactKind::Html
}

/// Infer the component name from the source, falling back to a
/// sanitized form of the artifact title.
///
/// Precedence: named function declaration, arrow function assigned to a
/// capitalized identifier, class extending a component base, then the
/// title fallback.  Returns `(name, from_fallback)`.
pub fn infer_component_name(code: &str, title: &str) -> (String, bool) {
    if let Some(cap) = FUNCTION_DECL.captures(code) {
        return (cap[1].to_string(), false);
    }
    if let Some(cap) = ARROW_ASSIGNMENT.captures(code) {
        return (cap[1].to_string(), false);
    }
    if let Some(cap) = CLASS_COMPONENT.captures(code) {
        return (cap[1].to_string(), false);
    }
    (fallback_component_name(title), true)
}

/// Sanitize an artifact title into a component identifier.
///
/// Non-alphanumeric characters split words, each word is title-cased,
/// and the result is prefixed with `App` when it does not start with an
/// uppercase ASCII letter.  An empty result becomes `GeneratedApp`.
pub fn fallback_component_name(title: &str) -> String {
    let mut name = String::new();
    for word in title.split(|c: char| !c.is_ascii_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars);
        }
    }

    if name.is_empty() {
        return "GeneratedApp".to_string();
    }
    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        name.insert_str(0, "App");
    }
    name
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_relative(source: &str) -> bool {
    source.starts_with('.') || source.starts_with('/')
}

/// Reduce a module specifier to its top-level package name:
/// `@scope/pkg/sub` -> `@scope/pkg`, `react-dom/client` -> `react-dom`.
pub fn top_level_package(source: &str) -> String {
    let mut parts = source.split('/');
    match parts.next() {
        Some(scope) if scope.starts_with('@') => match parts.next() {
            Some(pkg) => format!("{scope}/{pkg}"),
            None => scope.to_string(),
        },
        Some(pkg) => pkg.to_string(),
        None => source.to_string(),
    }
}

fn overlaps(claimed: &[(usize, usize)], start: usize) -> bool {
    claimed.iter().any(|&(s, e)| start >= s && start < e)
}

/// Split a `{ a, b as c }` body into local binding names.
fn split_named_list(body: &str) -> Vec<String> {
    body.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            // `orig as local` binds `local`.
            let local = entry.rsplit(" as ").next().unwrap_or(entry).trim();
            if local.is_empty() {
                None
            } else {
                Some(local.to_string())
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn artifact(language: ArtifactLanguage, title: &str, code: &str) -> Artifact {
        Artifact {
            id: "art-1".to_string(),
            title: title.to_string(),
            code: code.to_string(),
            language,
            conversation_id: None,
            project_id: None,
            version: 1,
            created_at: Utc::now(),
        }
    }

    // -- Import shapes --

    #[test]
    fn default_import() {
        let imports = extract_imports("import React from 'react'");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].source, "react");
        assert_eq!(imports[0].default_import.as_deref(), Some("React"));
        assert!(imports[0].named_imports.is_empty());
        assert!(!imports[0].is_relative);
    }

    #[test]
    fn named_import_with_rename() {
        let imports = extract_imports("import { useState, useEffect as effect } from 'react'");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].named_imports, vec!["useState", "effect"]);
    }

    #[test]
    fn namespace_import() {
        let imports = extract_imports("import * as THREE from 'three'");
        assert_eq!(imports[0].namespace_import.as_deref(), Some("THREE"));
        assert_eq!(imports[0].source, "three");
    }

    #[test]
    fn combined_import() {
        let imports = extract_imports("import React, { useState } from 'react'");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].default_import.as_deref(), Some("React"));
        assert_eq!(imports[0].named_imports, vec!["useState"]);
    }

    #[test]
    fn side_effect_import() {
        let imports = extract_imports("import './styles.css'");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].source, "./styles.css");
        assert!(imports[0].is_relative);
        assert!(imports[0].default_import.is_none());
    }

    #[test]
    fn mixed_imports_do_not_double_count() {
        let code = "import React, { useState } from 'react'\nimport * as d3 from 'd3'\nimport './a.css'";
        let imports = extract_imports(code);
        assert_eq!(imports.len(), 3);
    }

    #[test]
    fn relative_detection() {
        assert!(extract_imports("import x from '/abs/path'")[0].is_relative);
        assert!(extract_imports("import x from '../up'")[0].is_relative);
        assert!(!extract_imports("import x from 'pkg'")[0].is_relative);
    }

    // -- Export shapes --

    #[test]
    fn default_export_named_function() {
        let exports = extract_exports("export default function Landing() {}");
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].kind, ExportKind::Default);
        assert_eq!(exports[0].identifier.as_deref(), Some("Landing"));
    }

    #[test]
    fn default_export_anonymous() {
        let exports = extract_exports("export default () => <div />");
        assert_eq!(exports[0].kind, ExportKind::Default);
        assert!(exports[0].identifier.is_none());
    }

    #[test]
    fn named_declaration_exports() {
        let exports = extract_exports("export const A = 1;\nexport function b() {}");
        assert_eq!(exports.len(), 2);
        assert!(exports.iter().all(|e| e.kind == ExportKind::Named));
    }

    #[test]
    fn reexport_and_export_all() {
        let exports = extract_exports("export { x } from './x'\nexport * from './y'");
        assert_eq!(exports[0].kind, ExportKind::ReExport);
        assert_eq!(exports[0].source.as_deref(), Some("./x"));
        assert_eq!(exports[1].kind, ExportKind::ExportAll);
    }

    #[test]
    fn export_list_without_source_records_each_name() {
        let exports = extract_exports("export { One, Two }");
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].identifier.as_deref(), Some("One"));
    }

    #[test]
    fn duplicate_exports_are_all_recorded() {
        let exports = extract_exports("export const A = 1;\nexport const A = 2;");
        assert_eq!(exports.len(), 2);
    }

    // -- Kind detection --

    #[test]
    fn declared_html_wins_over_react_code() {
        let a = artifact(
            ArtifactLanguage::Html,
            "Page",
            "import React from 'react'\nexport default function X() {}",
        );
        assert_eq!(parse_artifact(&a).kind, ArtifactKind::Html);
    }

    #[test]
    fn vue_import_beats_react_signals() {
        let code = "import { ref } from 'vue'\nconst count = ref(0)";
        let a = artifact(ArtifactLanguage::Jsx, "Counter", code);
        assert_eq!(parse_artifact(&a).kind, ArtifactKind::Vue);
    }

    #[test]
    fn structural_jsx_detected_as_react() {
        let a = artifact(
            ArtifactLanguage::Jsx,
            "Widget",
            "const Widget = () => <div>hello</div>",
        );
        assert_eq!(parse_artifact(&a).kind, ArtifactKind::React);
    }

    #[test]
    fn hook_identifier_detected_as_react() {
        let a = artifact(
            ArtifactLanguage::Jsx,
            "Widget",
            "const value = useCounter()",
        );
        assert_eq!(parse_artifact(&a).kind, ArtifactKind::React);
    }

    #[test]
    fn plain_text_defaults_to_html() {
        let a = artifact(ArtifactLanguage::Jsx, "Doc", "const x = 1;");
        assert_eq!(parse_artifact(&a).kind, ArtifactKind::Html);
    }

    // -- Component name --

    #[test]
    fn name_from_function_declaration() {
        let (name, fallback) = infer_component_name("function PricingTable() {}", "ignored");
        assert_eq!(name, "PricingTable");
        assert!(!fallback);
    }

    #[test]
    fn name_from_arrow_assignment() {
        let (name, _) = infer_component_name("const HeroBanner = (props) => <div />", "ignored");
        assert_eq!(name, "HeroBanner");
    }

    #[test]
    fn name_from_class_component() {
        let (name, _) =
            infer_component_name("class Dashboard extends React.Component {}", "ignored");
        assert_eq!(name, "Dashboard");
    }

    #[test]
    fn lowercase_declarations_are_skipped() {
        let (name, fallback) = infer_component_name("function helper() {}", "My Page");
        assert_eq!(name, "MyPage");
        assert!(fallback);
    }

    #[test]
    fn fallback_title_case_and_prefix() {
        assert_eq!(fallback_component_name("landing page"), "LandingPage");
        assert_eq!(fallback_component_name("3d viewer"), "App3dViewer");
        assert_eq!(fallback_component_name("!!!"), "GeneratedApp");
    }

    // -- Feature flags --

    #[test]
    fn hook_usage_sets_flag() {
        let a = artifact(
            ArtifactLanguage::Jsx,
            "C",
            "const [n, setN] = useState(0); return <div/>",
        );
        assert!(parse_artifact(&a).uses_hooks);
    }

    #[test]
    fn tailwind_detection() {
        let a = artifact(
            ArtifactLanguage::Jsx,
            "C",
            r#"const C = () => <div className="flex bg-slate-900 p-4" />"#,
        );
        assert!(parse_artifact(&a).uses_tailwind);
    }

    #[test]
    fn plain_class_attribute_is_not_tailwind() {
        let a = artifact(
            ArtifactLanguage::Jsx,
            "C",
            r#"const C = () => <div className="hero" />"#,
        );
        assert!(!parse_artifact(&a).uses_tailwind);
    }

    #[test]
    fn typescript_from_language() {
        let a = artifact(ArtifactLanguage::Tsx, "C", "const C = () => <div/>");
        assert!(parse_artifact(&a).uses_typescript);
    }

    #[test]
    fn typescript_from_annotation_token() {
        let a = artifact(
            ArtifactLanguage::Jsx,
            "C",
            "interface Props { label: string }",
        );
        assert!(parse_artifact(&a).uses_typescript);
    }

    // -- Dependencies --

    #[test]
    fn dependencies_are_top_level_sorted_and_deduped() {
        let code = "import a from 'react-dom/client'\nimport b from '@react-three/drei/core'\nimport c from 'react-dom'\nimport d from './local'";
        let a = artifact(ArtifactLanguage::Jsx, "C", code);
        assert_eq!(
            parse_artifact(&a).dependencies,
            vec!["@react-three/drei", "react-dom"]
        );
    }

    // -- Validation --

    #[test]
    fn validate_rejects_empty_code() {
        let a = artifact(ArtifactLanguage::Jsx, "C", "   ");
        assert!(validate_artifact(&a).is_err());
    }

    #[test]
    fn validate_accepts_normal_artifact() {
        let a = artifact(ArtifactLanguage::Jsx, "C", "export default () => <div/>");
        assert!(validate_artifact(&a).is_ok());
    }

    // -- Never fails --

    #[test]
    fn garbage_input_degrades_to_defaults() {
        let a = artifact(ArtifactLanguage::Jsx, "", "}{][ import from");
        let parsed = parse_artifact(&a);
        assert!(parsed.imports.is_empty());
        assert!(parsed.exports.is_empty());
        assert_eq!(parsed.component_name, "GeneratedApp");
        assert!(parsed.component_name_is_fallback);
    }
}

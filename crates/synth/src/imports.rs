//! Import collection and regeneration.
//!
//! After cleanup, the component source is re-scanned for every symbol
//! that needs an import: react hooks, icon components, animation
//! primitives, chart components, and the three-tier 3D stack.  All
//! original import statements are then removed and a single clean
//! block is rendered in a fixed group order, alphabetized within each
//! group.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use shipwright_core::analyzer::{top_level_package, ImportStatement, ParsedArtifact};
use shipwright_core::packages::{
    contains_symbol, CHART_COMPONENTS, DREI_SYMBOLS, FIBER_SYMBOLS, ICON_COMPONENTS,
    MOTION_SYMBOLS, PKG_DREI, PKG_FIBER, PKG_FRAMER_MOTION, PKG_LUCIDE, PKG_REACT, PKG_RECHARTS,
    PKG_THREE, REACT_HOOKS,
};

/// Packages whose imports are regenerated rather than preserved.
const MANAGED_PACKAGES: &[&str] = &[
    PKG_REACT,
    "react-dom",
    PKG_THREE,
    PKG_FIBER,
    PKG_DREI,
    PKG_FRAMER_MOTION,
    PKG_LUCIDE,
    PKG_RECHARTS,
];

static MOTION_NAMESPACE_USAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmotion\.\w+").expect("motion namespace regex"));

static THREE_CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"new\s+(Scene|PerspectiveCamera|OrthographicCamera|WebGLRenderer|Vector2|Vector3|Quaternion|Euler|Color|Clock|Group|Mesh|BoxGeometry|SphereGeometry|PlaneGeometry|TextureLoader|ShaderMaterial|MeshStandardMaterial)\b",
    )
    .expect("three constructor regex")
});

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Everything the regenerated import block needs.
#[derive(Debug, Clone, Default)]
pub struct RequiredImports {
    /// Import the framework default binding (`React`).
    pub react_default: bool,
    pub react_named: BTreeSet<String>,
    /// `import * as THREE from 'three'`.
    pub three_namespace: bool,
    /// Named engine constructors used without the namespace.
    pub three_named: BTreeSet<String>,
    pub fiber_named: BTreeSet<String>,
    pub drei_named: BTreeSet<String>,
    pub motion_named: BTreeSet<String>,
    pub icon_named: BTreeSet<String>,
    pub chart_named: BTreeSet<String>,
    /// Unknown top-level package imports, preserved as written.
    pub other: Vec<ImportStatement>,
}

impl RequiredImports {
    /// The set of packages the manifest must declare.  Each 3D tier
    /// implies the ones below it even when only the dependency (not an
    /// import statement) is needed.
    pub fn packages(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        if self.react_default || !self.react_named.is_empty() {
            set.insert(PKG_REACT.to_string());
        }
        if !self.drei_named.is_empty() {
            set.insert(PKG_DREI.to_string());
        }
        if !self.drei_named.is_empty() || !self.fiber_named.is_empty() {
            set.insert(PKG_FIBER.to_string());
        }
        if set.contains(PKG_FIBER) || self.three_namespace || !self.three_named.is_empty() {
            set.insert(PKG_THREE.to_string());
        }
        if !self.motion_named.is_empty() {
            set.insert(PKG_FRAMER_MOTION.to_string());
        }
        if !self.icon_named.is_empty() {
            set.insert(PKG_LUCIDE.to_string());
        }
        if !self.chart_named.is_empty() {
            set.insert(PKG_RECHARTS.to_string());
        }
        for import in &self.other {
            set.insert(top_level_package(&import.source));
        }
        set
    }
}

/// Whether `<Sym` appears as a component tag.
fn tag_used(code: &str, symbol: &str) -> bool {
    let needle = format!("<{symbol}");
    let bytes = code.as_bytes();
    let mut from = 0;
    while let Some(pos) = code[from..].find(&needle) {
        let end = from + pos + needle.len();
        let terminated = match bytes.get(end) {
            None => true,
            Some(b) => !(b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$'),
        };
        if terminated {
            return true;
        }
        from = from + pos + 1;
    }
    false
}

/// Component symbols are matched as tags; hook-shaped and function
/// symbols as bare identifiers.
fn symbol_used(code: &str, symbol: &str) -> bool {
    if symbol.starts_with("use") || symbol == "shaderMaterial" || symbol == "extend" {
        contains_symbol(code, symbol)
    } else {
        tag_used(code, symbol)
    }
}

/// Re-scan cleaned component source for required imports.
///
/// `parsed` supplies the original import list so unknown top-level
/// packages can be preserved as-is; relative imports are dropped (a
/// single-file artifact has nothing for them to resolve against).
pub fn collect_required_imports(code: &str, parsed: &ParsedArtifact) -> RequiredImports {
    let mut req = RequiredImports {
        react_default: true,
        ..Default::default()
    };

    for hook in REACT_HOOKS {
        if contains_symbol(code, hook) {
            req.react_named.insert((*hook).to_string());
        }
    }

    // 3D stack, bottom tier first so context is known before the
    // ambiguity rule below runs.
    if code.contains("THREE.") {
        req.three_namespace = true;
    } else {
        for cap in THREE_CONSTRUCTOR.captures_iter(code) {
            req.three_named.insert(cap[1].to_string());
        }
    }
    for sym in FIBER_SYMBOLS {
        if symbol_used(code, sym) {
            req.fiber_named.insert((*sym).to_string());
        }
    }

    // Some helper names collide with icon/chart names (`Line`, `Cloud`,
    // `Sparkles`, ...).  They only count as 3D helpers when the
    // artifact shows an unambiguous 3D signal; otherwise the 2D
    // library claims them.
    let ambiguous: BTreeSet<&str> = DREI_SYMBOLS
        .iter()
        .copied()
        .filter(|s| ICON_COMPONENTS.contains(s) || CHART_COMPONENTS.contains(s))
        .collect();
    let unambiguous_drei: Vec<&str> = DREI_SYMBOLS
        .iter()
        .copied()
        .filter(|s| !ambiguous.contains(s) && symbol_used(code, s))
        .collect();
    let three_context = req.three_namespace
        || !req.three_named.is_empty()
        || !req.fiber_named.is_empty()
        || !unambiguous_drei.is_empty();

    for sym in DREI_SYMBOLS {
        if symbol_used(code, sym) && (!ambiguous.contains(sym) || three_context) {
            req.drei_named.insert((*sym).to_string());
        }
    }

    if MOTION_NAMESPACE_USAGE.is_match(code) {
        req.motion_named.insert("motion".to_string());
    }
    for sym in MOTION_SYMBOLS {
        if contains_symbol(code, sym) {
            req.motion_named.insert((*sym).to_string());
        }
    }

    for sym in ICON_COMPONENTS {
        if tag_used(code, sym) && !req.drei_named.contains(*sym) {
            req.icon_named.insert((*sym).to_string());
        }
    }

    for sym in CHART_COMPONENTS {
        if tag_used(code, sym) && !req.drei_named.contains(*sym) {
            req.chart_named.insert((*sym).to_string());
        }
    }

    let mut seen_sources = BTreeSet::new();
    let mut other: Vec<ImportStatement> = parsed
        .imports
        .iter()
        .filter(|i| !i.is_relative)
        .filter(|i| !MANAGED_PACKAGES.contains(&top_level_package(&i.source).as_str()))
        .filter(|i| seen_sources.insert(i.source.clone()))
        .cloned()
        .collect();
    other.sort_by(|a, b| a.source.cmp(&b.source));
    req.other = other;

    req
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

static IMPORT_WITH_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+(?:type\s+)?[\w$*,{}\s]*?from\s*['"][^'"]+['"]\s*;?[ \t]*\n?"#)
        .expect("import removal regex")
});

static IMPORT_SIDE_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s*['"][^'"]+['"]\s*;?[ \t]*\n?"#)
        .expect("side-effect removal regex")
});

/// Remove every import statement so the block can be regenerated.
/// Also clears duplicate or conflicting import lines from the original
/// source in one pass.
pub fn remove_import_lines(code: &str) -> String {
    let code = IMPORT_WITH_SOURCE.replace_all(code, "");
    let code = IMPORT_SIDE_EFFECT.replace_all(&code, "");
    code.into_owned()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the clean import block.
///
/// Group order is fixed: framework, 3D engine, 3D bindings, 3D helpers,
/// animation, icons, charts, everything else.  Exactly one statement is
/// emitted per module specifier.
pub fn render_import_block(req: &RequiredImports) -> String {
    let mut lines: Vec<String> = Vec::new();

    if req.react_default || !req.react_named.is_empty() {
        lines.push(render_framework_import(req));
    }

    if req.three_namespace {
        lines.push(format!("import * as THREE from '{PKG_THREE}';"));
    } else if !req.three_named.is_empty() {
        lines.push(named_import(&req.three_named, PKG_THREE));
    }

    if !req.fiber_named.is_empty() {
        lines.push(named_import(&req.fiber_named, PKG_FIBER));
    }
    if !req.drei_named.is_empty() {
        lines.push(named_import(&req.drei_named, PKG_DREI));
    }
    if !req.motion_named.is_empty() {
        lines.push(named_import(&req.motion_named, PKG_FRAMER_MOTION));
    }
    if !req.icon_named.is_empty() {
        lines.push(named_import(&req.icon_named, PKG_LUCIDE));
    }
    if !req.chart_named.is_empty() {
        lines.push(named_import(&req.chart_named, PKG_RECHARTS));
    }

    for import in &req.other {
        lines.push(render_statement(import));
    }

    lines.join("\n")
}

fn render_framework_import(req: &RequiredImports) -> String {
    if req.react_named.is_empty() {
        format!("import React from '{PKG_REACT}';")
    } else if req.react_default {
        format!(
            "import React, {{ {} }} from '{PKG_REACT}';",
            joined(&req.react_named)
        )
    } else {
        named_import(&req.react_named, PKG_REACT)
    }
}

fn named_import(names: &BTreeSet<String>, source: &str) -> String {
    format!("import {{ {} }} from '{source}';", joined(names))
}

fn joined(names: &BTreeSet<String>) -> String {
    names.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Render a preserved import statement from its structured record.
fn render_statement(import: &ImportStatement) -> String {
    let source = &import.source;
    if let Some(ns) = &import.namespace_import {
        return format!("import * as {ns} from '{source}';");
    }
    match (&import.default_import, import.named_imports.is_empty()) {
        (Some(default), false) => format!(
            "import {default}, {{ {} }} from '{source}';",
            import.named_imports.join(", ")
        ),
        (Some(default), true) => format!("import {default} from '{source}';"),
        (None, false) => format!(
            "import {{ {} }} from '{source}';",
            import.named_imports.join(", ")
        ),
        (None, true) => format!("import '{source}';"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shipwright_core::analyzer::parse_artifact;
    use shipwright_core::types::{Artifact, ArtifactLanguage};

    fn parsed(code: &str) -> shipwright_core::analyzer::ParsedArtifact {
        parse_artifact(&Artifact {
            id: "a".into(),
            title: "Test".into(),
            code: code.into(),
            language: ArtifactLanguage::Jsx,
            conversation_id: None,
            project_id: None,
            version: 1,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn collects_hooks_as_react_named() {
        let code = "const [a, setA] = useState(0); useEffect(() => {}, []);";
        let req = collect_required_imports(code, &parsed(code));
        assert!(req.react_named.contains("useState"));
        assert!(req.react_named.contains("useEffect"));
    }

    #[test]
    fn collects_icons_from_tags() {
        let code = "<div><Heart /><Settings className=\"w-4\" /></div>";
        let req = collect_required_imports(code, &parsed(code));
        assert!(req.icon_named.contains("Heart"));
        assert!(req.icon_named.contains("Settings"));
    }

    #[test]
    fn icon_prefix_does_not_false_positive() {
        let code = "<Hearts /><SettingsPanel />";
        let req = collect_required_imports(code, &parsed(code));
        assert!(req.icon_named.is_empty());
    }

    #[test]
    fn collects_charts() {
        let code = "<ResponsiveContainer><LineChart><Line dataKey=\"v\" /><XAxis /></LineChart></ResponsiveContainer>";
        let req = collect_required_imports(code, &parsed(code));
        assert!(req.chart_named.contains("LineChart"));
        assert!(req.chart_named.contains("XAxis"));
        // `Line` goes to the chart library without a 3D signal.
        assert!(req.chart_named.contains("Line"));
        assert!(req.drei_named.is_empty());
    }

    #[test]
    fn ambiguous_line_goes_to_helpers_in_three_context() {
        let code = "<Canvas><Line points={points} /><OrbitControls /></Canvas>";
        let req = collect_required_imports(code, &parsed(code));
        assert!(req.fiber_named.contains("Canvas"));
        assert!(req.drei_named.contains("Line"));
        assert!(req.chart_named.is_empty());
    }

    #[test]
    fn three_tiers_from_namespace() {
        let code = "const v = new THREE.Vector3();";
        let req = collect_required_imports(code, &parsed(code));
        assert!(req.three_namespace);
        assert!(req.packages().contains("three"));
    }

    #[test]
    fn fiber_implies_three_dependency_without_import() {
        let code = "<Canvas camera={{ position: [0, 0, 5] }} />";
        let req = collect_required_imports(code, &parsed(code));
        let packages = req.packages();
        assert!(packages.contains("@react-three/fiber"));
        assert!(packages.contains("three"));
        assert!(!req.three_namespace && req.three_named.is_empty());
    }

    #[test]
    fn motion_namespace_and_presence() {
        let code = "<AnimatePresence><motion.div animate={{ x: 1 }} /></AnimatePresence>";
        let req = collect_required_imports(code, &parsed(code));
        assert!(req.motion_named.contains("motion"));
        assert!(req.motion_named.contains("AnimatePresence"));
    }

    #[test]
    fn unknown_packages_are_preserved_and_relative_dropped() {
        let code = "import { format } from 'date-fns';\nimport x from './local';\nformat();";
        let req = collect_required_imports(code, &parsed(code));
        assert_eq!(req.other.len(), 1);
        assert_eq!(req.other[0].source, "date-fns");
    }

    #[test]
    fn removes_single_and_multiline_imports() {
        let code = "import React from 'react';\nimport {\n  useState,\n  useEffect,\n} from 'react';\nimport './a.css';\nconst x = 1;\n";
        let out = remove_import_lines(code);
        assert!(!out.contains("import"));
        assert!(out.contains("const x = 1;"));
    }

    #[test]
    fn block_order_is_fixed_and_alphabetized() {
        let code = "useState(); <Canvas/>; <OrbitControls/>; <motion.div/>; <Heart/>; <XAxis/>; new THREE.Color();";
        let mut req = collect_required_imports(code, &parsed(code));
        req.other.push(ImportStatement {
            source: "date-fns".into(),
            default_import: None,
            named_imports: vec!["format".into()],
            namespace_import: None,
            is_relative: false,
        });
        let block = render_import_block(&req);
        let lines: Vec<&str> = block.lines().collect();
        assert!(lines[0].contains("'react'"));
        assert!(lines[1].contains("'three'"));
        assert!(lines[2].contains("'@react-three/fiber'"));
        assert!(lines[3].contains("'@react-three/drei'"));
        assert!(lines[4].contains("'framer-motion'"));
        assert!(lines[5].contains("'lucide-react'"));
        assert!(lines[6].contains("'recharts'"));
        assert!(lines[7].contains("'date-fns'"));
    }

    #[test]
    fn one_statement_per_specifier() {
        let code = "useState(); useEffect(); useMemo();";
        let req = collect_required_imports(code, &parsed(code));
        let block = render_import_block(&req);
        assert_eq!(
            block.matches("'react'").count(),
            1,
            "hooks must merge into one react import"
        );
        assert_eq!(
            block,
            "import React, { useEffect, useMemo, useState } from 'react';"
        );
    }
}

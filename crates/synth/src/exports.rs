//! Default-export guarantee.
//!
//! A deployable component file must default-export its component.  Four
//! cases, tried in order: already default-exported (no-op), exported as
//! a matching named declaration (converted), defined but never exported
//! (default export appended), or nothing recognizable (the whole block
//! is wrapped in a synthetic component).

use regex::Regex;

/// Ensure `code` default-exports the component named `component_name`.
pub fn ensure_default_export(code: &str, component_name: &str) -> String {
    if has_default_export(code) {
        return code.to_string();
    }

    // A named export of the component converts to a default export.
    let named_export =
        Regex::new(&format!(
            r"export\s+((?:async\s+)?(?:const|let|var|function|class)\s+{}\b)",
            regex::escape(component_name)
        ))
        .expect("named export regex");
    if named_export.is_match(code) {
        let converted = named_export.replace(code, "$1");
        return format!(
            "{}\n\nexport default {component_name};\n",
            converted.trim_end()
        );
    }

    // The component is defined but never exported.
    let declaration = Regex::new(&format!(
        r"(?:const|let|var|function|class)\s+{}\b",
        regex::escape(component_name)
    ))
    .expect("declaration regex");
    if declaration.is_match(code) {
        return format!("{}\n\nexport default {component_name};\n", code.trim_end());
    }

    // Last resort: wrap everything in a synthetic function component.
    wrap_in_component(code, component_name)
}

fn has_default_export(code: &str) -> bool {
    Regex::new(r"export\s+default\b")
        .expect("default export regex")
        .is_match(code)
}

/// Wrap free-standing code in a component body so the file still has a
/// mountable default export.
fn wrap_in_component(code: &str, component_name: &str) -> String {
    let indented: String = code
        .trim_end()
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "const {component_name} = () => {{\n{indented}\n  return null;\n}};\n\nexport default {component_name};\n"
    )
}

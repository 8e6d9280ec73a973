//! Generated project model.

use std::collections::BTreeSet;

use serde::Serialize;

/// Encoding tag for text files.
pub const ENCODING_UTF8: &str = "utf-8";

/// One file in a generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualFile {
    /// Project-relative path, `/`-separated.
    pub path: String,
    pub content: String,
    pub encoding: String,
}

impl VirtualFile {
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            encoding: ENCODING_UTF8.to_string(),
        }
    }
}

/// A complete synthesized project: virtual files plus build metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    pub files: Vec<VirtualFile>,
    /// Framework tag understood by the build platform (e.g. `vite`).
    pub framework: String,
    pub build_command: Option<String>,
    pub install_command: Option<String>,
    pub dev_command: Option<String>,
    pub output_directory: String,
    /// Path of the designated entry point; always present in `files`.
    pub entry_point: String,
}

impl GeneratedProject {
    /// Look up a file by path.
    pub fn file(&self, path: &str) -> Option<&VirtualFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Check the structural invariants: unique paths and an entry point
    /// that exists among the files.
    pub fn check_invariants(&self) -> Result<(), SynthError> {
        let mut seen = BTreeSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_str()) {
                return Err(SynthError::DuplicatePath(file.path.clone()));
            }
        }
        if self.file(&self.entry_point).is_none() {
            return Err(SynthError::MissingEntryPoint(self.entry_point.clone()));
        }
        Ok(())
    }
}

/// Errors from project synthesis.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// The artifact's framework family has no scaffold.
    #[error("No project scaffold for {0} artifacts")]
    UnsupportedFramework(String),

    /// Two generated files share a path.
    #[error("Duplicate file path in generated project: {0}")]
    DuplicatePath(String),

    /// The declared entry point is not among the generated files.
    #[error("Entry point {0} missing from generated project")]
    MissingEntryPoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(files: Vec<VirtualFile>, entry: &str) -> GeneratedProject {
        GeneratedProject {
            files,
            framework: "vite".to_string(),
            build_command: Some("npm run build".to_string()),
            install_command: Some("npm install".to_string()),
            dev_command: Some("npm run dev".to_string()),
            output_directory: "dist".to_string(),
            entry_point: entry.to_string(),
        }
    }

    #[test]
    fn invariants_hold_for_well_formed_project() {
        let p = project(
            vec![
                VirtualFile::text("index.html", "<html/>"),
                VirtualFile::text("src/main.jsx", "render()"),
            ],
            "src/main.jsx",
        );
        assert!(p.check_invariants().is_ok());
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let p = project(
            vec![
                VirtualFile::text("a.txt", "1"),
                VirtualFile::text("a.txt", "2"),
            ],
            "a.txt",
        );
        assert!(matches!(
            p.check_invariants(),
            Err(SynthError::DuplicatePath(_))
        ));
    }

    #[test]
    fn missing_entry_point_is_rejected() {
        let p = project(vec![VirtualFile::text("a.txt", "1")], "src/main.jsx");
        assert!(matches!(
            p.check_invariants(),
            Err(SynthError::MissingEntryPoint(_))
        ));
    }
}

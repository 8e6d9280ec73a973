//! Project scaffold emission.
//!
//! Emits the full file set around the transformed component: manifest,
//! bundler config, HTML entry, JS/TS entry module, app shell,
//! stylesheet, optional TypeScript configs, ignore file, and the
//! platform deploy config.  All content is derived from the parsed
//! artifact, so output is byte-stable across calls.

use serde_json::json;

use shipwright_core::analyzer::ParsedArtifact;
use shipwright_core::naming::project_slug;
use shipwright_core::packages::DependencySet;

use crate::project::{GeneratedProject, VirtualFile};

/// Framework tag reported to the build platform for bundled projects.
pub const FRAMEWORK_VITE: &str = "vite";

/// Framework tag for raw HTML artifacts deployed as static files.
pub const FRAMEWORK_STATIC: &str = "static";

const BUILD_COMMAND: &str = "npm run build";
const INSTALL_COMMAND: &str = "npm install";
const DEV_COMMAND: &str = "npm run dev";
const OUTPUT_DIRECTORY: &str = "dist";

// ---------------------------------------------------------------------------
// React scaffold
// ---------------------------------------------------------------------------

/// Emit the full project for a transformed React component.
pub fn react_project(
    parsed: &ParsedArtifact,
    component_code: &str,
    deps: &DependencySet,
) -> GeneratedProject {
    let ts = parsed.uses_typescript;
    let ext = if ts { "tsx" } else { "jsx" };
    let name = &parsed.component_name;
    let entry_point = format!("src/main.{ext}");

    let mut files = vec![
        VirtualFile::text("package.json", package_json(parsed, deps)),
        VirtualFile::text(
            if ts { "vite.config.ts" } else { "vite.config.js" },
            vite_config(),
        ),
        VirtualFile::text("index.html", index_html(name, ext)),
        VirtualFile::text(entry_point.clone(), entry_module(ts)),
        VirtualFile::text(format!("src/App.{ext}"), app_shell(name)),
        VirtualFile::text(format!("src/components/{name}.{ext}"), component_code),
        VirtualFile::text("src/index.css", stylesheet(parsed.uses_tailwind)),
        VirtualFile::text(".gitignore", gitignore()),
        VirtualFile::text("deploy.config.json", deploy_config_bundled()),
    ];

    if parsed.uses_tailwind {
        files.push(VirtualFile::text("tailwind.config.js", tailwind_config()));
        files.push(VirtualFile::text("postcss.config.js", postcss_config()));
    }

    if ts {
        files.push(VirtualFile::text("tsconfig.json", tsconfig()));
        files.push(VirtualFile::text("tsconfig.node.json", tsconfig_node()));
    }

    GeneratedProject {
        files,
        framework: FRAMEWORK_VITE.to_string(),
        build_command: Some(BUILD_COMMAND.to_string()),
        install_command: Some(INSTALL_COMMAND.to_string()),
        dev_command: Some(DEV_COMMAND.to_string()),
        output_directory: OUTPUT_DIRECTORY.to_string(),
        entry_point,
    }
}

// ---------------------------------------------------------------------------
// Static HTML scaffold
// ---------------------------------------------------------------------------

/// Emit a static project for a raw HTML artifact.  The artifact source
/// is the document; no bundler is involved.
pub fn html_project(parsed: &ParsedArtifact) -> GeneratedProject {
    let mut html = parsed.code.clone();
    if !html.trim_start().to_lowercase().starts_with("<!doctype") {
        html = format!("<!doctype html>\n{html}");
    }

    GeneratedProject {
        files: vec![
            VirtualFile::text("index.html", html),
            VirtualFile::text(".gitignore", gitignore()),
            VirtualFile::text("deploy.config.json", deploy_config_static()),
        ],
        framework: FRAMEWORK_STATIC.to_string(),
        build_command: None,
        install_command: None,
        dev_command: None,
        output_directory: ".".to_string(),
        entry_point: "index.html".to_string(),
    }
}

// ---------------------------------------------------------------------------
// File templates
// ---------------------------------------------------------------------------

fn package_json(parsed: &ParsedArtifact, deps: &DependencySet) -> String {
    let build = if parsed.uses_typescript {
        "tsc && vite build"
    } else {
        "vite build"
    };
    pretty(&json!({
        "name": project_slug(&parsed.component_name),
        "private": true,
        "version": "0.0.0",
        "type": "module",
        "scripts": {
            "dev": "vite",
            "build": build,
            "preview": "vite preview",
        },
        "dependencies": &deps.runtime,
        "devDependencies": &deps.dev,
    }))
}

fn vite_config() -> String {
    r"import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
});
"
    .to_string()
}

fn index_html(component_name: &str, ext: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{component_name}</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.{ext}"></script>
  </body>
</html>
"#
    )
}

fn entry_module(typescript: bool) -> String {
    let root_lookup = if typescript {
        "document.getElementById('root')!"
    } else {
        "document.getElementById('root')"
    };
    format!(
        r"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';
import './index.css';

ReactDOM.createRoot({root_lookup}).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
"
    )
}

fn app_shell(component_name: &str) -> String {
    format!(
        r#"import React from 'react';
import {component_name} from './components/{component_name}';

const App = () => {{
  return (
    <div className="app-shell">
      <{component_name} />
    </div>
  );
}};

export default App;
"#
    )
}

fn stylesheet(tailwind: bool) -> String {
    if tailwind {
        "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n".to_string()
    } else {
        r"*,
*::before,
*::after {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
}

#root {
  min-height: 100vh;
}
"
        .to_string()
    }
}

fn tailwind_config() -> String {
    r"/** @type {import('tailwindcss').Config} */
export default {
  content: ['./index.html', './src/**/*.{js,jsx,ts,tsx}'],
  theme: {
    extend: {},
  },
  plugins: [],
};
"
    .to_string()
}

fn postcss_config() -> String {
    r"export default {
  plugins: {
    tailwindcss: {},
    autoprefixer: {},
  },
};
"
    .to_string()
}

fn tsconfig() -> String {
    pretty(&json!({
        "compilerOptions": {
            "target": "ES2020",
            "useDefineForClassFields": true,
            "lib": ["ES2020", "DOM", "DOM.Iterable"],
            "module": "ESNext",
            "skipLibCheck": true,
            "moduleResolution": "bundler",
            "allowImportingTsExtensions": true,
            "resolveJsonModule": true,
            "isolatedModules": true,
            "noEmit": true,
            "jsx": "react-jsx",
            "strict": true,
        },
        "include": ["src"],
        "references": [{ "path": "./tsconfig.node.json" }],
    }))
}

fn tsconfig_node() -> String {
    pretty(&json!({
        "compilerOptions": {
            "composite": true,
            "skipLibCheck": true,
            "module": "ESNext",
            "moduleResolution": "bundler",
            "allowSyntheticDefaultImports": true,
        },
        "include": ["vite.config.ts"],
    }))
}

fn gitignore() -> String {
    "node_modules\ndist\n.env\n*.log\n.DS_Store\n".to_string()
}

fn deploy_config_bundled() -> String {
    pretty(&json!({
        "framework": FRAMEWORK_VITE,
        "buildCommand": BUILD_COMMAND,
        "outputDirectory": OUTPUT_DIRECTORY,
        "installCommand": INSTALL_COMMAND,
    }))
}

fn deploy_config_static() -> String {
    pretty(&json!({
        "framework": FRAMEWORK_STATIC,
        "buildCommand": null,
        "outputDirectory": ".",
        "installCommand": null,
    }))
}

fn pretty(value: &serde_json::Value) -> String {
    let mut out = serde_json::to_string_pretty(value).expect("serializable template");
    out.push('\n');
    out
}

//! Package registries and dependency resolution.
//!
//! Fixed lookup tables mapping detected symbols to packages and
//! packages to pinned versions.  The 3D stack is pinned to one mutually
//! compatible version set — the binding and helper layers compile
//! shaders against a specific engine minor, so the three pins move
//! together or not at all.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Well-known package names
// ---------------------------------------------------------------------------

pub const PKG_REACT: &str = "react";
pub const PKG_REACT_DOM: &str = "react-dom";
pub const PKG_THREE: &str = "three";
pub const PKG_FIBER: &str = "@react-three/fiber";
pub const PKG_DREI: &str = "@react-three/drei";
pub const PKG_FRAMER_MOTION: &str = "framer-motion";
pub const PKG_LUCIDE: &str = "lucide-react";
pub const PKG_RECHARTS: &str = "recharts";

// ---------------------------------------------------------------------------
// Version pins
// ---------------------------------------------------------------------------

/// One pinned package version.
pub struct PackagePin {
    pub name: &'static str,
    pub version: &'static str,
    /// True for build-time-only packages.
    pub dev: bool,
}

/// The version table.  The `three`/`fiber`/`drei` entries are exact
/// pins forming one compatible set; everything else is a caret range.
pub const PACKAGE_PINS: &[PackagePin] = &[
    PackagePin { name: PKG_REACT, version: "^18.3.1", dev: false },
    PackagePin { name: PKG_REACT_DOM, version: "^18.3.1", dev: false },
    PackagePin { name: PKG_THREE, version: "0.156.1", dev: false },
    PackagePin { name: PKG_FIBER, version: "8.15.11", dev: false },
    PackagePin { name: PKG_DREI, version: "9.88.13", dev: false },
    PackagePin { name: PKG_FRAMER_MOTION, version: "^11.2.0", dev: false },
    PackagePin { name: PKG_LUCIDE, version: "^0.344.0", dev: false },
    PackagePin { name: PKG_RECHARTS, version: "^2.12.7", dev: false },
    PackagePin { name: "vite", version: "^5.2.0", dev: true },
    PackagePin { name: "@vitejs/plugin-react", version: "^4.2.1", dev: true },
    PackagePin { name: "typescript", version: "^5.4.5", dev: true },
    PackagePin { name: "@types/react", version: "^18.3.0", dev: true },
    PackagePin { name: "@types/react-dom", version: "^18.3.0", dev: true },
    PackagePin { name: "tailwindcss", version: "^3.4.3", dev: true },
    PackagePin { name: "postcss", version: "^8.4.38", dev: true },
    PackagePin { name: "autoprefixer", version: "^10.4.19", dev: true },
];

/// Version used for packages outside the pin table.
pub const FALLBACK_PACKAGE_VERSION: &str = "latest";

/// Look up the pinned version for a package.
pub fn version_for(name: &str) -> Option<&'static str> {
    PACKAGE_PINS
        .iter()
        .find(|pin| pin.name == name)
        .map(|pin| pin.version)
}

/// Whether a package belongs in `devDependencies`.
pub fn is_dev_package(name: &str) -> bool {
    PACKAGE_PINS
        .iter()
        .find(|pin| pin.name == name)
        .map(|pin| pin.dev)
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Symbol registries
// ---------------------------------------------------------------------------

/// React hooks recognized by the import collector.
pub const REACT_HOOKS: &[&str] = &[
    "useState",
    "useEffect",
    "useRef",
    "useMemo",
    "useCallback",
    "useContext",
    "useReducer",
    "useLayoutEffect",
    "useId",
    "useTransition",
    "useDeferredValue",
    "useSyncExternalStore",
];

/// Icon components recognized as coming from the icon library.
pub const ICON_COMPONENTS: &[&str] = &[
    "Activity", "AlertCircle", "AlertTriangle", "Archive", "ArrowDown", "ArrowLeft",
    "ArrowRight", "ArrowUp", "Award", "Bell", "Bookmark", "Calendar",
    "Camera", "Check", "CheckCircle", "ChevronDown", "ChevronLeft", "ChevronRight",
    "ChevronUp", "Circle", "Clock", "Cloud", "Code", "Copy", "CreditCard", "Download",
    "Edit", "ExternalLink", "Eye", "EyeOff", "Facebook", "File", "FileText", "Filter",
    "Flag", "Folder", "Github", "Globe", "Grid", "Heart", "Home", "Image", "Inbox",
    "Info", "Instagram", "Layers", "Layout", "Link", "Linkedin", "List", "Loader",
    "Lock", "LogIn", "LogOut", "Mail", "Map", "MapPin", "Menu", "MessageCircle",
    "MessageSquare", "Mic", "Minus", "Monitor", "Moon", "MoreHorizontal", "MoreVertical",
    "Music", "Package", "Paperclip", "Pause", "Phone", "Play", "Plus", "Power",
    "RefreshCw", "Repeat", "Rocket", "Save", "Search", "Send", "Settings", "Share",
    "Share2", "Shield", "ShoppingBag", "ShoppingCart", "Smartphone", "Sparkles",
    "Star", "Sun", "Tag", "Terminal", "ThumbsUp", "Trash", "Trash2", "TrendingUp",
    "Twitter", "Upload", "User", "UserPlus", "Users", "Video", "Volume2", "Wifi",
    "X", "XCircle", "Youtube", "Zap",
];

/// Chart components recognized as coming from the charting library.
pub const CHART_COMPONENTS: &[&str] = &[
    "AreaChart", "Area", "BarChart", "Bar", "LineChart", "Line", "PieChart", "Pie",
    "RadarChart", "Radar", "RadialBarChart", "RadialBar", "ScatterChart", "Scatter",
    "ComposedChart", "Cell", "XAxis", "YAxis", "ZAxis", "CartesianGrid", "Tooltip",
    "Legend", "ResponsiveContainer", "ReferenceLine", "PolarGrid", "PolarAngleAxis",
    "PolarRadiusAxis", "Funnel", "FunnelChart", "Treemap", "Brush", "LabelList",
];

/// Components and hooks from the 3D binding layer.
pub const FIBER_SYMBOLS: &[&str] = &["Canvas", "useFrame", "useThree", "useLoader", "extend"];

/// Components and hooks from the 3D helpers layer.
pub const DREI_SYMBOLS: &[&str] = &[
    "OrbitControls", "PerspectiveCamera", "OrthographicCamera", "Environment", "Html",
    "Text", "Text3D", "Box", "Sphere", "Plane", "Torus", "Cylinder", "Stars", "Sky",
    "Cloud", "Float", "Center", "ContactShadows", "MeshDistortMaterial",
    "MeshWobbleMaterial", "MeshReflectorMaterial", "GradientTexture", "useGLTF",
    "useTexture", "useAnimations", "Loader", "Stats", "Grid", "Line", "Trail",
    "Sparkles", "shaderMaterial",
];

/// Animation-library symbols beyond the `motion.*` namespace.
pub const MOTION_SYMBOLS: &[&str] = &[
    "AnimatePresence",
    "useAnimation",
    "useAnimationControls",
    "useMotionValue",
    "useTransform",
    "useScroll",
    "useSpring",
    "useInView",
];

// ---------------------------------------------------------------------------
// Three-tier 3D detection
// ---------------------------------------------------------------------------

static THREE_CORE_USAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bTHREE\.\w+|new\s+(?:Scene|PerspectiveCamera|OrthographicCamera|WebGLRenderer|Vector2|Vector3|Quaternion|Euler|Color|Clock|Group|Mesh|BoxGeometry|SphereGeometry|PlaneGeometry|TextureLoader|ShaderMaterial|MeshStandardMaterial)\b",
    )
    .expect("three core usage regex")
});

/// Which tiers of the 3D stack an artifact touches.  Each tier implies
/// the ones below it: helpers -> bindings -> core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThreeTierUsage {
    pub core: bool,
    pub bindings: bool,
    pub helpers: bool,
}

impl ThreeTierUsage {
    pub fn any(&self) -> bool {
        self.core || self.bindings || self.helpers
    }
}

/// Detect 3D stack usage in (import-stripped) source text.
pub fn detect_three_usage(code: &str) -> ThreeTierUsage {
    let mut usage = ThreeTierUsage::default();

    if THREE_CORE_USAGE.is_match(code) {
        usage.core = true;
    }
    if FIBER_SYMBOLS.iter().any(|s| contains_symbol(code, s)) || code.contains("<Canvas") {
        usage.bindings = true;
    }
    if DREI_SYMBOLS.iter().any(|s| contains_symbol(code, s)) {
        usage.helpers = true;
    }

    // Tier implication.
    if usage.helpers {
        usage.bindings = true;
    }
    if usage.bindings {
        usage.core = true;
    }
    usage
}

/// Word-boundary containment check for a known symbol.
pub fn contains_symbol(code: &str, symbol: &str) -> bool {
    let bytes = code.as_bytes();
    let mut from = 0;
    while let Some(pos) = code[from..].find(symbol) {
        let start = from + pos;
        let end = start + symbol.len();
        let before_ok = start == 0 || !is_ident_char(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_ident_char(bytes[end]);
        if before_ok && after_ok {
            return true;
        }
        from = start + 1;
    }
    false
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

// ---------------------------------------------------------------------------
// Dependency resolution
// ---------------------------------------------------------------------------

/// Resolved manifest dependencies, split runtime vs. dev.  `BTreeMap`
/// keeps emission order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySet {
    pub runtime: BTreeMap<String, String>,
    pub dev: BTreeMap<String, String>,
}

/// Map a set of required packages to pinned versions.
///
/// Always adds the bundler toolchain; adds the TypeScript and Tailwind
/// toolchains only when the corresponding flag is set.  `react` pulls
/// in `react-dom` (the entry point mounts through it).
pub fn resolve_dependencies(
    packages: &BTreeSet<String>,
    uses_typescript: bool,
    uses_tailwind: bool,
) -> DependencySet {
    let mut set = DependencySet::default();

    for name in packages {
        insert(&mut set, name);
    }

    if packages.contains(PKG_REACT) {
        insert(&mut set, PKG_REACT_DOM);
    }

    insert(&mut set, "vite");
    insert(&mut set, "@vitejs/plugin-react");

    if uses_typescript {
        insert(&mut set, "typescript");
        if packages.contains(PKG_REACT) {
            insert(&mut set, "@types/react");
            insert(&mut set, "@types/react-dom");
        }
    }

    if uses_tailwind {
        insert(&mut set, "tailwindcss");
        insert(&mut set, "postcss");
        insert(&mut set, "autoprefixer");
    }

    set
}

fn insert(set: &mut DependencySet, name: &str) {
    let version = version_for(name).unwrap_or(FALLBACK_PACKAGE_VERSION);
    let target = if is_dev_package(name) {
        &mut set.dev
    } else {
        &mut set.runtime
    };
    target.insert(name.to_string(), version.to_string());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pkgs(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // -- Version pins --

    #[test]
    fn three_stack_is_exact_pinned() {
        for name in [PKG_THREE, PKG_FIBER, PKG_DREI] {
            let v = version_for(name).unwrap();
            assert!(!v.starts_with('^'), "{name} must be an exact pin, got {v}");
        }
    }

    #[test]
    fn react_is_caret_range() {
        assert_eq!(version_for(PKG_REACT), Some("^18.3.1"));
    }

    #[test]
    fn unknown_package_has_no_pin() {
        assert_eq!(version_for("left-pad"), None);
        assert!(!is_dev_package("left-pad"));
    }

    // -- Three-tier detection --

    #[test]
    fn helpers_imply_all_tiers() {
        let usage = detect_three_usage("<OrbitControls enableZoom={false} />");
        assert!(usage.core && usage.bindings && usage.helpers);
    }

    #[test]
    fn bindings_imply_core_only() {
        let usage = detect_three_usage("<Canvas>{children}</Canvas>");
        assert!(usage.core && usage.bindings);
        assert!(!usage.helpers);
    }

    #[test]
    fn namespace_usage_is_core_only() {
        let usage = detect_three_usage("const v = new THREE.Vector3(0, 1, 0)");
        assert!(usage.core);
        assert!(!usage.bindings && !usage.helpers);
    }

    #[test]
    fn constructor_usage_is_core() {
        assert!(detect_three_usage("const geo = new BoxGeometry(1, 1, 1)").core);
    }

    #[test]
    fn plain_code_uses_nothing() {
        assert!(!detect_three_usage("const x = <div>hi</div>").any());
    }

    #[test]
    fn symbol_match_respects_word_boundaries() {
        // `MyCanvasWrapper` must not count as the `Canvas` component.
        assert!(!detect_three_usage("<MyCanvasWrapper />").bindings);
    }

    // -- Dependency resolution --

    #[test]
    fn react_pulls_react_dom() {
        let set = resolve_dependencies(&pkgs(&[PKG_REACT]), false, false);
        assert!(set.runtime.contains_key(PKG_REACT_DOM));
    }

    #[test]
    fn bundler_toolchain_is_always_dev() {
        let set = resolve_dependencies(&pkgs(&[PKG_REACT]), false, false);
        assert!(set.dev.contains_key("vite"));
        assert!(set.dev.contains_key("@vitejs/plugin-react"));
        assert!(!set.runtime.contains_key("vite"));
    }

    #[test]
    fn typescript_toolchain_only_when_flagged() {
        let without = resolve_dependencies(&pkgs(&[PKG_REACT]), false, false);
        assert!(!without.dev.contains_key("typescript"));

        let with = resolve_dependencies(&pkgs(&[PKG_REACT]), true, false);
        assert!(with.dev.contains_key("typescript"));
        assert!(with.dev.contains_key("@types/react"));
    }

    #[test]
    fn tailwind_toolchain_only_when_flagged() {
        let set = resolve_dependencies(&pkgs(&[PKG_REACT]), false, true);
        assert!(set.dev.contains_key("tailwindcss"));
        assert!(set.dev.contains_key("postcss"));
        assert!(set.dev.contains_key("autoprefixer"));
    }

    #[test]
    fn unknown_packages_resolve_to_latest() {
        let set = resolve_dependencies(&pkgs(&[PKG_REACT, "date-fns"]), false, false);
        assert_eq!(set.runtime.get("date-fns").map(String::as_str), Some("latest"));
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve_dependencies(&pkgs(&[PKG_REACT, PKG_THREE, PKG_LUCIDE]), true, true);
        let b = resolve_dependencies(&pkgs(&[PKG_LUCIDE, PKG_THREE, PKG_REACT]), true, true);
        assert_eq!(a, b);
    }
}

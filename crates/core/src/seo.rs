//! Rule-based content scoring.
//!
//! Deterministic 0–100 quality score over artifact content, split into
//! five weighted categories.  Each category starts at 100 and loses a
//! fixed amount per triggered rule.  The scorer never fixes anything;
//! auto-fixing is the caller's responsibility.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::ArtifactKind;

// ---------------------------------------------------------------------------
// Rule identifiers
// ---------------------------------------------------------------------------

pub const RULE_VIEWPORT: &str = "technical-viewport";
pub const RULE_HTML_LANG: &str = "technical-lang";
pub const RULE_META_DESCRIPTION: &str = "content-meta-description";
pub const RULE_META_DESCRIPTION_SHORT: &str = "content-meta-description-short";
pub const RULE_THIN_CONTENT: &str = "content-thin";
pub const RULE_IMAGE_ALT: &str = "onpage-image-alt";
pub const RULE_MISSING_H1: &str = "onpage-h1";
pub const RULE_MISSING_TITLE: &str = "onpage-title";
pub const RULE_RESPONSIVE: &str = "ux-responsive";
pub const RULE_SEMANTIC: &str = "ux-semantic";
pub const RULE_STRUCTURED_DATA: &str = "schema-structured-data";

// ---------------------------------------------------------------------------
// Categories, severities, grades
// ---------------------------------------------------------------------------

/// Scoring category.  Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoCategory {
    Technical,
    Content,
    OnPage,
    Ux,
    Schema,
}

impl SeoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Content => "content",
            Self::OnPage => "on_page",
            Self::Ux => "ux",
            Self::Schema => "schema",
        }
    }

    /// Fixed weight of this category in the overall score.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Technical => 0.20,
            Self::Content => 0.25,
            Self::OnPage => 0.25,
            Self::Ux => 0.15,
            Self::Schema => 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoSeverity {
    Critical,
    Warning,
    Info,
}

/// Map an overall score to its letter grade.
pub fn letter_grade(score: u8) -> &'static str {
    match score {
        95..=100 => "A+",
        90..=94 => "A",
        75..=89 => "B",
        60..=74 => "C",
        50..=59 => "D",
        _ => "F",
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One triggered rule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoIssue {
    pub rule_id: &'static str,
    pub category: SeoCategory,
    pub severity: SeoSeverity,
    pub message: String,
    pub suggestion: String,
    pub is_auto_fixable: bool,
}

/// The full scoring result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    /// Weighted overall score, 0–100.
    pub score: u8,
    /// Letter grade for the overall score.
    pub grade: &'static str,
    pub technical: u8,
    pub content: u8,
    pub on_page: u8,
    pub ux: u8,
    pub schema: u8,
    pub issues: Vec<SeoIssue>,
}

// ---------------------------------------------------------------------------
// Regexes
// ---------------------------------------------------------------------------

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("img tag regex"));

static META_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\b[^>]*name\s*=\s*["']description["'][^>]*content\s*=\s*["']([^"']*)["']"#)
        .expect("meta description regex")
});

static HTML_LANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)<html\b[^>]*\blang\s*="#).expect("html lang regex"));

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag strip regex"));

static RESPONSIVE_SIGNAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@media\b|\b(?:sm|md|lg|xl):|\b(?:flex|grid)\b"#).expect("responsive regex")
});

static SEMANTIC_LANDMARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:main|nav|header|footer|section|article)\b|role\s*=")
        .expect("semantic landmark regex")
});

/// Visible text threshold below which content counts as thin.
const THIN_CONTENT_CHARS: usize = 80;

/// Minimum meta-description length before the short-description rule fires.
const MIN_DESCRIPTION_CHARS: usize = 50;

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

struct CategoryTally {
    technical: u8,
    content: u8,
    on_page: u8,
    ux: u8,
    schema: u8,
    issues: Vec<SeoIssue>,
}

impl CategoryTally {
    fn new() -> Self {
        Self {
            technical: 100,
            content: 100,
            on_page: 100,
            ux: 100,
            schema: 100,
            issues: Vec::new(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn deduct(
        &mut self,
        rule_id: &'static str,
        category: SeoCategory,
        severity: SeoSeverity,
        points: u8,
        message: &str,
        suggestion: &str,
        is_auto_fixable: bool,
    ) {
        let slot = match category {
            SeoCategory::Technical => &mut self.technical,
            SeoCategory::Content => &mut self.content,
            SeoCategory::OnPage => &mut self.on_page,
            SeoCategory::Ux => &mut self.ux,
            SeoCategory::Schema => &mut self.schema,
        };
        *slot = slot.saturating_sub(points);
        self.issues.push(SeoIssue {
            rule_id,
            category,
            severity,
            message: message.to_string(),
            suggestion: suggestion.to_string(),
            is_auto_fixable,
        });
    }
}

/// Score artifact content.
///
/// For non-HTML artifacts the generated document head (viewport meta,
/// title, lang attribute) comes from the scaffold, so those rules only
/// apply to full HTML documents.
pub fn score_content(code: &str, kind: ArtifactKind) -> SeoReport {
    let mut tally = CategoryTally::new();
    let is_document = kind == ArtifactKind::Html;

    // -- technical --
    if is_document && !code.contains("viewport") {
        tally.deduct(
            RULE_VIEWPORT,
            SeoCategory::Technical,
            SeoSeverity::Critical,
            10,
            "Document has no viewport meta tag",
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            true,
        );
    }
    if is_document && !HTML_LANG.is_match(code) {
        tally.deduct(
            RULE_HTML_LANG,
            SeoCategory::Technical,
            SeoSeverity::Warning,
            5,
            "The <html> element has no lang attribute",
            "Declare the document language, e.g. <html lang=\"en\">",
            true,
        );
    }

    // -- content --
    match META_DESCRIPTION.captures(code) {
        None => tally.deduct(
            RULE_META_DESCRIPTION,
            SeoCategory::Content,
            SeoSeverity::Warning,
            5,
            "No meta description found",
            "Add a meta description of 50-160 characters",
            true,
        ),
        Some(cap) if cap[1].trim().len() < MIN_DESCRIPTION_CHARS => tally.deduct(
            RULE_META_DESCRIPTION_SHORT,
            SeoCategory::Content,
            SeoSeverity::Info,
            3,
            "Meta description is shorter than 50 characters",
            "Expand the description so search results show a full snippet",
            false,
        ),
        Some(_) => {}
    }
    if visible_text_len(code) < THIN_CONTENT_CHARS {
        tally.deduct(
            RULE_THIN_CONTENT,
            SeoCategory::Content,
            SeoSeverity::Info,
            5,
            "Page has very little visible text content",
            "Add descriptive copy so crawlers have something to index",
            false,
        );
    }

    // -- on-page --
    if IMG_TAG
        .find_iter(code)
        .any(|m| !m.as_str().contains("alt="))
    {
        tally.deduct(
            RULE_IMAGE_ALT,
            SeoCategory::OnPage,
            SeoSeverity::Warning,
            10,
            "One or more images are missing alt text",
            "Add an alt attribute describing each image",
            true,
        );
    }
    if !code.contains("<h1") {
        tally.deduct(
            RULE_MISSING_H1,
            SeoCategory::OnPage,
            SeoSeverity::Warning,
            5,
            "No top-level heading found",
            "Add a single <h1> describing the page",
            false,
        );
    }
    if is_document && !code.contains("<title") {
        tally.deduct(
            RULE_MISSING_TITLE,
            SeoCategory::OnPage,
            SeoSeverity::Critical,
            10,
            "Document has no <title> element",
            "Add a unique, descriptive title",
            true,
        );
    }

    // -- ux --
    if !RESPONSIVE_SIGNAL.is_match(code) {
        tally.deduct(
            RULE_RESPONSIVE,
            SeoCategory::Ux,
            SeoSeverity::Warning,
            5,
            "No responsive-layout signal detected",
            "Use media queries or responsive utility classes",
            false,
        );
    }
    if !SEMANTIC_LANDMARK.is_match(code) {
        tally.deduct(
            RULE_SEMANTIC,
            SeoCategory::Ux,
            SeoSeverity::Info,
            5,
            "No semantic landmark elements found",
            "Wrap content in <main>/<header>/<footer> landmarks",
            false,
        );
    }

    // -- schema --
    if !code.contains("application/ld+json") {
        tally.deduct(
            RULE_STRUCTURED_DATA,
            SeoCategory::Schema,
            SeoSeverity::Warning,
            15,
            "No structured data found; a synthesized default will be used",
            "Provide a JSON-LD block describing the page",
            true,
        );
    }

    let score = overall_score(
        tally.technical,
        tally.content,
        tally.on_page,
        tally.ux,
        tally.schema,
    );

    SeoReport {
        score,
        grade: letter_grade(score),
        technical: tally.technical,
        content: tally.content,
        on_page: tally.on_page,
        ux: tally.ux,
        schema: tally.schema,
        issues: tally.issues,
    }
}

/// Weighted average of the category scores, rounded to nearest.
pub fn overall_score(technical: u8, content: u8, on_page: u8, ux: u8, schema: u8) -> u8 {
    let weighted = f64::from(technical) * SeoCategory::Technical.weight()
        + f64::from(content) * SeoCategory::Content.weight()
        + f64::from(on_page) * SeoCategory::OnPage.weight()
        + f64::from(ux) * SeoCategory::Ux.weight()
        + f64::from(schema) * SeoCategory::Schema.weight();
    weighted.round() as u8
}

/// Length of the text left after stripping markup.
fn visible_text_len(code: &str) -> usize {
    ANY_TAG
        .replace_all(code, " ")
        .split_whitespace()
        .map(str::len)
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

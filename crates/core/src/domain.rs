//! Domain-name rules and DNS record synthesis.
//!
//! Pure functions over a domain string: syntax validation, subdomain
//! detection, root-domain extraction, and the default DNS records the
//! platform expects.  Remote verification lives in the deploy crate.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Platform DNS targets
// ---------------------------------------------------------------------------

/// CNAME target for subdomains, pointing at the platform edge network.
pub const EDGE_CNAME_TARGET: &str = "cname.platform-edge.net";

/// Anycast IP for apex domains.
pub const APEX_A_VALUE: &str = "76.76.21.21";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A DNS record the domain owner must create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record type (`A` or `CNAME`).
    pub record_type: String,
    /// Record name (`@` for the apex, otherwise the label).
    pub name: String,
    /// Record value.
    pub value: String,
}

impl DnsRecord {
    pub fn a(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            record_type: "A".to_string(),
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn cname(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            record_type: "CNAME".to_string(),
            name: name.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Syntax rules
// ---------------------------------------------------------------------------

static DOMAIN_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}$")
        .expect("domain syntax regex")
});

/// Whether a string is a syntactically valid domain name.
pub fn is_valid_domain(domain: &str) -> bool {
    domain.len() <= 253 && DOMAIN_SYNTAX.is_match(domain)
}

/// Validate a domain, returning a domain error with the reason.
pub fn validate_domain(domain: &str) -> Result<(), CoreError> {
    if is_valid_domain(domain) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{domain}' is not a valid domain name"
        )))
    }
}

/// A domain with more than two dot-separated labels is a subdomain.
pub fn is_subdomain(domain: &str) -> bool {
    domain.split('.').count() > 2
}

/// Extract the registrable root: the last two labels.
pub fn root_domain(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() <= 2 {
        domain.to_string()
    } else {
        labels[labels.len() - 2..].join(".")
    }
}

/// Compute the default DNS records for pointing a domain at the
/// platform.
///
/// - A subdomain needs a single CNAME to the edge target.
/// - An apex domain needs an A record plus a CNAME for the `www` label.
pub fn required_dns_records(domain: &str) -> Vec<DnsRecord> {
    if is_subdomain(domain) {
        let label = domain
            .strip_suffix(&format!(".{}", root_domain(domain)))
            .unwrap_or(domain);
        vec![DnsRecord::cname(label, EDGE_CNAME_TARGET)]
    } else {
        vec![
            DnsRecord::a("@", APEX_A_VALUE),
            DnsRecord::cname("www", EDGE_CNAME_TARGET),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_domains() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("sub.example.co.uk"));
        assert!(is_valid_domain("my-site.example.io"));
    }

    #[test]
    fn rejects_malformed_domains() {
        assert!(!is_valid_domain("example"));
        assert!(!is_valid_domain("-bad.example.com"));
        assert!(!is_valid_domain("bad-.example.com"));
        assert!(!is_valid_domain("exa mple.com"));
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("example.c"));
    }

    #[test]
    fn rejects_overlong_domain() {
        let long = format!("{}.com", "a".repeat(300));
        assert!(!is_valid_domain(&long));
    }

    #[test]
    fn subdomain_detection() {
        assert!(is_subdomain("app.example.com"));
        assert!(is_subdomain("a.b.example.com"));
        assert!(!is_subdomain("example.com"));
    }

    #[test]
    fn root_extraction() {
        assert_eq!(root_domain("app.example.com"), "example.com");
        assert_eq!(root_domain("a.b.example.com"), "example.com");
        assert_eq!(root_domain("example.com"), "example.com");
    }

    #[test]
    fn subdomain_gets_single_cname() {
        let records = required_dns_records("app.example.com");
        assert_eq!(records, vec![DnsRecord::cname("app", EDGE_CNAME_TARGET)]);
    }

    #[test]
    fn nested_subdomain_keeps_full_label() {
        let records = required_dns_records("a.b.example.com");
        assert_eq!(records[0].name, "a.b");
    }

    #[test]
    fn apex_gets_a_record_and_www_cname() {
        let records = required_dns_records("example.com");
        assert_eq!(
            records,
            vec![
                DnsRecord::a("@", APEX_A_VALUE),
                DnsRecord::cname("www", EDGE_CNAME_TARGET),
            ]
        );
    }
}

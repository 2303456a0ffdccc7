use ferrous_recursor_domain::{DomainError, DomainName};

#[test]
fn test_parse_normalises_case_and_trailing_dot() {
    let parsed = DomainName::parse("Gaia.CS.UMass.EDU.").unwrap();
    assert_eq!(parsed.as_str(), "gaia.cs.umass.edu");
    assert_eq!(parsed, DomainName::parse("gaia.cs.umass.edu").unwrap());
}

#[test]
fn test_root_name() {
    let root = DomainName::parse(".").unwrap();
    assert!(root.is_root());
    assert_eq!(root, DomainName::root());
    assert_eq!(root.to_string(), ".");
    assert_eq!(root.label_count(), 0);
    assert!(root.parent().is_none());
}

#[test]
fn test_rejects_empty_label() {
    assert!(matches!(
        DomainName::parse("wiki..nl"),
        Err(DomainError::InvalidDomainName(_))
    ));
}

#[test]
fn test_rejects_overlong_label() {
    let label = "a".repeat(64);
    assert!(DomainName::parse(&format!("{}.nl", label)).is_err());
    let label = "a".repeat(63);
    assert!(DomainName::parse(&format!("{}.nl", label)).is_ok());
}

#[test]
fn test_ancestors_end_at_root() {
    let name = DomainName::parse("gaia.cs.umass.edu").unwrap();
    let ancestors: Vec<String> = name.ancestors().map(|n| n.as_str().to_string()).collect();
    assert_eq!(
        ancestors,
        vec!["gaia.cs.umass.edu", "cs.umass.edu", "umass.edu", "edu", ""]
    );
}

#[test]
fn test_subdomain_respects_label_boundary() {
    let name = DomainName::parse("www.badwiki.nl").unwrap();
    assert!(name.is_subdomain_of(&DomainName::parse("nl").unwrap()));
    assert!(name.is_subdomain_of(&DomainName::parse("badwiki.nl").unwrap()));
    assert!(!name.is_subdomain_of(&DomainName::parse("wiki.nl").unwrap()));
    assert!(name.is_subdomain_of(&DomainName::root()));
    assert!(name.is_subdomain_of(&name));
}

#[test]
fn test_serde_as_plain_string() {
    let name = DomainName::parse("wiki.nl").unwrap();
    let json = serde_json::to_string(&name).unwrap();
    assert_eq!(json, "\"wiki.nl\"");
    let back: DomainName = serde_json::from_str("\"WIKI.NL.\"").unwrap();
    assert_eq!(back, name);
}

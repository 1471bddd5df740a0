mod common;

use common::{date, full_resume, UUID_1};
use resume_core::{
    ContactType, Experience, Link, Organization, Resume, ResumeValidationError, Section,
    SectionType,
};

#[test]
fn equality_ignores_insertion_order_of_contacts() {
    let mut first = Resume::with_id(UUID_1, "Leela").unwrap();
    first.set_contact(ContactType::Email, "leela@planet.example");
    first.set_contact(ContactType::Mobile, "555-0101");

    let mut second = Resume::with_id(UUID_1, "Leela").unwrap();
    second.set_contact(ContactType::Mobile, "555-0101");
    second.set_contact(ContactType::Email, "leela@planet.example");

    assert_eq!(first, second);
}

#[test]
fn equality_is_structural_over_sections() {
    let base = full_resume(UUID_1, "Leela");
    let mut changed = base.clone();
    changed
        .set_section(SectionType::Achievement, Section::list(["Captain"]))
        .unwrap();

    assert_ne!(base, changed);
}

#[test]
fn list_item_order_is_significant() {
    let mut first = Resume::with_id(UUID_1, "Leela").unwrap();
    first
        .set_section(SectionType::Qualifications, Section::list(["a", "b"]))
        .unwrap();
    let mut second = Resume::with_id(UUID_1, "Leela").unwrap();
    second
        .set_section(SectionType::Qualifications, Section::list(["b", "a"]))
        .unwrap();

    assert_ne!(first, second);
}

#[test]
fn with_id_rejects_empty_identity_or_name() {
    assert_eq!(
        Resume::with_id("", "Name").unwrap_err(),
        ResumeValidationError::EmptyUuid
    );
    assert_eq!(
        Resume::with_id(UUID_1, "").unwrap_err(),
        ResumeValidationError::EmptyFullName
    );
}

#[test]
fn whitespace_names_and_empty_contacts_are_accepted() {
    let mut resume = Resume::with_id(" ", " ").unwrap();
    resume.set_contact(ContactType::Skype, "");
    resume
        .set_section(
            SectionType::Experience,
            Section::organizations(vec![Organization::new(" ", None, Vec::new())]),
        )
        .unwrap();

    assert_eq!(resume.validate(), Ok(()));
    assert_eq!(resume.contact(ContactType::Skype).map(Link::as_str), Some(""));
}

#[test]
fn absent_key_means_unset() {
    let mut resume = full_resume(UUID_1, "Leela");
    assert!(resume.contact(ContactType::Skype).is_none());

    let removed = resume.remove_contact(ContactType::Email);
    assert_eq!(removed, Some(Link::new("planet@express.example")));
    assert!(resume.contact(ContactType::Email).is_none());
    assert!(!resume.contacts().contains_key(&ContactType::Email));
}

#[test]
fn section_types_bind_expected_kinds() {
    let mut resume = Resume::with_id(UUID_1, "Leela").unwrap();
    for kind in SectionType::ALL {
        let section = match kind.kind() {
            resume_core::SectionKind::Text => Section::text("t"),
            resume_core::SectionKind::List => Section::list(["l"]),
            resume_core::SectionKind::Organization => Section::organizations(Vec::new()),
        };
        resume.set_section(kind, section).unwrap();
    }
    assert_eq!(resume.sections().len(), SectionType::ALL.len());
}

#[test]
fn experience_equality_includes_description() {
    let without = Experience::new(date(2000, 1), date(2001, 1), "Pilot", None).unwrap();
    let with = Experience::new(date(2000, 1), date(2001, 1), "Pilot", Some("x".into())).unwrap();
    assert_ne!(without, with);
}

#[test]
fn link_reports_url_values() {
    assert!(Link::new("https://github.com/leela").is_url());
    assert!(!Link::new("+1 555 0100").is_url());
    assert_eq!(ContactType::Linkedin.title(), "LinkedIn");
}

#[test]
fn new_generates_full_v4_uuid() {
    let first = Resume::new("Hermes Conrad").unwrap();
    let second = Resume::new("Hermes Conrad").unwrap();

    assert_eq!(first.uuid().len(), 36);
    let parsed = uuid::Uuid::parse_str(first.uuid()).unwrap();
    assert_eq!(parsed.get_version_num(), 4);
    assert_ne!(first.uuid(), second.uuid());
    assert_eq!(first.full_name(), "Hermes Conrad");
}

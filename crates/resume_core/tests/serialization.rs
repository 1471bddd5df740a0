mod common;

use chrono::Datelike;
use common::{date, full_resume, test_resume, UUID_1};
use resume_core::{
    DataStreamStrategy, JsonStreamStrategy, Organization, Resume, Section, SectionType,
    SerializationError, SerializationStrategy, StrategyKind,
};

fn strategies() -> Vec<(&'static str, Box<dyn SerializationStrategy>)> {
    vec![
        ("json", StrategyKind::Json.strategy()),
        ("data", StrategyKind::Data.strategy()),
    ]
}

fn assert_roundtrip(resume: &Resume) {
    for (name, strategy) in strategies() {
        let bytes = strategy.to_bytes(resume).unwrap();
        let decoded = strategy.from_bytes(&bytes).unwrap();
        assert_eq!(&decoded, resume, "{name} strategy changed the document");
    }
}

#[test]
fn full_document_roundtrips() {
    assert_roundtrip(&full_resume(UUID_1, "Dr. Zoidberg"));
}

#[test]
fn empty_maps_roundtrip() {
    assert_roundtrip(&test_resume(UUID_1, "Zapp Brannigan", false, false));
}

#[test]
fn organization_without_experiences_roundtrips() {
    let mut resume = Resume::with_id(UUID_1, "Kif Kroker").unwrap();
    resume
        .set_section(
            SectionType::Education,
            Section::organizations(vec![Organization::new("DOOP Academy", None, Vec::new())]),
        )
        .unwrap();
    assert_roundtrip(&resume);
}

#[test]
fn json_wire_shape_uses_named_keys_and_discriminators() {
    let resume = full_resume(UUID_1, "Dr. Zoidberg");
    let bytes = JsonStreamStrategy.to_bytes(&resume).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["uuid"], UUID_1);
    assert_eq!(json["fullName"], "Dr. Zoidberg");
    assert_eq!(json["contacts"]["EMAIL"], "planet@express.example");
    assert_eq!(json["sections"]["OBJECTIVE"]["type"], "TEXT");
    assert_eq!(json["sections"]["ACHIEVEMENT"]["type"], "LIST");
    assert_eq!(json["sections"]["EXPERIENCE"]["type"], "ORGANIZATION");
    let experience = &json["sections"]["EXPERIENCE"]["organizations"][0]["experiences"][0];
    assert_eq!(experience["startDate"], "2999-12-01");
    assert_eq!(experience["finishDate"], "3100-01-01");
    assert!(experience.get("description").is_none());
}

#[test]
fn json_unknown_discriminator_is_rejected() {
    let payload = br#"{
        "uuid": "u1",
        "fullName": "Mom",
        "contacts": {},
        "sections": {"OBJECTIVE": {"type": "MARKDOWN", "content": "x"}}
    }"#;
    let err = JsonStreamStrategy.from_bytes(payload).unwrap_err();
    assert!(matches!(err, SerializationError::Json(_)));
}

#[test]
fn json_invalid_date_is_rejected() {
    let payload = br#"{
        "uuid": "u1",
        "fullName": "Mom",
        "sections": {"EXPERIENCE": {"type": "ORGANIZATION", "organizations": [
            {"name": "MomCorp", "experiences": [
                {"startDate": "2001-13-01", "finishDate": "2002-01-01", "title": "CEO"}
            ]}
        ]}}
    }"#;
    let err = JsonStreamStrategy.from_bytes(payload).unwrap_err();
    assert!(err.to_string().contains("2001-13-01"), "unexpected error: {err}");
}

#[test]
fn json_rejects_mismatched_section_variant_and_empty_name() {
    let mismatched = br#"{"uuid": "u1", "fullName": "Mom",
        "sections": {"ACHIEVEMENT": {"type": "TEXT", "content": "x"}}}"#;
    assert!(JsonStreamStrategy.from_bytes(mismatched).is_err());

    let unnamed = br#"{"uuid": "u1", "fullName": ""}"#;
    let err = JsonStreamStrategy.from_bytes(unnamed).unwrap_err();
    assert!(err.to_string().contains("fullName"), "unexpected error: {err}");
}

#[test]
fn json_rejects_reversed_experience_period() {
    let payload = br#"{"uuid": "u1", "fullName": "Mom",
        "sections": {"EXPERIENCE": {"type": "ORGANIZATION", "organizations": [
            {"name": "MomCorp", "experiences": [
                {"startDate": "2010-01-01", "finishDate": "2009-01-01", "title": "CEO"}
            ]}
        ]}}}"#;
    assert!(JsonStreamStrategy.from_bytes(payload).is_err());
}

#[test]
fn data_unknown_discriminator_is_rejected() {
    let mut resume = Resume::with_id(UUID_1, "Elzar").unwrap();
    resume
        .set_section(SectionType::Objective, Section::text("BAM"))
        .unwrap();
    let mut bytes = DataStreamStrategy.to_bytes(&resume).unwrap();

    let position = bytes
        .windows(4)
        .position(|window| window == b"TEXT")
        .unwrap();
    bytes[position..position + 4].copy_from_slice(b"XEXT");

    let err = DataStreamStrategy.from_bytes(&bytes).unwrap_err();
    match err {
        SerializationError::InvalidData(message) => assert!(message.contains("XEXT")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strategies_are_not_interchangeable_on_the_same_bytes() {
    let resume = test_resume(UUID_1, "Scruffy", true, false);
    let json = JsonStreamStrategy.to_bytes(&resume).unwrap();
    assert!(DataStreamStrategy.from_bytes(&json).is_err());
}

#[test]
fn experience_dates_keep_day_precision() {
    let mut resume = Resume::with_id(UUID_1, "Hattie McDoogal").unwrap();
    let experience = resume_core::Experience::new(
        date(2000, 2).with_day(29).unwrap(),
        date(2000, 3),
        "Landlady",
        Some(String::new()),
    )
    .unwrap();
    resume
        .set_section(
            SectionType::Experience,
            Section::organizations(vec![Organization::new("Robot Arms Apts", None, vec![experience])]),
        )
        .unwrap();
    assert_roundtrip(&resume);
}

#![allow(dead_code)]

use chrono::NaiveDate;
use resume_core::{ContactType, Experience, Organization, Resume, Section, SectionType};

pub const UUID_1: &str = "fff28b8d-bb88-487b-aa96-7655a7e1146c";
pub const UUID_2: &str = "000d55f9-6570-4a9c-b190-12fa94fefe4a";
pub const UUID_3: &str = "6b0a2f7e-3c1d-4e55-9f3a-2d8c1b7e4a90";
pub const UUID_4: &str = "9c4e1a2b-7d3f-4b6a-8e5c-1f0d2a3b4c5d";

pub fn date(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// Document with optional contact and section blocks.
pub fn test_resume(uuid: &str, full_name: &str, with_contacts: bool, with_sections: bool) -> Resume {
    let mut resume = Resume::with_id(uuid, full_name).unwrap();

    if with_contacts {
        resume.set_contact(ContactType::Email, "planet@express.example");
        resume.set_contact(ContactType::Phone, "+1 (212) 555-0100");
        resume.set_contact(ContactType::Github, "https://github.com/planet-express");
    }

    if with_sections {
        resume
            .set_section(
                SectionType::Objective,
                Section::text("Deliver anything, anywhere \"on time\" & <intact>\n\tÜñíçødé 🦀"),
            )
            .unwrap();
        resume
            .set_section(SectionType::Personal, Section::text(""))
            .unwrap();
        resume
            .set_section(
                SectionType::Achievement,
                Section::list(["Saved Earth twice", "multi\nline item", ""]),
            )
            .unwrap();
        resume
            .set_section(SectionType::Qualifications, Section::list(Vec::<String>::new()))
            .unwrap();
        resume
            .set_section(
                SectionType::Experience,
                Section::organizations(vec![
                    Organization::new(
                        "Planet Express",
                        Some("https://planetexpress.example".to_string()),
                        vec![
                            Experience::new(date(2999, 12), date(3100, 1), "Delivery boy", None)
                                .unwrap(),
                            Experience::new(
                                date(2990, 1),
                                date(2999, 11),
                                "Cryogenic subject",
                                Some("Frozen; see \"Space Pilot 3000\"".to_string()),
                            )
                            .unwrap(),
                        ],
                    ),
                    Organization::new("Panucci's Pizza", None, Vec::new()),
                ]),
            )
            .unwrap();
        resume
            .set_section(
                SectionType::Education,
                Section::organizations(vec![Organization::new(
                    "Mars University",
                    None,
                    vec![Experience::new(date(3001, 9), date(3005, 6), "Ph.D.", None).unwrap()],
                )]),
            )
            .unwrap();
    }

    resume
}

pub fn full_resume(uuid: &str, full_name: &str) -> Resume {
    test_resume(uuid, full_name, true, true)
}

// Application record (in-memory)
//
// NOTE: This is NOT persisted; it holds the answers for one in-progress
// application. Submission replaces the whole record with its default
// instance, so no partial-record state survives a submit.

use serde::Serialize;
use thiserror::Error;

/// Identifier for every scalar answer field on the form.
///
/// The form's change events address fields by wire name (e.g. `fullName`);
/// `FieldId::parse` validates those names at the boundary so an unrecognized
/// name is an explicit error instead of a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    // Personal information
    FullName,
    Email,
    Password,
    Phone,
    DateOfBirth,
    Gender,
    Address,
    MaritalStatus,
    Nationality,
    // Educational details
    HighestQualification,
    University,
    PassingYear,
    Percentage,
    Certifications,
    // Work experience
    CompanyName,
    JobTitle,
    JobDuration,
    Responsibilities,
    SkillsLearned,
    // Skills & achievements
    TechnicalSkills,
    SoftSkills,
    Achievements,
    LanguagesSpoken,
    // Family details
    FatherName,
    MotherName,
    Siblings,
}

/// Per-keystroke character policy for a field.
///
/// A keystroke that violates the policy is consumed and not applied; no error
/// is surfaced for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPolicy {
    /// Any printable character.
    Any,
    /// Letters and spaces only.
    LettersOnly,
    /// ASCII digits only.
    Digits,
    /// Calendar-date characters (digits and dashes).
    Date,
}

impl InputPolicy {
    pub fn allows(self, ch: char) -> bool {
        match self {
            InputPolicy::Any => true,
            InputPolicy::LettersOnly => ch.is_alphabetic() || ch == ' ',
            InputPolicy::Digits => ch.is_ascii_digit(),
            InputPolicy::Date => ch.is_ascii_digit() || ch == '-',
        }
    }
}

impl FieldId {
    pub const ALL: [FieldId; 26] = [
        FieldId::FullName,
        FieldId::Email,
        FieldId::Password,
        FieldId::Phone,
        FieldId::DateOfBirth,
        FieldId::Gender,
        FieldId::Address,
        FieldId::MaritalStatus,
        FieldId::Nationality,
        FieldId::HighestQualification,
        FieldId::University,
        FieldId::PassingYear,
        FieldId::Percentage,
        FieldId::Certifications,
        FieldId::CompanyName,
        FieldId::JobTitle,
        FieldId::JobDuration,
        FieldId::Responsibilities,
        FieldId::SkillsLearned,
        FieldId::TechnicalSkills,
        FieldId::SoftSkills,
        FieldId::Achievements,
        FieldId::LanguagesSpoken,
        FieldId::FatherName,
        FieldId::MotherName,
        FieldId::Siblings,
    ];

    /// Wire name used by the form's change events.
    pub fn name(self) -> &'static str {
        match self {
            FieldId::FullName => "fullName",
            FieldId::Email => "email",
            FieldId::Password => "password",
            FieldId::Phone => "phone",
            FieldId::DateOfBirth => "dob",
            FieldId::Gender => "gender",
            FieldId::Address => "address",
            FieldId::MaritalStatus => "maritalStatus",
            FieldId::Nationality => "nationality",
            FieldId::HighestQualification => "highestQualification",
            FieldId::University => "university",
            FieldId::PassingYear => "passingYear",
            FieldId::Percentage => "percentage",
            FieldId::Certifications => "certifications",
            FieldId::CompanyName => "companyName",
            FieldId::JobTitle => "jobTitle",
            FieldId::JobDuration => "jobDuration",
            FieldId::Responsibilities => "responsibilities",
            FieldId::SkillsLearned => "skillsLearned",
            FieldId::TechnicalSkills => "technicalSkills",
            FieldId::SoftSkills => "softSkills",
            FieldId::Achievements => "achievements",
            FieldId::LanguagesSpoken => "languagesSpoken",
            FieldId::FatherName => "fatherName",
            FieldId::MotherName => "motherName",
            FieldId::Siblings => "siblings",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::FullName => "Full Name",
            FieldId::Email => "Email",
            FieldId::Password => "Password",
            FieldId::Phone => "Phone Number",
            FieldId::DateOfBirth => "Date of Birth",
            FieldId::Gender => "Gender",
            FieldId::Address => "Address",
            FieldId::MaritalStatus => "Marital Status",
            FieldId::Nationality => "Nationality",
            FieldId::HighestQualification => "Highest Qualification",
            FieldId::University => "University/College Name",
            FieldId::PassingYear => "Passing Year",
            FieldId::Percentage => "Percentage/CGPA",
            FieldId::Certifications => "Additional Certifications",
            FieldId::CompanyName => "Current/Last Company Name",
            FieldId::JobTitle => "Job Title/Designation",
            FieldId::JobDuration => "Duration (From - To)",
            FieldId::Responsibilities => "Key Responsibilities",
            FieldId::SkillsLearned => "Skills Learned",
            FieldId::TechnicalSkills => "Technical Skills",
            FieldId::SoftSkills => "Soft Skills",
            FieldId::Achievements => "Achievements",
            FieldId::LanguagesSpoken => "Languages Spoken",
            FieldId::FatherName => "Father's Name",
            FieldId::MotherName => "Mother's Name",
            FieldId::Siblings => "Number of Siblings",
        }
    }

    /// Whether the field carries the cosmetic required marker.
    ///
    /// This is a presentation hint only; nothing gates navigation or
    /// submission on required fields being filled.
    pub fn required(self) -> bool {
        matches!(
            self,
            FieldId::FullName
                | FieldId::Email
                | FieldId::Password
                | FieldId::Phone
                | FieldId::DateOfBirth
                | FieldId::Gender
                | FieldId::MaritalStatus
        )
    }

    pub fn policy(self) -> InputPolicy {
        match self {
            FieldId::Phone => InputPolicy::Digits,
            FieldId::DateOfBirth => InputPolicy::Date,
            // Letters-and-spaces gates as observed on the form.
            FieldId::Percentage | FieldId::Siblings => InputPolicy::LettersOnly,
            _ => InputPolicy::Any,
        }
    }

    /// Maximum accepted length in characters, where the form caps input.
    pub fn max_len(self) -> Option<usize> {
        match self {
            FieldId::Phone => Some(7),
            FieldId::DateOfBirth => Some(10),
            _ => None,
        }
    }

    /// Resolve a wire name to a field identifier.
    pub fn parse(name: &str) -> Option<FieldId> {
        FieldId::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Raised when a string-keyed update addresses a field that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized field name: {0}")]
pub struct UnknownField(pub String);

/// The complete set of answers for one in-progress application.
///
/// Every field exists with an empty default before its step is ever visited,
/// and each update replaces exactly one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    #[serde(rename = "dob")]
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub marital_status: String,
    pub nationality: String,
    pub highest_qualification: String,
    pub university: String,
    pub passing_year: String,
    pub percentage: String,
    pub certifications: String,
    pub company_name: String,
    pub job_title: String,
    pub job_duration: String,
    pub responsibilities: String,
    pub skills_learned: String,
    pub technical_skills: String,
    pub soft_skills: String,
    pub achievements: String,
    pub languages_spoken: String,
    pub father_name: String,
    pub mother_name: String,
    pub siblings: String,

    #[serde(rename = "profileImage")]
    pub profile_media: Option<super::attachment::Attachment>,
    pub resume: Option<super::attachment::Attachment>,
    #[serde(rename = "additionalDocs")]
    pub additional_document: Option<super::attachment::Attachment>,
}

impl ApplicationRecord {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::FullName => &self.full_name,
            FieldId::Email => &self.email,
            FieldId::Password => &self.password,
            FieldId::Phone => &self.phone,
            FieldId::DateOfBirth => &self.date_of_birth,
            FieldId::Gender => &self.gender,
            FieldId::Address => &self.address,
            FieldId::MaritalStatus => &self.marital_status,
            FieldId::Nationality => &self.nationality,
            FieldId::HighestQualification => &self.highest_qualification,
            FieldId::University => &self.university,
            FieldId::PassingYear => &self.passing_year,
            FieldId::Percentage => &self.percentage,
            FieldId::Certifications => &self.certifications,
            FieldId::CompanyName => &self.company_name,
            FieldId::JobTitle => &self.job_title,
            FieldId::JobDuration => &self.job_duration,
            FieldId::Responsibilities => &self.responsibilities,
            FieldId::SkillsLearned => &self.skills_learned,
            FieldId::TechnicalSkills => &self.technical_skills,
            FieldId::SoftSkills => &self.soft_skills,
            FieldId::Achievements => &self.achievements,
            FieldId::LanguagesSpoken => &self.languages_spoken,
            FieldId::FatherName => &self.father_name,
            FieldId::MotherName => &self.mother_name,
            FieldId::Siblings => &self.siblings,
        }
    }

    /// Replace a single field's value, leaving every other field untouched.
    pub fn set(&mut self, field: FieldId, value: String) {
        let slot = match field {
            FieldId::FullName => &mut self.full_name,
            FieldId::Email => &mut self.email,
            FieldId::Password => &mut self.password,
            FieldId::Phone => &mut self.phone,
            FieldId::DateOfBirth => &mut self.date_of_birth,
            FieldId::Gender => &mut self.gender,
            FieldId::Address => &mut self.address,
            FieldId::MaritalStatus => &mut self.marital_status,
            FieldId::Nationality => &mut self.nationality,
            FieldId::HighestQualification => &mut self.highest_qualification,
            FieldId::University => &mut self.university,
            FieldId::PassingYear => &mut self.passing_year,
            FieldId::Percentage => &mut self.percentage,
            FieldId::Certifications => &mut self.certifications,
            FieldId::CompanyName => &mut self.company_name,
            FieldId::JobTitle => &mut self.job_title,
            FieldId::JobDuration => &mut self.job_duration,
            FieldId::Responsibilities => &mut self.responsibilities,
            FieldId::SkillsLearned => &mut self.skills_learned,
            FieldId::TechnicalSkills => &mut self.technical_skills,
            FieldId::SoftSkills => &mut self.soft_skills,
            FieldId::Achievements => &mut self.achievements,
            FieldId::LanguagesSpoken => &mut self.languages_spoken,
            FieldId::FatherName => &mut self.father_name,
            FieldId::MotherName => &mut self.mother_name,
            FieldId::Siblings => &mut self.siblings,
        };
        *slot = value;
    }

    pub fn attachment(
        &self,
        slot: super::attachment::AttachmentSlot,
    ) -> Option<&super::attachment::Attachment> {
        use super::attachment::AttachmentSlot;
        match slot {
            AttachmentSlot::ProfileMedia => self.profile_media.as_ref(),
            AttachmentSlot::Resume => self.resume.as_ref(),
            AttachmentSlot::AdditionalDocument => self.additional_document.as_ref(),
        }
    }

    /// Replace the entire record with its default (empty) instance.
    pub fn reset(&mut self) {
        *self = ApplicationRecord::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty_for_every_field() {
        let record = ApplicationRecord::default();
        for field in FieldId::ALL {
            assert_eq!(
                record.get(field),
                "",
                "field {} should default to empty",
                field.name()
            );
        }
        assert!(record.profile_media.is_none());
        assert!(record.resume.is_none());
        assert!(record.additional_document.is_none());
    }

    #[test]
    fn set_then_get_roundtrips_for_every_field() {
        let mut record = ApplicationRecord::default();
        for (i, field) in FieldId::ALL.iter().enumerate() {
            record.set(*field, format!("value-{}", i));
        }
        for (i, field) in FieldId::ALL.iter().enumerate() {
            assert_eq!(
                record.get(*field),
                format!("value-{}", i),
                "field {} should read back what was written",
                field.name()
            );
        }
    }

    #[test]
    fn set_touches_only_the_named_field() {
        let mut record = ApplicationRecord::default();
        record.set(FieldId::FullName, "Jane Doe".to_string());
        record.set(FieldId::Email, "jane@example.com".to_string());

        let before = record.clone();
        record.set(FieldId::Phone, "5551234".to_string());

        for field in FieldId::ALL {
            if field == FieldId::Phone {
                continue;
            }
            assert_eq!(record.get(field), before.get(field));
        }
        assert_eq!(record.get(FieldId::Phone), "5551234");
    }

    #[test]
    fn parse_resolves_every_wire_name() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::parse(field.name()), Some(field));
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(FieldId::parse("favoriteColor"), None);
        assert_eq!(FieldId::parse(""), None);
        assert_eq!(FieldId::parse("FULLNAME"), None);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut record = ApplicationRecord::default();
        record.set(FieldId::FullName, "Jane Doe".to_string());
        record.set(FieldId::Siblings, "two".to_string());
        record.reset();
        assert_eq!(record, ApplicationRecord::default());
    }

    #[test]
    fn letters_only_policy_filters_digits_and_punctuation() {
        let policy = FieldId::Percentage.policy();
        assert!(policy.allows('a'));
        assert!(policy.allows('Z'));
        assert!(policy.allows(' '));
        assert!(!policy.allows('9'));
        assert!(!policy.allows('%'));
    }

    #[test]
    fn phone_policy_is_digits_capped_at_seven() {
        assert_eq!(FieldId::Phone.policy(), InputPolicy::Digits);
        assert_eq!(FieldId::Phone.max_len(), Some(7));
        assert!(FieldId::Phone.policy().allows('0'));
        assert!(!FieldId::Phone.policy().allows('a'));
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let mut record = ApplicationRecord::default();
        record.set(FieldId::FullName, "Jane Doe".to_string());
        record.set(FieldId::DateOfBirth, "1994-05-17".to_string());

        let json = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["dob"], "1994-05-17");
        assert!(json["profileImage"].is_null());
    }
}

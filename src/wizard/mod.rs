//! Step wizard controller.
//!
//! The controller owns all mutable form state: the application record, the
//! wizard position, and the post-submission confirmation flag. The view layer
//! never touches the record directly; every mutation flows through the
//! methods here.

use log::{info, warn};
use uuid::Uuid;

use crate::models::attachment::{Attachment, AttachmentError, AttachmentSlot};
use crate::models::record::{ApplicationRecord, FieldId, UnknownField};
use crate::utils::logging;

/// The six fixed panels of the application form, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PersonalInfo,
    Education,
    WorkExperience,
    Skills,
    FamilyDetails,
    Documents,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::PersonalInfo,
        Step::Education,
        Step::WorkExperience,
        Step::Skills,
        Step::FamilyDetails,
        Step::Documents,
    ];

    /// 1-based position shown to the user.
    pub fn index(self) -> u8 {
        match self {
            Step::PersonalInfo => 1,
            Step::Education => 2,
            Step::WorkExperience => 3,
            Step::Skills => 4,
            Step::FamilyDetails => 5,
            Step::Documents => 6,
        }
    }

    /// Resolve a 1-based index; out-of-range indices are rejected.
    pub fn from_index(index: u8) -> Option<Step> {
        Step::ALL.iter().copied().find(|s| s.index() == index)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal Information",
            Step::Education => "Educational Details",
            Step::WorkExperience => "Work Experience",
            Step::Skills => "Skills & Achievements",
            Step::FamilyDetails => "Family Details",
            Step::Documents => "Upload Documents",
        }
    }

    /// Short label for the step-indicator chips.
    pub fn chip_label(self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal",
            Step::Education => "Education",
            Step::WorkExperience => "Experience",
            Step::Skills => "Skills",
            Step::FamilyDetails => "Family",
            Step::Documents => "Documents",
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }

    pub fn is_first(self) -> bool {
        self == Step::PersonalInfo
    }

    pub fn is_last(self) -> bool {
        self == Step::Documents
    }

    /// The fixed, disjoint subset of scalar fields presented on this step.
    pub fn fields(self) -> &'static [FieldId] {
        match self {
            Step::PersonalInfo => &[
                FieldId::FullName,
                FieldId::Email,
                FieldId::Password,
                FieldId::Phone,
                FieldId::DateOfBirth,
                FieldId::Gender,
                FieldId::Address,
                FieldId::MaritalStatus,
                FieldId::Nationality,
            ],
            Step::Education => &[
                FieldId::HighestQualification,
                FieldId::University,
                FieldId::PassingYear,
                FieldId::Percentage,
                FieldId::Certifications,
            ],
            Step::WorkExperience => &[
                FieldId::CompanyName,
                FieldId::JobTitle,
                FieldId::JobDuration,
                FieldId::Responsibilities,
                FieldId::SkillsLearned,
            ],
            Step::Skills => &[
                FieldId::TechnicalSkills,
                FieldId::SoftSkills,
                FieldId::Achievements,
                FieldId::LanguagesSpoken,
            ],
            Step::FamilyDetails => &[FieldId::FatherName, FieldId::MotherName, FieldId::Siblings],
            Step::Documents => &[],
        }
    }
}

/// Wizard state machine: record + position + confirmation flag.
#[derive(Debug, Clone)]
pub struct Wizard {
    record: ApplicationRecord,
    position: Step,
    confirmation: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Wizard::new()
    }
}

impl Wizard {
    pub fn new() -> Wizard {
        Wizard {
            record: ApplicationRecord::default(),
            position: Step::PersonalInfo,
            confirmation: false,
        }
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn position(&self) -> Step {
        self.position
    }

    /// True between `submit()` and `acknowledge_submission()`.
    pub fn confirmation_pending(&self) -> bool {
        self.confirmation
    }

    /// Replace one scalar field's value.
    pub fn update(&mut self, field: FieldId, value: impl Into<String>) {
        self.record.set(field, value.into());
    }

    /// String-keyed update boundary for callers that address fields by wire
    /// name. An unrecognized name is reported and leaves the record
    /// unchanged.
    pub fn update_named(&mut self, name: &str, value: &str) -> Result<(), UnknownField> {
        match FieldId::parse(name) {
            Some(field) => {
                self.record.set(field, value.to_string());
                Ok(())
            }
            None => {
                warn!(
                    "[PHASE: wizard] [STEP: update] Ignoring update for unrecognized field '{}'",
                    name
                );
                Err(UnknownField(name.to_string()))
            }
        }
    }

    /// Replace a file-valued field. A `Some` value is checked against the
    /// slot's accept rules first; on rejection the previous value is
    /// retained. `None` clears the slot.
    pub fn update_attachment(
        &mut self,
        slot: AttachmentSlot,
        attachment: Option<Attachment>,
    ) -> Result<(), AttachmentError> {
        if let Some(att) = &attachment {
            if let Err(e) = slot.accepts(att) {
                warn!(
                    "[PHASE: wizard] [STEP: attach] Rejected file for {}: {}",
                    slot.name(),
                    e
                );
                return Err(e);
            }
        }

        let target = match slot {
            AttachmentSlot::ProfileMedia => &mut self.record.profile_media,
            AttachmentSlot::Resume => &mut self.record.resume,
            AttachmentSlot::AdditionalDocument => &mut self.record.additional_document,
        };
        *target = attachment;
        Ok(())
    }

    pub fn clear_attachment(&mut self, slot: AttachmentSlot) {
        // Clearing is always permitted; the accept rules only apply to a
        // newly picked file.
        let _ = self.update_attachment(slot, None);
    }

    /// Move one step forward, saturating at the last step.
    pub fn advance(&mut self) {
        if let Some(next) = self.position.next() {
            self.position = next;
        }
    }

    /// Move one step back, saturating at the first step.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.position.prev() {
            self.position = prev;
        }
    }

    /// Direct-set navigation from the step-indicator chips. No completion
    /// gate: skipping ahead past unfilled required fields is allowed.
    pub fn jump_to(&mut self, step: Step) {
        self.position = step;
    }

    /// Submit the application: clear the record, return to the first step,
    /// and raise the confirmation flag. Returns the submission id used in
    /// the logs.
    pub fn submit(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        info!(
            "[PHASE: wizard] [STEP: submit] Submission {} recorded; clearing local state",
            id
        );
        // Never log raw contact details.
        info!(
            "[PHASE: wizard] [STEP: submit] Applicant contact: email={}, phone={}",
            logging::mask_email(&self.record.email),
            logging::mask_sensitive(&self.record.phone)
        );
        self.record.reset();
        self.position = Step::PersonalInfo;
        self.confirmation = true;
        id
    }

    /// Dismiss the post-submission confirmation dialog.
    pub fn acknowledge_submission(&mut self) {
        self.confirmation = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attachment::MediaKind;
    use std::path::PathBuf;

    fn attachment(name: &str) -> Attachment {
        Attachment {
            path: PathBuf::from(name),
            file_name: name.to_string(),
            size_bytes: 42,
            kind: MediaKind::from_path(std::path::Path::new(name)),
        }
    }

    #[test]
    fn step_fields_partition_the_record() {
        let mut seen = Vec::new();
        for step in Step::ALL {
            for field in step.fields() {
                assert!(
                    !seen.contains(field),
                    "field {} appears on more than one step",
                    field.name()
                );
                seen.push(*field);
            }
        }
        assert_eq!(seen.len(), FieldId::ALL.len(), "every field belongs to a step");
    }

    #[test]
    fn step_indices_roundtrip_and_reject_out_of_range() {
        for step in Step::ALL {
            assert_eq!(Step::from_index(step.index()), Some(step));
        }
        assert_eq!(Step::from_index(0), None);
        assert_eq!(Step::from_index(7), None);
    }

    #[test]
    fn update_then_read_returns_written_value() {
        let mut wizard = Wizard::new();
        wizard.update(FieldId::FullName, "Jane Doe");
        assert_eq!(wizard.record().get(FieldId::FullName), "Jane Doe");
    }

    #[test]
    fn unknown_field_name_leaves_record_unchanged() {
        let mut wizard = Wizard::new();
        wizard.update(FieldId::Email, "jane@example.com");
        let before = wizard.record().clone();

        let result = wizard.update_named("favoriteColor", "teal");
        assert_eq!(result, Err(UnknownField("favoriteColor".to_string())));
        assert_eq!(wizard.record(), &before);
    }

    #[test]
    fn update_named_resolves_wire_names() {
        let mut wizard = Wizard::new();
        wizard
            .update_named("fullName", "Jane Doe")
            .expect("fullName is a known field");
        assert_eq!(wizard.record().get(FieldId::FullName), "Jane Doe");
    }

    #[test]
    fn advance_then_retreat_is_an_inverse_pair_on_interior_steps() {
        for start in [Step::Education, Step::WorkExperience, Step::Skills, Step::FamilyDetails] {
            let mut wizard = Wizard::new();
            wizard.jump_to(start);
            wizard.advance();
            wizard.retreat();
            assert_eq!(wizard.position(), start);
        }
    }

    #[test]
    fn navigation_saturates_at_the_ends() {
        let mut wizard = Wizard::new();
        wizard.retreat();
        assert_eq!(wizard.position(), Step::PersonalInfo);

        wizard.jump_to(Step::Documents);
        wizard.advance();
        assert_eq!(wizard.position(), Step::Documents);
    }

    #[test]
    fn jump_to_is_a_direct_set_from_any_position() {
        let mut wizard = Wizard::new();
        wizard.jump_to(Step::FamilyDetails);
        assert_eq!(wizard.position(), Step::FamilyDetails);
        wizard.jump_to(Step::Education);
        assert_eq!(wizard.position(), Step::Education);
        wizard.jump_to(Step::Education);
        assert_eq!(wizard.position(), Step::Education);
    }

    #[test]
    fn answers_survive_navigation() {
        // Fill a field, walk forward three steps, jump back; the value must
        // be untouched throughout.
        let mut wizard = Wizard::new();
        wizard.update(FieldId::FullName, "Jane Doe");

        wizard.advance();
        wizard.advance();
        wizard.advance();
        assert_eq!(wizard.position(), Step::Skills);
        assert_eq!(wizard.record().get(FieldId::FullName), "Jane Doe");

        wizard.jump_to(Step::PersonalInfo);
        assert_eq!(wizard.position(), Step::PersonalInfo);
        assert_eq!(wizard.record().get(FieldId::FullName), "Jane Doe");
    }

    #[test]
    fn profile_media_rejection_keeps_previous_value() {
        let mut wizard = Wizard::new();
        let result = wizard.update_attachment(
            AttachmentSlot::ProfileMedia,
            Some(attachment("notes.txt")),
        );
        assert!(result.is_err());
        assert!(wizard.record().profile_media.is_none());

        // A valid pick sticks, and a later rejection keeps it.
        wizard
            .update_attachment(AttachmentSlot::ProfileMedia, Some(attachment("intro.mp4")))
            .expect("video is accepted");
        let kept = wizard.record().profile_media.clone();
        assert!(kept.is_some());

        let rejected = wizard.update_attachment(
            AttachmentSlot::ProfileMedia,
            Some(attachment("resume.pdf")),
        );
        assert!(rejected.is_err());
        assert_eq!(wizard.record().profile_media, kept);
    }

    #[test]
    fn resume_slot_accepts_any_file() {
        let mut wizard = Wizard::new();
        wizard
            .update_attachment(AttachmentSlot::Resume, Some(attachment("resume.pdf")))
            .expect("resume accepts documents");
        assert_eq!(
            wizard.record().resume.as_ref().map(|a| a.file_name.as_str()),
            Some("resume.pdf")
        );
    }

    #[test]
    fn clear_attachment_empties_the_slot() {
        let mut wizard = Wizard::new();
        wizard
            .update_attachment(AttachmentSlot::Resume, Some(attachment("resume.pdf")))
            .expect("accepted");
        wizard.clear_attachment(AttachmentSlot::Resume);
        assert!(wizard.record().resume.is_none());
    }

    #[test]
    fn submit_raises_flag_and_resets_record_and_position() {
        let mut wizard = Wizard::new();
        wizard.update(FieldId::FullName, "Jane Doe");
        wizard
            .update_attachment(AttachmentSlot::Resume, Some(attachment("resume.pdf")))
            .expect("accepted");
        wizard.jump_to(Step::Documents);

        wizard.submit();

        assert!(wizard.confirmation_pending());
        assert_eq!(wizard.position(), Step::PersonalInfo);
        assert_eq!(wizard.record(), &ApplicationRecord::default());
    }

    #[test]
    fn acknowledging_clears_the_confirmation_flag() {
        let mut wizard = Wizard::new();
        wizard.jump_to(Step::Documents);
        wizard.submit();
        wizard.acknowledge_submission();
        assert!(!wizard.confirmation_pending());
    }
}

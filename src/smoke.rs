//! Deterministic proof runners for automated checks.
//!
//! `run_form_contract` drives the wizard controller through its observable
//! contract (field updates, navigation, file rejection, submission reset)
//! and writes a transcript under the log folder. It exits via an error when
//! any check fails, so tooling can gate on the exit code.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::models::attachment::{Attachment, AttachmentSlot, MediaKind};
use crate::models::record::{ApplicationRecord, FieldId};
use crate::wizard::{Step, Wizard};

const TRANSCRIPT_FILE: &str = "form_contract_smoke_transcript.log";

struct Transcript {
    lines: Vec<String>,
    failures: usize,
}

impl Transcript {
    fn new() -> Transcript {
        Transcript {
            lines: Vec::new(),
            failures: 0,
        }
    }

    fn note(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!("[PHASE: contract] {}", line);
        self.lines.push(line);
    }

    fn check(&mut self, label: &str, ok: bool) {
        if ok {
            self.note(format!("PASS: {}", label));
        } else {
            self.failures += 1;
            self.note(format!("FAIL: {}", label));
        }
    }
}

fn sample_attachment(name: &str, kind: MediaKind) -> Attachment {
    Attachment {
        path: name.into(),
        file_name: name.to_string(),
        size_bytes: 1024,
        kind,
    }
}

/// Drive the controller through its contract and write the transcript.
pub fn run_form_contract(log_dir: &Path) -> Result<()> {
    let mut t = Transcript::new();
    t.note(format!(
        "Form contract smoke started at {}",
        chrono::Utc::now().to_rfc3339()
    ));

    let mut wizard = Wizard::new();

    // Fresh session: defaults everywhere, step 1, no confirmation.
    t.check(
        "record starts with defaults",
        wizard.record() == &ApplicationRecord::default(),
    );
    t.check("position starts at step 1", wizard.position() == Step::PersonalInfo);
    t.check("confirmation starts cleared", !wizard.confirmation_pending());

    // Field update followed by a read returns the written value.
    wizard.update(FieldId::FullName, "Jane Doe");
    t.check(
        "update then read returns the written value",
        wizard.record().get(FieldId::FullName) == "Jane Doe",
    );

    // Unknown wire names leave the record unchanged.
    let before = wizard.record().clone();
    let unknown = wizard.update_named("favoriteColor", "teal");
    t.check("unknown field name is reported", unknown.is_err());
    t.check(
        "unknown field name leaves the record unchanged",
        wizard.record() == &before,
    );

    // advance x3 from step 1 lands on step 4 with the answer intact.
    wizard.advance();
    wizard.advance();
    wizard.advance();
    t.check("advance x3 reaches step 4", wizard.position() == Step::Skills);
    t.check(
        "answers survive advancing",
        wizard.record().get(FieldId::FullName) == "Jane Doe",
    );

    // jump_to is a direct set.
    wizard.jump_to(Step::PersonalInfo);
    t.check("jump_to(1) lands on step 1", wizard.position() == Step::PersonalInfo);
    t.check(
        "answers survive jumping",
        wizard.record().get(FieldId::FullName) == "Jane Doe",
    );

    // advance/retreat are inverse on interior steps.
    wizard.jump_to(Step::WorkExperience);
    wizard.advance();
    wizard.retreat();
    t.check(
        "advance then retreat restores the position",
        wizard.position() == Step::WorkExperience,
    );

    // Disallowed media kind never changes the profile slot.
    let rejected = wizard.update_attachment(
        AttachmentSlot::ProfileMedia,
        Some(sample_attachment("notes.txt", MediaKind::Document)),
    );
    t.check("text file is rejected for profile media", rejected.is_err());
    t.check(
        "rejected pick leaves the slot empty",
        wizard.record().profile_media.is_none(),
    );

    let accepted = wizard.update_attachment(
        AttachmentSlot::ProfileMedia,
        Some(sample_attachment("intro.mp3", MediaKind::Audio)),
    );
    t.check("audio file is accepted for profile media", accepted.is_ok());

    // Snapshot the filled record for the transcript before submission.
    let snapshot = serde_json::to_string(wizard.record())
        .unwrap_or_else(|_| "<unserializable>".to_string());
    t.note(format!("record before submit: {}", snapshot));

    // Submission raises the flag and resets record + position.
    wizard.jump_to(Step::Documents);
    let submission_id = wizard.submit();
    t.note(format!("submission id: {}", submission_id));
    t.check("submit raises the confirmation flag", wizard.confirmation_pending());
    t.check(
        "submit resets the record to defaults",
        wizard.record() == &ApplicationRecord::default(),
    );
    t.check(
        "submit returns the position to step 1",
        wizard.position() == Step::PersonalInfo,
    );

    wizard.acknowledge_submission();
    t.check(
        "acknowledging clears the confirmation flag",
        !wizard.confirmation_pending(),
    );

    let verdict = if t.failures == 0 {
        "RESULT: PASS".to_string()
    } else {
        format!("RESULT: FAIL ({} failed checks)", t.failures)
    };
    t.note(verdict);

    let path = log_dir.join(TRANSCRIPT_FILE);
    std::fs::write(&path, t.lines.join("\n") + "\n")
        .with_context(|| format!("Failed to write transcript {:?}", path))?;
    info!(
        "[PHASE: contract] [STEP: transcript] Wrote {} lines to {:?}",
        t.lines.len(),
        path
    );

    if t.failures > 0 {
        anyhow::bail!("{} contract checks failed; see {:?}", t.failures, path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_smoke_passes_and_writes_a_transcript() {
        let dir = tempfile::tempdir().expect("tempdir");
        run_form_contract(dir.path()).expect("contract holds");

        let transcript =
            std::fs::read_to_string(dir.path().join(TRANSCRIPT_FILE)).expect("transcript exists");
        assert!(transcript.contains("RESULT: PASS"), "{}", transcript);
        assert!(!transcript.contains("FAIL:"), "{}", transcript);
        assert!(transcript.contains("\"fullName\":\"Jane Doe\""), "{}", transcript);
    }
}

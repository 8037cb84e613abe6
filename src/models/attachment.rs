// Attachment handles for the document-upload step.
//
// An attachment is an owned handle to a file the applicant picked: path,
// display name, size, and a media kind sniffed from the extension. The handle
// is acquired once on selection and released when it is replaced or the
// session ends; the file contents are never read.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

/// Coarse media classification derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    Document,
    Other,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> MediaKind {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "mp3" | "wav" | "ogg" | "flac" | "m4a" | "aac" => MediaKind::Audio,
            "mp4" | "m4v" | "mkv" | "webm" | "mov" | "avi" => MediaKind::Video,
            "pdf" | "doc" | "docx" | "odt" | "rtf" | "txt" | "md" => MediaKind::Document,
            _ => MediaKind::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::Other => "other",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three file-valued fields on the upload step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSlot {
    ProfileMedia,
    Resume,
    AdditionalDocument,
}

impl AttachmentSlot {
    pub const ALL: [AttachmentSlot; 3] = [
        AttachmentSlot::ProfileMedia,
        AttachmentSlot::Resume,
        AttachmentSlot::AdditionalDocument,
    ];

    /// Wire name used by the form's file-change events.
    pub fn name(self) -> &'static str {
        match self {
            AttachmentSlot::ProfileMedia => "profileImage",
            AttachmentSlot::Resume => "resume",
            AttachmentSlot::AdditionalDocument => "additionalDocs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttachmentSlot::ProfileMedia => "Profile Media (audio/video)",
            AttachmentSlot::Resume => "Resume (PDF)",
            AttachmentSlot::AdditionalDocument => "Additional Documents",
        }
    }

    pub fn parse(name: &str) -> Option<AttachmentSlot> {
        AttachmentSlot::ALL.iter().copied().find(|s| s.name() == name)
    }

    /// Check a picked file against this slot's accept rules.
    ///
    /// Only the profile slot restricts media kinds (audio or video); the
    /// other slots accept any file.
    pub fn accepts(self, attachment: &Attachment) -> Result<(), AttachmentError> {
        match self {
            AttachmentSlot::ProfileMedia => match attachment.kind {
                MediaKind::Audio | MediaKind::Video => Ok(()),
                kind => Err(AttachmentError::UnsupportedMediaType {
                    file_name: attachment.file_name.clone(),
                    kind,
                }),
            },
            AttachmentSlot::Resume | AttachmentSlot::AdditionalDocument => Ok(()),
        }
    }
}

/// A rejected file selection. The previous slot value is always retained.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("\"{file_name}\" is a {kind} file; this slot accepts audio or video only.")]
    UnsupportedMediaType { file_name: String, kind: MediaKind },
}

/// Owned handle to one picked file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub kind: MediaKind,
}

impl Attachment {
    /// Build a handle from a path on disk, reading the metadata once.
    pub fn from_path(path: &Path) -> Result<Attachment> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Unable to read the selected file: {}", path.display()))?;
        if !meta.is_file() {
            anyhow::bail!("Not a file: {}", path.display());
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<file>")
            .to_string();

        Ok(Attachment {
            kind: MediaKind::from_path(path),
            path: path.to_path_buf(),
            file_name,
            size_bytes: meta.len(),
        })
    }

    /// One-line preview shown under the slot, recomputed on every change.
    pub fn preview(&self) -> String {
        format!(
            "{} — {} ({})",
            self.kind,
            self.file_name,
            format_size(self.size_bytes)
        )
    }
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

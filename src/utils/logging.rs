// Logging utilities
// Structured logging with JSON and human-readable formats

use log::Level;
use serde_json::json;

/// Mask a sensitive value for logging.
///
/// Short values are hidden entirely; longer ones keep the first and last few
/// characters for troubleshooting.
pub fn mask_sensitive(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let visible = 4;
    let start: String = chars[..visible].iter().collect();
    let end: String = chars[chars.len() - visible..].iter().collect();
    format!("{}...{}", start, end)
}

/// Mask an email address: keep the first character of the local part and the
/// domain, hide the rest. Values that do not look like an address fall back
/// to the generic mask.
pub fn mask_email(value: &str) -> String {
    let s = value.trim();
    if s.is_empty() {
        return String::new();
    }

    let Some((local, domain)) = s.split_once('@') else {
        return mask_sensitive(s);
    };
    if local.is_empty() || domain.is_empty() {
        return mask_sensitive(s);
    }

    let first = local.chars().next().unwrap_or('*');
    format!("{}***@{}", first, domain)
}

/// Parse phase and step from a log message.
/// Extracts the `[PHASE: ...]` and `[STEP: ...]` patterns.
pub fn parse_log_metadata(message: &str) -> (Option<String>, Option<String>, String) {
    let (phase, rest) = extract_tag(message, "[PHASE:");
    let (step, cleaned) = extract_tag(&rest, "[STEP:");
    (phase, step, cleaned)
}

fn extract_tag(message: &str, tag: &str) -> (Option<String>, String) {
    let Some(start) = message.find(tag) else {
        return (None, message.to_string());
    };
    let Some(end) = message[start..].find(']') else {
        return (None, message.to_string());
    };

    let value = message[start + tag.len()..start + end].trim().to_string();
    let cleaned = format!("{} {}", &message[..start], &message[start + end + 1..])
        .trim()
        .to_string();
    (Some(value), cleaned)
}

/// Format a log entry as a single JSON line.
pub fn format_json_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": message,
    });

    if let Some(phase) = phase {
        entry["phase"] = json!(phase);
    }
    if let Some(step) = step {
        entry["step"] = json!(step);
    }

    serde_json::to_string(&entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format a log entry as a human-readable line.
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut line = format!("[{}] [{}]", timestamp, level.as_str());

    if let Some(phase) = phase {
        line.push_str(&format!(" [PHASE: {}]", phase));
    }
    if let Some(step) = step {
        line.push_str(&format!(" [STEP: {}]", step));
    }

    line.push_str(&format!(" [{}] {}", target, message));
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_sensitive_hides_short_values_entirely() {
        assert_eq!(mask_sensitive("abc"), "***");
        assert_eq!(mask_sensitive("12345678"), "***");
    }

    #[test]
    fn mask_sensitive_keeps_ends_of_long_values() {
        let masked = mask_sensitive("correct horse battery");
        assert!(masked.starts_with("corr"), "masked: {}", masked);
        assert!(masked.ends_with("tery"), "masked: {}", masked);
        assert!(masked.contains("..."), "masked: {}", masked);
        assert!(!masked.contains("horse"), "middle leaked: {}", masked);
    }

    #[test]
    fn mask_sensitive_handles_multibyte_values() {
        // Must not slice inside a UTF-8 sequence.
        let masked = mask_sensitive("pässwörd-sehr-geheim");
        assert!(masked.contains("..."), "masked: {}", masked);
        assert!(!masked.contains("geheim"), "middle leaked: {}", masked);
    }

    #[test]
    fn mask_email_keeps_first_char_and_domain() {
        assert_eq!(mask_email("jane.doe@example.com"), "j***@example.com");
        assert_eq!(mask_email(""), "");
    }

    #[test]
    fn mask_email_falls_back_for_non_addresses() {
        let masked = mask_email("not-an-address-at-all");
        assert!(!masked.contains("address"), "masked: {}", masked);
        assert_eq!(
            mask_email("@example.com"),
            mask_sensitive("@example.com"),
            "an empty local part is not treated as an address"
        );
    }

    #[test]
    fn parse_log_metadata_extracts_phase_and_step() {
        let (phase, step, cleaned) =
            parse_log_metadata("[PHASE: wizard] [STEP: submit] Submission recorded");
        assert_eq!(phase.as_deref(), Some("wizard"));
        assert_eq!(step.as_deref(), Some("submit"));
        assert_eq!(cleaned, "Submission recorded");
    }

    #[test]
    fn parse_log_metadata_passes_plain_messages_through() {
        let (phase, step, cleaned) = parse_log_metadata("nothing tagged here");
        assert_eq!(phase, None);
        assert_eq!(step, None);
        assert_eq!(cleaned, "nothing tagged here");
    }

    #[test]
    fn json_log_line_carries_level_and_tags() {
        let line = format_json_log(
            "2026-01-01T00:00:00Z",
            Level::Info,
            "applyform",
            "Submission recorded",
            Some("wizard"),
            Some("submit"),
        );
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["phase"], "wizard");
        assert_eq!(value["step"], "submit");
        assert_eq!(value["message"], "Submission recorded");
    }

    #[test]
    fn human_readable_line_includes_tags_in_order() {
        let line = format_human_readable_log(
            "2026-01-01 00:00:00.000",
            Level::Warn,
            "applyform",
            "Rejected file",
            Some("wizard"),
            Some("attach"),
        );
        assert_eq!(
            line,
            "[2026-01-01 00:00:00.000] [WARN] [PHASE: wizard] [STEP: attach] [applyform] Rejected file"
        );
    }
}

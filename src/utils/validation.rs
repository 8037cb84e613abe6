// Input validation utilities
//
// Inline format checks for the wizard. These are presentation-level
// diagnostics: an empty value always passes (required markers are cosmetic),
// and a failing check never blocks navigation or submission.

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;

/// Validate an email address shape (local@domain.tld).
pub fn validate_email(value: &str) -> Result<()> {
    let s = value.trim();
    if s.is_empty() {
        return Ok(());
    }

    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| anyhow::anyhow!("Internal error: failed to compile email regex: {}", e))?;
    if !re.is_match(s) {
        return Err(anyhow::anyhow!(
            "Email must look like name@example.com"
        ));
    }
    Ok(())
}

/// Validate a phone number: exactly seven digits.
pub fn validate_phone(value: &str) -> Result<()> {
    let s = value.trim();
    if s.is_empty() {
        return Ok(());
    }

    let re = Regex::new(r"^\d{7}$")
        .map_err(|e| anyhow::anyhow!("Internal error: failed to compile phone regex: {}", e))?;
    if !re.is_match(s) {
        return Err(anyhow::anyhow!("Phone number must be exactly 7 digits"));
    }
    Ok(())
}

/// Validate a date of birth as a real calendar date (YYYY-MM-DD).
pub fn validate_birth_date(value: &str) -> Result<()> {
    let s = value.trim();
    if s.is_empty() {
        return Ok(());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Date of birth must be a valid YYYY-MM-DD date"))?;
    Ok(())
}

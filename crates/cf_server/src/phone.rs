//! Phone number normalization.
//!
//! Stored phone values arrive in whatever shape the user typed —
//! "(555) 123-4567", "555.123.4567", "5551234567".  Search compares the
//! digit skeletons so all of those match each other.

/// Strip everything but ASCII digits.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

//! Avatar color assignment.
//!
//! A contact gets a display color once, at creation.  The color is not
//! sensitive, never encrypted, and not user-editable.

use rand::Rng;

const PALETTE: &[&str] = &[
    "#AB47BC", "#7E57C2", "#5C6BC0", "#42A5F5", "#29B6F6", "#26C6DA",
    "#26A69A", "#66BB6A", "#9CCC65", "#FFA726", "#FF7043", "#8D6E63",
    "#EC407A", "#78909C",
];

/// Pick a color token for a new contact.
pub fn generate_color() -> String {
    let idx = rand::rngs::OsRng.gen_range(0..PALETTE.len());
    PALETTE[idx].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_yields_a_palette_color() {
        for _ in 0..64 {
            let c = generate_color();
            assert!(PALETTE.contains(&c.as_str()));
        }
    }
}

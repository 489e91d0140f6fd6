//! Normalization rules applied to client-supplied text before matching.
//!
//! Title-casing capitalises the first cased character of every word and
//! lower-cases the rest, where a word is any run of cased characters. This is
//! a simple rule: it gives "Of" in "Isle Of Man" and does not know about
//! particles or names like "McLeod". Stored reference data follows the same
//! rule, so matching stays consistent.

/// Title-case a free-text value ("new south wales" -> "New South Wales").
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;

    for c in value.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && previous_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }

    out
}

/// Normalize an ISO country code ("au" -> "AU").
pub fn country_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Length of a body in raw characters, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

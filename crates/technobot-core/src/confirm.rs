//! Confirmation keyword matching for the pending-transfer flow.
//!
//! The vocabulary is fixed and small: Vietnamese accented and unaccented
//! spellings plus the English words. Matching is exact after case folding
//! and diacritic stripping; anything else is not a keyword.

/// Confirmation vocabulary after folding.
const CONFIRM_KEYWORDS: &[&str] = &["XAC NHAN", "CONFIRM"];
/// Cancellation vocabulary after folding.
const CANCEL_KEYWORDS: &[&str] = &["HUY", "CANCEL"];

/// Recognized confirmation keyword classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKeyword {
    /// The user confirmed the pending transfer.
    Confirm,
    /// The user cancelled the pending transfer.
    Cancel,
}

/// Match a raw message against the confirmation vocabulary.
///
/// Returns `None` for everything that is not an exact keyword, leaving the
/// pending-transfer state untouched for ordinary messages.
pub fn match_keyword(message: &str) -> Option<ConfirmKeyword> {
    let folded = fold(message);
    if CONFIRM_KEYWORDS.contains(&folded.as_str()) {
        Some(ConfirmKeyword::Confirm)
    } else if CANCEL_KEYWORDS.contains(&folded.as_str()) {
        Some(ConfirmKeyword::Cancel)
    } else {
        None
    }
}

/// Uppercase, strip Vietnamese diacritics, and collapse whitespace runs.
fn fold(text: &str) -> String {
    let upper = text.to_uppercase();
    let stripped: String = upper.chars().map(strip_diacritic).collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map an uppercase Vietnamese letter to its unaccented base letter.
fn strip_diacritic(ch: char) -> char {
    const A: &str = "ÀÁẢÃẠĂẰẮẲẴẶÂẦẤẨẪẬ";
    const E: &str = "ÈÉẺẼẸÊỀẾỂỄỆ";
    const I: &str = "ÌÍỈĨỊ";
    const O: &str = "ÒÓỎÕỌÔỒỐỔỖỘƠỜỚỞỠỢ";
    const U: &str = "ÙÚỦŨỤƯỪỨỬỮỰ";
    const Y: &str = "ỲÝỶỸỴ";

    if A.contains(ch) {
        'A'
    } else if E.contains(ch) {
        'E'
    } else if I.contains(ch) {
        'I'
    } else if O.contains(ch) {
        'O'
    } else if U.contains(ch) {
        'U'
    } else if Y.contains(ch) {
        'Y'
    } else if ch == 'Đ' {
        'D'
    } else {
        ch
    }
}

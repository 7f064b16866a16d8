// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort question classifier.
//!
//! The Completion Service gives no structural signal that an utterance is a
//! question, so this relies on punctuation alone. Everything that counts
//! questions goes through [`is_question`].

/// Whether an interviewer utterance counts as a question.
///
/// True when the text, after trimming trailing whitespace, ends with an ASCII
/// or fullwidth question mark.
pub fn is_question(text: &str) -> bool {
    text.trim_end().ends_with(['?', '？'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_question_mark_is_a_question() {
        assert!(is_question("Can you describe a challenging bug you fixed?"));
        assert!(is_question("เล่าให้ฟังหน่อยได้ไหมครับ?  \n"));
        assert!(is_question("ทำไมถึงเลือกใช้ Rust？"));
    }

    #[test]
    fn statements_are_not_questions() {
        assert!(!is_question("ขอบคุณมากครับ"));
        assert!(!is_question("What? That is interesting."));
        assert!(!is_question(""));
        assert!(!is_question("   "));
    }
}

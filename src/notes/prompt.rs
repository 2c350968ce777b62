//! Prompt template for note generation.

/// Marker that introduces each section in the model's reply.
pub const SECTION_DELIMITER: &str = "###";
/// Heading of the condensed prose section.
pub const SHORT_NOTES_HEADING: &str = "Short Notes";
/// Heading of the bullet list section.
pub const BULLET_POINTS_HEADING: &str = "Bullet Points";
/// Heading of the exam-oriented recap section.
pub const EXAM_SUMMARY_HEADING: &str = "Exam-Oriented Summary";

/// Embed the cleaned text and the difficulty label into the fixed instruction template.
pub fn build_prompt(text: &str, difficulty: &str) -> String {
    format!(
        r#"
You are an academic notes generator.

Input Text:
"""{text}"""

Difficulty: {difficulty}

Rules:
- No emojis
- No extra information
- Use **bold** for keywords
- Exam-oriented
- Simple language

Output EXACTLY in this format:

{SECTION_DELIMITER} {SHORT_NOTES_HEADING}
...

{SECTION_DELIMITER} {BULLET_POINTS_HEADING}
...

{SECTION_DELIMITER} {EXAM_SUMMARY_HEADING}
...
"#
    )
}

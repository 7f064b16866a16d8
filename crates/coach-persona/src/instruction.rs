// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System instruction assembly for the Completion Service.

use crate::persona::Persona;

/// Build the system instruction for `persona` interviewing for `job_title`.
///
/// The instruction folds in the persona's style, traits, follow-up style and
/// cues, plus the question cap for the whole interview.
pub fn system_instruction(persona: &Persona, job_title: &str, max_questions: u32) -> String {
    let particle = persona.polite_particle();
    let mut sections = Vec::with_capacity(4);

    sections.push(format!(
        "คุณคือ {name} ตำแหน่ง {title} ของบริษัท {company} \
         กำลังสัมภาษณ์ผู้สมัครงานตำแหน่ง {job_title} \
         สไตล์การสัมภาษณ์ของคุณคือ {style}",
        name = persona.name,
        title = persona.title,
        company = persona.company,
        style = persona.style,
    ));

    if !persona.traits.is_empty() {
        let traits: Vec<String> = persona.traits.iter().map(|t| format!("- {t}")).collect();
        sections.push(format!("ลักษณะเฉพาะของคุณ:\n{}", traits.join("\n")));
    }

    if !persona.follow_up_style.is_empty() {
        sections.push(format!("การถามคำถามต่อเนื่อง: {}", persona.follow_up_style));
    }

    if !persona.conversational_cues.is_empty() {
        sections.push(format!(
            "คำตอบรับที่ใช้ได้: {}",
            persona.conversational_cues.join(", ")
        ));
    }

    sections.push(format!(
        "กฎการสนทนา:\n\
         - ตอบเป็นภาษาไทย ลงท้ายด้วย \"{particle}\" อย่างสุภาพ\n\
         - ถามคำถามทีละหนึ่งข้อ และจบข้อความด้วยคำถามที่ลงท้ายด้วยเครื่องหมาย ?\n\
         - ถามคำถามทั้งหมดไม่เกิน {max_questions} ข้อตลอดการสัมภาษณ์\n\
         - คำถามต้องเกี่ยวข้องกับตำแหน่ง {job_title} และคำตอบล่าสุดของผู้สมัคร"
    ));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_personas;

    #[test]
    fn instruction_mentions_persona_job_and_cap() {
        let persona = &builtin_personas()[2];
        let text = system_instruction(persona, "Data Engineer", 7);
        assert!(text.contains(&persona.name));
        assert!(text.contains("Data Engineer"));
        assert!(text.contains("ไม่เกิน 7 ข้อ"));
        assert!(text.contains(&persona.style));
        for t in &persona.traits {
            assert!(text.contains(t.as_str()));
        }
    }

    #[test]
    fn empty_optional_sections_are_omitted() {
        let mut persona = builtin_personas()[0].clone();
        persona.traits.clear();
        persona.follow_up_style.clear();
        persona.conversational_cues.clear();
        let text = system_instruction(&persona, "QA", 10);
        assert!(!text.contains("ลักษณะเฉพาะของคุณ"));
        assert!(!text.contains("การถามคำถามต่อเนื่อง"));
        assert!(!text.contains("คำตอบรับที่ใช้ได้"));
    }
}

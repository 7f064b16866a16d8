// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in interviewer catalog.

use coach_core::{GenderTag, PersonaId};

use crate::persona::Persona;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The personas every registry starts with, in display order.
pub fn builtin_personas() -> Vec<Persona> {
    vec![
        Persona {
            id: PersonaId::from("1"),
            name: "Mr. Michael A.".into(),
            title: "HR Manager".into(),
            company: "Big Company".into(),
            gender: GenderTag::Masculine,
            style: "เป็นกันเอง แต่มืออาชีพ".into(),
            voice: "th-male-1".into(),
            traits: strings(&[
                "ใช้ภาษาที่เป็นมิตร",
                "ชอบแทรกมุขตลกเล็กๆ น้อยๆ",
                "ให้กำลังใจผู้สมัคร",
                "ถามคำถามแบบ open-ended",
                "ชอบขอตัวอย่างจากประสบการณ์จริง",
            ]),
            follow_up_style: "สนใจรายละเอียดเชิงพฤติกรรมและประสบการณ์".into(),
            conversational_cues: strings(&[
                "เยี่ยมมากเลยครับ",
                "โอ้ เรื่องนี้น่าสนใจนะครับ",
                "ฟังดูดีมากเลย",
                "เข้าใจครับ ขอบคุณที่แชร์ประสบการณ์นะครับ",
            ]),
        },
        Persona {
            id: PersonaId::from("2"),
            name: "Ms. Sabrina J.".into(),
            title: "Head of Talent Acquisition".into(),
            company: "Big Company".into(),
            gender: GenderTag::Feminine,
            style: "ตรงไปตรงมา เน้นการวิเคราะห์".into(),
            voice: "th-female-1".into(),
            traits: strings(&[
                "ใช้ภาษาที่กระชับ ชัดเจน",
                "ถามคำถามเชิงเทคนิคเจาะลึก",
                "ต้องการคำตอบที่มีเหตุผล",
                "เน้นการแก้ปัญหาและการตัดสินใจ",
                "ชอบถามถึงตัวเลขและผลลัพธ์ที่วัดได้",
            ]),
            follow_up_style: "เน้นข้อมูลเชิงปริมาณและผลลัพธ์ที่วัดได้".into(),
            conversational_cues: strings(&["เข้าใจค่ะ", "น่าสนใจค่ะ", "ดีค่ะ"]),
        },
        Persona {
            id: PersonaId::from("3"),
            name: "Mr. James J.".into(),
            title: "Senior Engineering Manager".into(),
            company: "Big Company".into(),
            gender: GenderTag::Masculine,
            style: "เชิงเทคนิค แต่ให้คำแนะนำ".into(),
            voice: "th-male-2".into(),
            traits: strings(&[
                "ใช้ภาษาทางเทคนิค",
                "ถามเจาะลึกเรื่องการแก้ปัญหา",
                "ให้คำแนะนำที่เป็นประโยชน์",
                "เน้นการเรียนรู้และการพัฒนา",
                "ชอบแบ่งปันประสบการณ์จริง",
            ]),
            follow_up_style: "เน้นการแลกเปลี่ยนความรู้และประสบการณ์ทางเทคนิค".into(),
            conversational_cues: strings(&[
                "เข้าใจครับ",
                "น่าสนใจครับ",
                "ดีครับ",
                "เยี่ยมครับ",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique_and_ordered() {
        let ids: Vec<String> = builtin_personas().into_iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn cues_agree_with_gender() {
        for persona in builtin_personas() {
            let other = match persona.gender {
                GenderTag::Masculine => "ค่ะ",
                GenderTag::Feminine => "ครับ",
            };
            assert!(
                persona.conversational_cues.iter().all(|c| !c.contains(other)),
                "persona {} has a cue with the wrong particle",
                persona.id
            );
        }
    }
}

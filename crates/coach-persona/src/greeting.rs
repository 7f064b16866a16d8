// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Greeting phrasing for the first interviewer message of a transcript.
//!
//! Greetings are statements, never questions: they end on a polite particle
//! so the question counter never picks them up.

use crate::persona::Persona;

/// Default candidate display name when none is configured.
pub const DEFAULT_CANDIDATE_NAME: &str = "User";

/// Which greeting to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingKind {
    /// First persona of the session. Addresses the candidate by name.
    Opening,
    /// A persona switched in with no history yet.
    Handover,
}

/// Session facts a greeting may mention.
#[derive(Debug, Clone)]
pub struct GreetingContext<'a> {
    pub candidate_name: Option<&'a str>,
    pub job_title: &'a str,
}

impl GreetingContext<'_> {
    fn name(&self) -> &str {
        self.candidate_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_CANDIDATE_NAME)
    }
}

/// Render the greeting for `persona`.
pub fn greeting(persona: &Persona, kind: GreetingKind, ctx: &GreetingContext<'_>) -> String {
    let particle = persona.polite_particle();
    let me = persona.first_person();

    match kind {
        GreetingKind::Opening => format!(
            "สวัสดี{particle} คุณ{name} ขอบคุณที่สละเวลามาสัมภาษณ์กับเรา{particle} \
             {me}ชื่อ {persona_name} เป็น {title} ของบริษัท {company} \
             วันนี้เราจะพูดคุยกันเกี่ยวกับตำแหน่ง {job} \
             ช่วยเล่าเกี่ยวกับประสบการณ์ของคุณให้ฟังหน่อย{particle}",
            name = ctx.name(),
            persona_name = persona.name,
            title = persona.title,
            company = persona.company,
            job = ctx.job_title,
        ),
        GreetingKind::Handover => format!(
            "สวัสดี{particle} {me}ชื่อ {persona_name} เป็น {title} ของบริษัท {company} \
             {me}จะมาสัมภาษณ์ต่อในตำแหน่ง {job} \
             เล่าเกี่ยวกับตัวคุณให้{me}ฟังสั้นๆ ได้เลย{particle}",
            persona_name = persona.name,
            title = persona.title,
            company = persona.company,
            job = ctx.job_title,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_personas;
    use coach_core::GenderTag;

    fn ctx(name: Option<&str>) -> GreetingContext<'_> {
        GreetingContext {
            candidate_name: name,
            job_title: "Backend Engineer",
        }
    }

    #[test]
    fn opening_addresses_candidate_and_job() {
        let persona = &builtin_personas()[0];
        let text = greeting(persona, GreetingKind::Opening, &ctx(Some("Somchai")));
        assert!(text.contains("คุณSomchai"));
        assert!(text.contains("Backend Engineer"));
        assert!(text.contains(&persona.name));
    }

    #[test]
    fn opening_falls_back_to_default_name() {
        let persona = &builtin_personas()[0];
        let text = greeting(persona, GreetingKind::Opening, &ctx(Some("  ")));
        assert!(text.contains("คุณUser"));
        let text = greeting(persona, GreetingKind::Opening, &ctx(None));
        assert!(text.contains("คุณUser"));
    }

    #[test]
    fn greetings_never_end_with_question_mark() {
        for persona in builtin_personas() {
            for kind in [GreetingKind::Opening, GreetingKind::Handover] {
                let text = greeting(&persona, kind, &ctx(None));
                assert!(!text.trim_end().ends_with('?'), "{kind:?} for {}", persona.id);
            }
        }
    }

    #[test]
    fn feminine_persona_uses_feminine_particles() {
        let persona = builtin_personas()
            .into_iter()
            .find(|p| p.gender == GenderTag::Feminine)
            .unwrap();
        let text = greeting(&persona, GreetingKind::Handover, &ctx(None));
        assert!(text.contains("ดิฉัน"));
        assert!(text.ends_with("ค่ะ"));
        assert!(!text.contains("ครับ"));
    }
}

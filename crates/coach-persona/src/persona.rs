// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interviewer persona record.

use coach_config::model::PersonaConfig;
use coach_core::{GenderTag, PersonaId};
use rand::seq::SliceRandom;

/// A virtual interviewer identity with fixed style and voice metadata.
///
/// Personas are registered once and only ever selected by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub id: PersonaId,
    pub name: String,
    pub title: String,
    pub company: String,
    pub gender: GenderTag,
    pub style: String,
    pub voice: String,
    pub traits: Vec<String>,
    pub follow_up_style: String,
    pub conversational_cues: Vec<String>,
}

impl Persona {
    /// Polite sentence-final particle matching the persona's gender.
    pub fn polite_particle(&self) -> &'static str {
        match self.gender {
            GenderTag::Masculine => "ครับ",
            GenderTag::Feminine => "ค่ะ",
        }
    }

    /// First-person pronoun matching the persona's gender.
    pub fn first_person(&self) -> &'static str {
        match self.gender {
            GenderTag::Masculine => "ผม",
            GenderTag::Feminine => "ดิฉัน",
        }
    }

    /// Picks one conversational cue at random, if the persona has any.
    pub fn random_cue(&self) -> Option<&str> {
        self.conversational_cues
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }
}

impl From<&PersonaConfig> for Persona {
    fn from(config: &PersonaConfig) -> Self {
        Self {
            id: PersonaId(config.id.clone()),
            name: config.name.clone(),
            title: config.title.clone(),
            company: config.company.clone(),
            gender: config.gender,
            style: config.style.clone(),
            voice: config.voice.clone(),
            traits: config.traits.clone(),
            follow_up_style: config.follow_up_style.clone(),
            conversational_cues: config.conversational_cues.clone(),
        }
    }
}

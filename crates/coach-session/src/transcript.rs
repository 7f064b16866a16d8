// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-persona, append-only message history.

use std::collections::HashMap;

use coach_core::{Message, PersonaId};

/// In-memory transcripts keyed by persona.
///
/// The store never reorders, deduplicates or inspects messages. Insertion
/// order is the conversation order replayed to the Completion Service.
#[derive(Debug, Default, Clone)]
pub struct TranscriptStore {
    transcripts: HashMap<PersonaId, Vec<Message>>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to the persona's transcript, creating it if absent.
    pub fn append(&mut self, persona: &PersonaId, message: Message) {
        self.transcripts
            .entry(persona.clone())
            .or_default()
            .push(message);
    }

    /// Current messages for `persona`; empty when it has no history.
    pub fn get(&self, persona: &PersonaId) -> &[Message] {
        self.transcripts
            .get(persona)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `persona` has a transcript, even an empty one.
    pub fn contains(&self, persona: &PersonaId) -> bool {
        self.transcripts.contains_key(persona)
    }

    pub fn len(&self, persona: &PersonaId) -> usize {
        self.get(persona).len()
    }

    pub fn last(&self, persona: &PersonaId) -> Option<&Message> {
        self.get(persona).last()
    }

    /// Drop every message of `persona`, returning what was removed.
    pub fn clear(&mut self, persona: &PersonaId) -> Vec<Message> {
        self.transcripts
            .get_mut(persona)
            .map(std::mem::take)
            .unwrap_or_default()
    }
}

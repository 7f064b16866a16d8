// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered registry of interviewer personas.

use std::collections::HashMap;

use coach_config::model::PersonaConfig;
use coach_core::{CoachError, PersonaId};
use tracing::debug;

use crate::catalog::builtin_personas;
use crate::persona::Persona;

/// Registry of personas keyed by id, preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
    index: HashMap<PersonaId, usize>,
}

impl PersonaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only the built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for persona in builtin_personas() {
            // Built-in ids are distinct.
            let _ = registry.register(persona);
        }
        registry
    }

    /// Built-ins followed by configured personas, in configuration order.
    pub fn from_config(configs: &[PersonaConfig]) -> Result<Self, CoachError> {
        let mut registry = Self::builtin();
        for config in configs {
            registry.register(Persona::from(config))?;
        }
        debug!(count = registry.len(), "persona registry built");
        Ok(registry)
    }

    /// Add a persona. Ids must be unique.
    pub fn register(&mut self, persona: Persona) -> Result<(), CoachError> {
        if self.index.contains_key(&persona.id) {
            return Err(CoachError::Config(format!(
                "duplicate persona id `{}`",
                persona.id
            )));
        }
        self.index.insert(persona.id.clone(), self.personas.len());
        self.personas.push(persona);
        Ok(())
    }

    /// Look up a persona by id.
    pub fn lookup(&self, id: &PersonaId) -> Result<&Persona, CoachError> {
        self.index
            .get(id)
            .map(|&i| &self.personas[i])
            .ok_or_else(|| CoachError::PersonaNotFound { id: id.to_string() })
    }

    /// All personas in registration order.
    pub fn list(&self) -> &[Persona] {
        &self.personas
    }

    pub fn contains(&self, id: &PersonaId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `coach personas` command implementation.

use coach_config::CoachConfig;
use coach_core::CoachError;
use coach_persona::Persona;
use colored::Colorize;

use crate::adapters::build_registry;

/// Print every persona in registry order.
pub fn run_personas(config: &CoachConfig) -> Result<(), CoachError> {
    let registry = build_registry(config)?;
    for persona in registry.list() {
        println!("{}", format_persona(persona));
    }
    Ok(())
}

/// One listing line: `[id] Name, Title @ Company (style)`.
pub fn format_persona(persona: &Persona) -> String {
    format!(
        "[{}] {}, {} @ {} ({})",
        persona.id.as_str().bold(),
        persona.name,
        persona.title,
        persona.company,
        persona.style.dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_persona::PersonaRegistry;

    #[test]
    fn listing_mentions_name_and_title() {
        colored::control::set_override(false);
        let registry = PersonaRegistry::builtin();
        let line = format_persona(&registry.list()[0]);
        assert!(line.starts_with("[1] Mr. Michael A., HR Manager @ Big Company"));
    }
}

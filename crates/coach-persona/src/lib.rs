// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona registry for the Coach interview engine.
//!
//! Holds the built-in interviewer catalog plus any personas defined in
//! configuration, and renders the persona-specific text the session needs:
//! greetings and the system instruction sent with every completion.

pub mod catalog;
pub mod greeting;
pub mod instruction;
pub mod persona;
pub mod registry;

pub use greeting::{greeting, GreetingContext, GreetingKind, DEFAULT_CANDIDATE_NAME};
pub use instruction::system_instruction;
pub use persona::Persona;
pub use registry::PersonaRegistry;

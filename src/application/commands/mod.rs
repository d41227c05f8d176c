// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between a surface (CLI) and Services
// - Commands accept DTOs, return DTOs
// - Commands return AppResult; surfaces map errors via ErrorResponse
// - Commands NEVER contain business logic

pub mod plan_commands;
pub mod session_commands;

#[cfg(test)]
mod commands_tests;

pub use plan_commands::*;
pub use session_commands::*;

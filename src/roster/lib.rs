//! # Roster Architecture
//!
//! Roster manages a small membership roster: a list of members, a form to
//! edit one of them, and a document collection that stores them. It is a
//! **UI-agnostic library** with a terminal client on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, asks for confirmation  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session: store, list view, form view-model      │
//! │  - Executes effects, reloads after writes                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure (FormState, input) -> Transition functions          │
//! │  - Validation lives one level down, in validation.rs        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - MemberStore trait                                        │
//! │  - JsonStore (file://), InMemoryStore (memory://)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values. It
//! never prints, never prompts and never exits. Deleting a member is a two
//! step exchange: the API hands back a [`commands::DeleteRequest`] and the UI
//! answers it.
//!
//! ## Module Overview
//!
//! - [`api`]: the session facade, entry point for all operations
//! - [`commands`]: one pure function per form action
//! - [`form`]: the form view-model
//! - [`view`]: the list view and its selection
//! - [`validation`]: field checks
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: `Member`, `MemberFields`, `MemberId`
//! - [`index`]: row selectors (row number or id)
//! - [`config`]: configuration file
//! - [`init`]: directory resolution and session bootstrap
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod index;
pub mod init;
pub mod model;
pub mod store;
pub mod validation;
pub mod view;

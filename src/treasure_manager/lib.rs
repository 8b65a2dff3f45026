//! # Treasure Manager Architecture
//!
//! Treasure Manager keeps "treasure hunts": named collections of
//! location-tagged clue records. It is a library that happens to have a CLI
//! client, and each CLI invocation runs exactly one operation against the data
//! on disk before exiting.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts for fields, prints results     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, carries configuration         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add / list / view, each logged exactly once              │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Storage (store/)            │ │  Activity (activity/)      │
//! │  - RecordStore binary codec  │ │  - per-hunt log appends    │
//! │  - HuntRepository lifecycle  │ │  - combined log merge      │
//! │  - Fs / Mem backends         │ │                            │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Operation Sequence
//!
//! provision → lock → load → mutate → save → unlock, then one locked log
//! append and a merge of all hunt logs.
//!
//! Library code returns typed errors ([`error::TreasureError`]) and never
//! exits the process. Domain failures that are part of normal use (a full
//! hunt, an unknown treasure id) come back as a failed [`api::CmdResult`]
//! so they can still be logged.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Logic for each command
//! - [`store`]: Record format, paths, backends, repository
//! - [`activity`]: Activity logs and the combined log
//! - [`model`]: Core data types (`Treasure`, `LogEntry`, `Operation`)
//! - [`config`]: Configuration management
//! - [`init`]: Filesystem context setup
//! - [`error`]: Error types

pub mod activity;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;

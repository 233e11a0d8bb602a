//! Terminal workspace for an external tableau solver: compose a problem,
//! send it to the engine, and browse the proof tree, modality graph,
//! countermodel and execution log it answers with.

pub mod config;
pub mod engine;
pub mod error;
pub mod headless;
pub mod logic;
pub mod state;
pub mod tui;
pub mod view_model;

//! Zudio - terminal kanban client library.

pub mod app;
pub mod backend;
pub mod board;
pub mod config;
pub mod remote;
pub mod session;
pub mod tasks;
pub mod ui;

//! Projector Planner
//!
//! Projector selection and projection geometry for projection mapping:
//! - Static brand / projector / lens catalog
//! - Brand → projector → lens selection cascade
//! - Throw-ratio projected size and the LW / L / PS / Lux calculator
//! - JSON and XML session files
//! - egui panel

pub mod app;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod panel;
pub mod selection;
pub mod ui;

//! egui rendering: toolbar and controls, report sections, plots.

pub mod panels;
pub mod plot;
pub mod sections;

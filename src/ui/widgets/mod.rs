// src/ui/widgets/mod.rs

pub mod disclaimer_popup; // Shown once at startup.
pub mod footer;
pub mod input;
pub mod results; // The probe table.
pub mod summary;

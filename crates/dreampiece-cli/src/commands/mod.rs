pub mod cgpa;
pub mod config;
pub mod dashboard;
pub mod exam;
pub mod game;
pub mod habit;
pub mod quote;
pub mod tab;
pub mod theme;
pub mod timer;

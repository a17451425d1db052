pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod screen;
pub mod session;
pub mod startup;

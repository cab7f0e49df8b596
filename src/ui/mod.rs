//! UI Module - egui integration and AppController
//!
//! The interface between the console core and the egui frontend. The update
//! loop is the single consumer thread: it drains the event channel and the
//! output subscription, and is the only mutator of the session transcript
//! and the telemetry window.

pub mod admins;
pub mod app;
pub mod console;
pub mod controller;
pub mod dashboard;
pub mod maps;
pub mod settings;
pub mod webhooks;
pub mod widgets;

pub use app::{AppUI, Tab, UIState};
pub use controller::{AppController, ConsoleEvent};

//! mentor-app - Application state and orchestration for Code Mentor
//!
//! This crate implements the TEA (The Elm Architecture) pattern: [`AppState`]
//! is the model, [`Message`] the events, [`handler::update`] the pure
//! transition function and [`UpdateAction`] the side effects, which
//! [`actions::handle_action`] runs as background tasks.
//!
//! The three independent state machines are:
//! - [`request::RequestState`] - loading/error/result of the analysis request
//! - [`accordion::AccordionState`] - which result section is expanded
//! - [`diagram::DiagramRenderState`] - asynchronous diagram rendering

pub mod accordion;
pub mod actions;
pub mod config;
pub mod diagram;
pub mod engine;
pub mod export;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod request;
pub mod signals;
pub mod state;

// Re-export primary types
pub use accordion::{AccordionState, SectionKey};
pub use actions::Services;
pub use config::Settings;
pub use diagram::{DiagramRenderState, RenderJob};
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use request::RequestState;
pub use state::{AppPhase, AppState, InputFields, Notice, UiMode};

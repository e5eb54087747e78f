//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod band;
pub mod event;
pub mod media;
pub mod member;
pub mod user;

pub use band::*;
pub use event::*;
pub use media::*;
pub use member::*;
pub use user::*;

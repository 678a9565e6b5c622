//! promptkeep-relay
//!
//! The background side: owns the "save selection" context-menu entry and
//! acknowledges notifications sent by other contexts.

pub mod error;
pub mod menu;
pub mod messages;

pub use crate::error::RelayError;
pub use crate::menu::{
    InstallReason, MenuClick, MenuContext, MenuItem, MenuRegistry, on_installed, on_menu_clicked,
    site_of,
};
pub use crate::messages::{Ack, Relay, RelayMessage};

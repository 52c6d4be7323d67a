//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Header, footer and the loading spinner
//! - `modals`: Add/edit form, save prompt and notifications
//! - `panels`: Definitions list and the details panel (help, request, response)
//! - `styling`: Color schemes and style constants

mod components;
mod modals;
mod panels;
mod styling;

pub use components::{render_footer, render_header};
pub use modals::{render_form_modal, render_notification_modal, render_save_modal};
pub use panels::{render_definitions_panel, render_details_panel};
pub use styling::SPINNER;

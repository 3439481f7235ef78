//! Form rendering module
//!
//! - `field_renderer`: per-field lines
//! - `submit_form`: the sectioned submission form
//! - `success`: confirmation after a successful submission

mod field_renderer;
mod submit_form;
mod success;

pub use submit_form::draw_submit_form;
#[cfg(test)]
pub use submit_form::ERROR_BANNER;
pub use success::draw_success;

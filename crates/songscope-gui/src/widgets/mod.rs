//! Custom widgets for the dashboard controls.

mod mode_toggle;
mod range_slider;
pub use mode_toggle::ModeToggle;
pub use range_slider::{RangeSlider, Thumb, move_thumb, nearest_thumb};

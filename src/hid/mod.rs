//! HID keyboard reports, keycodes and the German layout table.

pub mod keyboard;
pub mod keycodes;
pub mod layout;
pub mod report_protocol;

#[cfg(test)]
mod tests;

pub use keyboard::KeyboardReport;
pub use layout::{translate, KeyStroke, RuleKind};
pub use report_protocol::{ProtocolMode, ReportChannel};

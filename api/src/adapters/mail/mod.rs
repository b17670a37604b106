//! Outbound mail adapters

pub mod smtp;
pub mod templates;

pub use smtp::{SmtpConfig, SmtpMailTransport};
pub use templates::FileTemplateStore;

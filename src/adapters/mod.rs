// Adapters layer: concrete EmailSender implementations for external systems.

pub mod console;
pub mod resend;

pub use console::ConsoleSender;
pub use resend::ResendClient;

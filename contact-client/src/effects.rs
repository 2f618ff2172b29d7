use anyhow::Result;

/// Fired once per successful submission. Purely decorative: the controller
/// logs a failed hook and moves on, the submission outcome never changes.
pub trait Celebration: Send + Sync {
    fn fire(&self) -> Result<()>;
}

/// Default hook for headless use.
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn fire(&self) -> Result<()> {
        Ok(())
    }
}

/// Whatever clipboard the embedding surface provides.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Deep link handing the conversation off to the visitor's own mail client.
/// The no-JS fallback next to the form points at the same address.
pub fn mailto_href(address: &str) -> String {
    format!("mailto:{address}")
}

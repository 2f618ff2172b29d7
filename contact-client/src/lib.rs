//! # Contact Client
//!
//! Client side of the contact submission pipeline.
//!
//! ## Flow
//!
//! - Visitor fills name, email, optional subject, message
//! - Hidden honeypot field stays empty for humans; any value means a bot
//! - Submit validates locally first, so spam and missing fields never
//!   produce network traffic
//! - A passing submission goes to the forwarding proxy as JSON, the reply
//!   drives the status shown next to the form
//! - Success clears the form and reverts to idle after a fixed display
//!   window; errors stay up until the next attempt
//!
//! ## Status
//!
//! `Idle -> Loading -> Success | Error -> Idle`
//!
//! Loading disables re-submission. The success display window and the
//! "copied" confirmation are the only timers, both cancelled when a new
//! attempt starts or the controller is dropped. In-flight requests are
//! never cancelled; losing interest in the result is enough.
//!
//! ## Fallbacks
//!
//! Visitors who prefer their own mail client get a `mailto:` deep link and
//! a copy-address button. Both are best-effort and never affect the
//! submission state.

pub mod controller;
pub mod effects;
pub mod upstream;

pub use controller::{Status, SubmissionResult, SubmitController, COPIED_DISPLAY, SUCCESS_DISPLAY};
pub use effects::{mailto_href, Celebration, Clipboard, NoCelebration};
pub use upstream::{HttpUpstream, Upstream, UpstreamError};

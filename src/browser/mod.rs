pub mod cdp;
pub mod launcher;
pub mod session;

pub use cdp::CdpEngine;
pub use session::BrowserSession;

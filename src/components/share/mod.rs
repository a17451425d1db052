pub mod composer;
mod dispatcher;

pub use dispatcher::{app_url, web_url, DispatchOutcome, Dispatcher, LinkOpener, SystemOpener};

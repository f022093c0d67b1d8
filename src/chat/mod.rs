mod dispatcher;
mod sessions;

pub use dispatcher::{ChatDispatcher, FALLBACK_ERROR_REPLY, UNCONFIGURED_BACKEND_REPLY};
pub use sessions::SessionStore;

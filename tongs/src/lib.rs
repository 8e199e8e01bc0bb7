pub mod cli;
pub mod config;
pub mod dom;
pub mod domain;
pub mod error;
pub mod html;
pub mod script;
pub mod token;
pub mod transport;
pub mod updater;

pub use config::TongsConfig;
pub use dom::{ChangeEvent, Document, Page, SelectControl, SelectElement};
pub use domain::{SelectOption, SubtypeRequest, TransportMode};
pub use error::{TransportError, UpdateError};
pub use token::{CookieToken, StaticToken, TokenProvider};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use updater::{DependentSelect, UpdateOutcome, UpdaterState};

pub mod campaign;
pub mod config;
pub mod error;
pub mod language;
pub mod logging;
pub mod mailer;
pub mod models;
pub mod source;
pub mod stats;
pub mod templates;
pub mod tracker;

pub use campaign::{CampaignDriver, RunSummary};
pub use error::{CampaignError, CampaignResult};
pub use tracker::ContactStore;

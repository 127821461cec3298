mod greeting;
mod health;
mod metrics;
mod names;
mod upload;

pub use greeting::greeting_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use names::{get_name_handler, list_names_handler};
pub use upload::upload_handler;

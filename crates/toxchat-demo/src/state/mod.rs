mod app_state;
mod event_bus;
mod metrics_collector;

pub use app_state::{build_loader, ChatAppState};
pub use event_bus::EventBus;
pub use metrics_collector::MetricsCollector;

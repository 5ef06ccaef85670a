mod gracefulshutdown;
mod header;
mod logs;
mod metrics;
mod otel;

pub use self::gracefulshutdown::shutdown_signal;
pub use self::header::HeaderInjector;
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::otel::{Telemetry, TracingContext};

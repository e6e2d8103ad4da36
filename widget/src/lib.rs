//! Ratewatch Widget
//!
//! A single-screen USD/INR converter. The widget keeps the user's amount,
//! the conversion direction and the last fetched rate, and recomputes the
//! converted amount after every change. A background scheduler refreshes
//! the rate when the widget is mounted and every five minutes after that.

pub mod app;
pub mod command;
pub mod config;
pub mod scheduler;
pub mod state;
pub mod view;
pub mod widget;

pub use app::ConverterApp;
pub use config::WidgetConfig;
pub use scheduler::RefreshScheduler;
pub use state::ConversionState;
pub use widget::ConverterWidget;

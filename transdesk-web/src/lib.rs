pub mod api;
pub mod components;
pub mod config;
pub mod interop;
pub mod shell;
pub mod storage;
pub mod toast;

pub use api::HttpApi;
pub use components::*;
pub use config::client_config;
pub use shell::{AppShell, Page};
pub use storage::BrowserSessionStore;
pub use toast::{push_toast, report_error, use_toasts, Toast, ToastHost, ToastKind};

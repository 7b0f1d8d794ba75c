//! Clinic Map ネイティブ実行環境
//!
//! データ取得（reqwest）・遅延実行（tokio）・記録ビューで
//! ダッシュボードの動作をブラウザ無しで再現する。

pub mod config;
pub mod error;
pub mod headless;
pub mod loader;
pub mod scheduler;
pub mod session;

pub use config::Config;
pub use error::{ClinicMapError, Result};
pub use headless::ViewCommand;
pub use loader::{fetch_text, load_sources, LoadedSources};
pub use scheduler::TokioScheduler;
pub use session::Session;

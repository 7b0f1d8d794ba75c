//! Clinic Map Common Library
//!
//! ネイティブ版とWeb(WASM)版で共有するデータ処理と選択連動

pub mod types;
pub mod error;
pub mod parser;
pub mod normalizer;
pub mod filter;
pub mod config;
pub mod route;
pub mod selection;
pub mod state;
pub mod detail;
pub mod summary;

pub use types::{BoundaryCollection, ClinicRecord, DistrictBoundary, LatLon, RawRow};
pub use error::{Error, Result};
pub use parser::{parse_boundaries, parse_clinic_csv};
pub use normalizer::{normalize, normalize_with_stats, NormalizationStats};
pub use filter::{filter_clinics, FilterCriteria};
pub use config::DashboardConfig;
pub use route::Route;
pub use selection::{
    ListSurface, MapSurface, Navigator, Scheduler, ScrollGeometry, SelectionCoordinator,
    SelectionTiming, TimerHandle,
};
pub use state::{DashboardState, LoadFailure, LoadStatus};
pub use detail::{ClinicDetail, Tone};

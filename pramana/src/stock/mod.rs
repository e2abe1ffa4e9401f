//! Stock computation and aggregation.
//!
//! ```text
//! SectionCurve x2 ──► compute_stock ──► StockVector
//!                          │
//!          ┌───────────────┼──────────────────┐
//!          ▼               ▼                  ▼
//!     area_stock     control_stock      special_stock
//!   (6 zones/side)  (per control sec)  (3 zones, anomaly-aware)
//! ```

mod calculator;
mod control;
mod executor;
mod special;
mod zones;

pub use calculator::{StockParams, compute_stock};
pub use control::{ControlStock, control_stock};
pub use executor::ExecutionMode;
pub use special::{SpecialRegionParams, SpecialStock, special_stock};
pub use zones::{
    AreaStock, Band, EdgeRegion, Zone, ZoneMeans, ZoneStock, aggregate_zones, area_stock,
    area_stock_pair, zone_stock,
};

//! # barrio-floor: Shared Floor State
//!
//! Owns the live table collection for a single venue and hands each screen
//! the read model it needs. Every rule lives in `barrio-core`; this crate
//! serializes access, counts revisions and tells subscribers what changed.
//!
//! ## Module Organization
//! ```text
//! barrio_floor/
//! ├── lib.rs          ◄─── You are here (exports & logging setup)
//! ├── state.rs        ◄─── FloorState: Arc<Mutex<TableStore>> + events
//! ├── views.rs        ◄─── FloorView / KitchenView / AdminView
//! ├── config.rs       ◄─── FloorConfig (floor.toml + BARRIO_* env)
//! ├── error.rs        ◄─── FloorError and the screen-facing ApiError
//! └── bin/demo.rs     ◄─── floor-demo
//! ```
//!
//! ## One State, Three Screens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │   Floor screen   │ │  Kitchen screen  │ │    Admin screen      │   │
//! │  │  • 5 commands    │ │  • mark ready    │ │  • read only         │   │
//! │  └────────┬─────────┘ └────────┬─────────┘ └──────────┬───────────┘   │
//! │           │ clone              │ clone                │ clone         │
//! │           ▼                    ▼                      ▼               │
//! │  ┌──────────────────────────────────────────────────────────────────┐ │
//! │  │  FloorState ──► broadcast FloorEvent { table_id, effect, rev }   │ │
//! │  └──────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod state;
pub mod views;

pub use config::FloorConfig;
pub use error::{ApiError, ErrorCode, FloorError, FloorResult};
pub use state::{FloorEvent, FloorState, Role};
pub use views::{AdminView, FloorView, KitchenView};

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,barrio=debug";

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Every table transition
/// - `RUST_LOG=info` - Startup and seeding only
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

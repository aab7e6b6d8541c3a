// ambilight-api: Async Rust client for the ambilight control bridge
//
// Every logical backend operation is tunnelled through a single POST
// endpoint. `BridgeClient` owns that tunnel; the typed accessors in
// `resources` build on it.

pub mod bridge;
pub mod error;
pub mod models;
pub mod resources;
pub mod transport;

pub use bridge::{BridgeClient, BridgeMethod, DEFAULT_BRIDGE_PATH};
pub use error::Error;
pub use models::{
    ANALYSIS_HZ, Configuration, Diagnostics, Display, Preset, SyncCommand, SyncStatus, Zone,
};
pub use transport::{TlsMode, TransportConfig};

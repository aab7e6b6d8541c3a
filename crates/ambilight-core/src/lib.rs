//! Client-side state synchronization for the ambilight control bridge.
//!
//! The backend owns every piece of state: the live configuration, the
//! display list, the preset store and the sync engine. This crate keeps a
//! set of named input fields consistent with it:
//!
//! - **[`Session`]** — Orchestrates startup (preview source, displays,
//!   configuration, one diagnostics read, then the poller) and runs the
//!   operator's [`Action`]s against the bridge, either awaited
//!   ([`Session::handle`]) or fire-and-forget ([`Session::dispatch`]).
//!
//! - **[`FieldStore`]** — The injected mapping from [`FieldId`] to a
//!   readable and writable location. [`FormState`] is the in-memory one;
//!   front ends supply their own rendering surface.
//!
//! - **[`binder`]** — Pure hydrate/collect functions between wire types
//!   and field values.
//!
//! - **[`Poller`]** — Stoppable periodic task used for the one-second
//!   diagnostics refresh.

pub mod config;
pub mod error;
pub mod poller;
pub mod session;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{SessionConfig, TlsVerification};
pub use error::CoreError;
pub use poller::{DIAGNOSTICS_INTERVAL, Poller};
pub use session::{Action, Session};
pub use view::{DisplayOption, FieldId, FieldStore, FormState, binder};

// Wire types consumers need alongside the session.
pub use ambilight_api::{
    ANALYSIS_HZ, BridgeClient, Configuration, Diagnostics, Display, Preset, SyncCommand,
    SyncStatus, Zone,
};

//! Bridges to external runtimes. Observability only: nothing here changes
//! execution semantics.

pub mod tracker;

pub use tracker::{
    BridgeError, NodeAction, TrackedApp, TrackerBridge, TrackerConfig, TrackingRuntime,
    Transition, Trigger,
};

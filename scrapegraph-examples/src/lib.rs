//! Runnable demos live under `examples/`; this crate carries no library code.

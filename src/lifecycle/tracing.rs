//! Observability setup for the actor system.
//!
//! Structured logging via the `tracing` crate: actors log lifecycle events
//! and every store operation with structured fields (`entity_type`, ids,
//! sizes), and client methods are wrapped in `#[instrument]` spans so a
//! request's path through the system reads hierarchically.
//!
//! Log levels are configured through `RUST_LOG`:
//!
//! ```bash
//! # Compact operational logs
//! RUST_LOG=info cargo test
//!
//! # Full request payloads at function entry
//! RUST_LOG=debug cargo test
//!
//! # Only the commerce actor
//! RUST_LOG=little_lemon::commerce_actor=debug cargo test
//! ```
//!
//! The compact format hides module paths (`with_target(false)`); the
//! structured `entity_type` field identifies the actor instead.

/// Initializes the global tracing subscriber. Call once at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

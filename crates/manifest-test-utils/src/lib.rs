//! Shared test utilities for the manifest-bridge workspace.
//!
//! This crate provides standardised configuration trees and proptest
//! strategies so emitter suites don't each hand-roll them. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: realistic resource trees (service, listener, deployment)
//! - [`strategy`]: proptest strategies generating arbitrary trees

pub mod fixtures;
pub mod strategy;

//! Hooks for security-relevant conversion events.

use crate::error::ConvertError;
use std::time::Duration;
use tracing::{info, warn};

/// Log target for every event emitted by [`TracingObserver`].
pub const SECURITY_TARGET: &str = "celsql::security";

/// Receives security events from a converter. Implementations are shared
/// across threads, so they must be `Send + Sync`. Every hook defaults to a
/// no-op.
pub trait SecurityObserver: Send + Sync {
    /// Called once per conversion, successful or not.
    fn conversion_attempt(
        &self,
        _source: &str,
        _outcome: Result<(), &ConvertError>,
        _duration: Duration,
    ) {
    }

    /// Called when depth or length passes half of its limit.
    fn complex_expression(&self, _source: &str, _depth: usize, _length: usize) {}

    /// Called before an authorization failure is returned.
    fn unauthorized_field(&self, _source: &str, _field: &str, _roles: &[String]) {}

    /// Called when the expression uses a function outside the supported set.
    fn unsupported_operation(&self, _source: &str, _function: &str) {}
}

/// Emits every hook as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SecurityObserver for TracingObserver {
    fn conversion_attempt(
        &self,
        source: &str,
        outcome: Result<(), &ConvertError>,
        duration: Duration,
    ) {
        let duration_us = duration.as_micros() as u64;
        match outcome {
            Ok(()) => info!(
                target: SECURITY_TARGET,
                expression = source,
                duration_us,
                "filter conversion succeeded"
            ),
            Err(err) => warn!(
                target: SECURITY_TARGET,
                expression = source,
                code = err.code().map(|c| c.as_str()).unwrap_or("INTERNAL"),
                duration_us,
                "filter conversion failed"
            ),
        }
    }

    fn complex_expression(&self, source: &str, depth: usize, length: usize) {
        warn!(
            target: SECURITY_TARGET,
            expression = source,
            depth,
            length,
            "complex filter expression"
        );
    }

    fn unauthorized_field(&self, source: &str, field: &str, roles: &[String]) {
        warn!(
            target: SECURITY_TARGET,
            expression = source,
            field,
            roles = ?roles,
            "unauthorized filter field"
        );
    }

    fn unsupported_operation(&self, source: &str, function: &str) {
        warn!(
            target: SECURITY_TARGET,
            expression = source,
            function,
            "unsupported filter operation"
        );
    }
}

//! Acceptance rules for candidate deployments
//!
//! The field rules (`id`, `replicas`, `image`, `ports`) are all evaluated and
//! reported together. The port range rule only runs once those pass, and stops
//! at the first offending port.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::{Deployment, Field};

/// Highest valid port number, inclusive
pub const MAX_PORT: i64 = 65535;

static IMAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("image pattern is valid"));

/// Reasons a candidate deployment is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field is missing")]
    MissingFields(Vec<Field>),

    #[error("Port number must be between 1 and 65535")]
    PortOutOfRange { index: usize, number: i64 },
}

/// Validate a decoded candidate before it reaches storage
pub fn validate(candidate: &Deployment) -> Result<(), ValidationError> {
    let failed = failed_fields(candidate);
    if !failed.is_empty() {
        return Err(ValidationError::MissingFields(failed));
    }

    for (index, port) in candidate.ports.iter().enumerate() {
        if !(1..=MAX_PORT).contains(&port.number) {
            return Err(ValidationError::PortOutOfRange {
                index,
                number: port.number,
            });
        }
    }

    Ok(())
}

fn failed_fields(candidate: &Deployment) -> Vec<Field> {
    let mut failed = Vec::new();

    if candidate.id.is_nil() {
        failed.push(Field::Id);
    }
    if candidate.replicas < 1 {
        failed.push(Field::Replicas);
    }
    if !IMAGE_PATTERN.is_match(&candidate.image) {
        failed.push(Field::Image);
    }
    if candidate.ports.is_empty() {
        failed.push(Field::Ports);
    }

    failed
}

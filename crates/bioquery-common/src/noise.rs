//! Filter for browser-extension messaging noise.
//!
//! Certain client-side failures originate in extension messaging layers
//! rather than the application. They are recognized by a fixed set of
//! message/stack substrings and downgraded instead of surfaced as
//! application failures. The filter is an explicit value handed to the
//! error boundary, not ambient process state.

const NOISE_PATTERNS: &[&str] = &[
    "tx_attempts_exceeded",
    "tx_ack_timeout",
    "Failed to initialize messaging",
    "chrome-extension://",
    "injected-scripts/host-console-events.js",
];

#[derive(Debug, Clone)]
pub struct NoiseFilter {
    patterns: Vec<String>,
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self {
            patterns: NOISE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl NoiseFilter {
    pub fn new(patterns: impl IntoIterator<Item = String>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    /// True when the message or its detail text matches any known
    /// messaging-noise pattern.
    pub fn is_noise(&self, message: &str, detail: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| message.contains(p.as_str()) || detail.contains(p.as_str()))
    }
}

//! Formula 1 session results from raw timing data.
//!
//! Paddock turns the unordered, per-timestamp samples published by a timing
//! provider (positions, laps, intervals, official results) into ranked
//! classifications for races, sprints, qualifying and practice.
//!
//! # Features
//!
//! - **Session selection**: most recent completed session of a kind, or the preferred kind
//! - **Classification**: positions, points, total times, gaps, fastest laps and gaps to pole
//! - **Graceful degradation**: missing lap or interval data degrades to partial results
//! - **Never-crash API**: placeholder data flagged `synthetic` when nothing can be resolved
//! - **Providers**: the public OpenF1 API, or recorded responses for offline use
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paddock::{Paddock, SessionKind};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> paddock::Result<()> {
//!     let resolver = Paddock::openf1()?;
//!
//!     let race = resolver.latest(Some(SessionKind::Race)).await;
//!     println!("{} ({})", race.name, race.location);
//!     for entry in &race.entries {
//!         println!("{:>2} {:<20} {:<18} {}", entry.position, entry.driver, entry.team, entry.time);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Synchronous callers use [`blocking`]:
//!
//! ```rust,no_run
//! use paddock::{Paddock, blocking};
//!
//! let resolver = Paddock::openf1()?;
//! for session in blocking::practice_results(&resolver, None) {
//!     println!("{}: {} classified", session.name, session.len());
//! }
//! # Ok::<(), paddock::ResultsError>(())
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Data sources
pub mod provider;
pub mod providers;

// Resolution pipeline
pub mod aggregate;
pub mod blocking;
pub mod classify;
pub mod config;
pub mod resolver;
pub mod selector;
pub mod timing;

// Core exports
pub use error::*;
pub use types::*;

// Main API exports
pub use config::{MissingDriverPolicy, ResolverConfig, SelectionPolicy};
pub use provider::{Collection, Provider};
pub use providers::{MemoryProvider, OpenF1Provider};
pub use resolver::ResultsResolver;

/// Unified entry point for building resolvers.
///
/// # Examples
///
/// ## OpenF1
/// ```rust,no_run
/// use paddock::Paddock;
///
/// let resolver = Paddock::openf1()?;
/// # Ok::<(), paddock::ResultsError>(())
/// ```
///
/// ## Recorded responses
/// ```rust,no_run
/// use paddock::{Paddock, ResolverConfig};
///
/// let resolver = Paddock::recorded("test-data/openf1", ResolverConfig::default())?;
/// # Ok::<(), paddock::ResultsError>(())
/// ```
pub struct Paddock;

impl Paddock {
    /// Resolver against the public OpenF1 API with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn openf1() -> Result<ResultsResolver<OpenF1Provider>> {
        Self::with_config(ResolverConfig::default())
    }

    /// Resolver against OpenF1 using `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - The HTTP client cannot be built
    pub fn with_config(config: ResolverConfig) -> Result<ResultsResolver<OpenF1Provider>> {
        config.validate()?;
        let provider = OpenF1Provider::with_config(&config.openf1)?;
        Ok(ResultsResolver::new(provider, config))
    }

    /// Resolver over a directory of recorded OpenF1 responses.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - A recorded file cannot be read or parsed
    pub fn recorded<P: AsRef<std::path::Path>>(
        dir: P,
        config: ResolverConfig,
    ) -> Result<ResultsResolver<MemoryProvider>> {
        config.validate()?;
        let provider = MemoryProvider::from_dir(dir)?;
        Ok(ResultsResolver::new(provider, config))
    }
}

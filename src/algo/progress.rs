//! Step progress reporting for long-running synthesis runs.
//!
//! This module provides a simple progress callback that the pipeline and the
//! seam controller use to report how many steps have completed. It carries
//! counts and a message only; texture snapshots go through
//! [`super::snapshot`] instead.
//!
//! # Example
//!
//! ```
//! use seamweave::algo::Progress;
//!
//! let progress = Progress::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! });
//! progress.report(1, 4, "making edge seamless");
//! ```

/// Step counter callback for a synthesis run.
///
/// Called as `(steps done, steps in this stage, stage name)`. Counts restart
/// with every stage, and a change of stage name marks the boundary:
///
/// | Stage | Name | Reports |
/// |-------|------|---------|
/// | Fill | `"Filling UV islands"` | `(1, 1)` once the engine returns |
/// | Seams | `"Making edges seamless"` | `(i + 1, edges)` after edge `i` |
///
/// A seam run stopped by its iteration cap never reaches `(edges, edges)`.
/// Nothing is reported for a stage that fails or is skipped.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Forward a step count to the callback.
    ///
    /// Called on the synthesis thread; the callback must not block for long.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// A reporter that ignores every update.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

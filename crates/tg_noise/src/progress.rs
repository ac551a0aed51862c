use std::sync::atomic::{AtomicUsize, Ordering};

/// Generation phases, in the order they run.
///
/// `Sampling` evaluates elevation, temperature and moisture for a row in one
/// pass. `Classification` starts once every row has been sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Sampling,
    Classification,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[Self::Sampling, Self::Classification]
    }

    /// Display name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sampling => "Sampling",
            Self::Classification => "Classification",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Sampling => 0,
            Self::Classification => 1,
        }
    }
}

/// Row counters for one generation, shared with the worker threads.
pub struct GenerationProgress {
    rows: [AtomicUsize; 2],
    total_rows: usize,
}

impl GenerationProgress {
    /// Tracker for a map with `total_rows` rows.
    pub fn new(total_rows: usize) -> Self {
        Self {
            rows: Default::default(),
            total_rows,
        }
    }

    /// Record `rows` finished rows. Safe to call from multiple threads.
    pub fn finish_rows(&self, phase: Phase, rows: usize) {
        self.rows[phase.index()].fetch_add(rows, Ordering::Relaxed);
    }

    pub fn rows_done(&self, phase: Phase) -> usize {
        self.rows[phase.index()].load(Ordering::Relaxed)
    }

    /// Finished fraction of `phase`, in `[0, 1]`.
    pub fn fraction(&self, phase: Phase) -> f32 {
        if self.total_rows == 0 {
            return 0.0;
        }
        (self.rows_done(phase) as f32 / self.total_rows as f32).min(1.0)
    }

    /// Mean fraction over both phases.
    pub fn overall(&self) -> f32 {
        let phases = Phase::all();
        phases.iter().map(|p| self.fraction(*p)).sum::<f32>() / phases.len() as f32
    }

    pub fn is_complete(&self) -> bool {
        Phase::all()
            .iter()
            .all(|p| self.rows_done(*p) >= self.total_rows)
    }
}

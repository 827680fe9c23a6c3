//! Partitioning of one iteration's operations into simulated worker rounds.
//!
//! A [`BatchPlan`] borrows the operation list of a single step and exposes it
//! as a finite, restartable sequence of [`Batch`]es. Batches only reorganise
//! the list for display: every operation in an iteration reads the same
//! pre-iteration snapshot, so the assignment of operations to workers never
//! affects the distances.

use std::iter::Enumerate;
use std::num::NonZeroUsize;
use std::slice::Chunks;

use fwsim_core::constants::{PROGRESS_DONE, PROGRESS_FRAMES};
use fwsim_core::{ProgressUpdate, SchedulerOptions, UpdateOperation};

/// How operations are dispatched to the simulated pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Consecutive rounds of up to `workers` operations, one per worker.
    Parallel(NonZeroUsize),
    /// One completed batch holding every operation, all on worker 0.
    Sequential,
}

impl ExecutionMode {
    /// Mode selected by scheduler options.
    #[must_use]
    pub fn from_options(opts: &SchedulerOptions) -> Self {
        if opts.parallel_enabled {
            Self::Parallel(opts.workers())
        } else {
            Self::Sequential
        }
    }
}

/// An operation paired with the simulated worker that runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAssignment<'a> {
    /// Worker index in `0..W`.
    pub thread_id: usize,
    /// The relaxation check assigned to that worker.
    pub operation: &'a UpdateOperation,
}

/// A non-owning group of operations executed in one simulated round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    index: usize,
    offset: usize,
    operations: &'a [UpdateOperation],
    mode: ExecutionMode,
}

impl<'a> Batch<'a> {
    /// Position of this batch in the plan.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position of the batch's first operation in the iteration.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Operations in this batch, in original order.
    #[must_use]
    pub fn operations(&self) -> &'a [UpdateOperation] {
        self.operations
    }

    /// Number of operations in this batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the batch is empty (never true for batches from a plan).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Worker that runs the operation at `position` within this batch.
    #[must_use]
    pub fn thread_id(&self, position: usize) -> usize {
        match self.mode {
            ExecutionMode::Parallel(workers) => position % workers.get(),
            ExecutionMode::Sequential => 0,
        }
    }

    /// Operations paired with their workers.
    pub fn assignments(&self) -> impl Iterator<Item = ThreadAssignment<'a>> + 'a {
        let batch = *self;
        self.operations
            .iter()
            .enumerate()
            .map(move |(position, operation)| ThreadAssignment {
                thread_id: batch.thread_id(position),
                operation,
            })
    }

    /// Progress percentages this batch passes through when replayed.
    #[must_use]
    pub fn progress_frames(&self) -> &'static [u8] {
        match self.mode {
            ExecutionMode::Parallel(_) => &PROGRESS_FRAMES,
            ExecutionMode::Sequential => &[PROGRESS_DONE],
        }
    }
}

/// The batches of one iteration.
///
/// # Example
/// ```
/// use std::num::NonZeroUsize;
/// use fwsim_core::{DistanceMatrix, AlgorithmStepper, DistanceStore};
/// use fwsim_orchestration::batch::{BatchPlan, ExecutionMode};
///
/// let matrix = DistanceMatrix::from_rows([[0u32, 1, 5], [1, 0, 1], [5, 1, 0]]).unwrap();
/// let mut stepper = AlgorithmStepper::new(DistanceStore::with_matrix(&matrix).unwrap());
/// let report = stepper.step();
///
/// let plan = BatchPlan::new(&report.operations, ExecutionMode::Parallel(NonZeroUsize::new(4).unwrap()));
/// let sizes: Vec<usize> = plan.batches().map(|b| b.len()).collect();
/// assert_eq!(sizes, [4, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan<'a> {
    operations: &'a [UpdateOperation],
    mode: ExecutionMode,
}

impl<'a> BatchPlan<'a> {
    /// Plan `operations` under `mode`.
    #[must_use]
    pub fn new(operations: &'a [UpdateOperation], mode: ExecutionMode) -> Self {
        Self { operations, mode }
    }

    /// Maximum number of operations per batch.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        match self.mode {
            ExecutionMode::Parallel(workers) => workers.get(),
            ExecutionMode::Sequential => self.operations.len().max(1),
        }
    }

    /// Number of batches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len().div_ceil(self.batch_size())
    }

    /// Whether the plan has no batches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The planned operations.
    #[must_use]
    pub fn operations(&self) -> &'a [UpdateOperation] {
        self.operations
    }

    /// Dispatch mode of the plan.
    #[must_use]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Iterate over the batches from the start.
    #[must_use]
    pub fn batches(&self) -> Batches<'a> {
        let batch_size = self.batch_size();
        Batches {
            chunks: self.operations.chunks(batch_size).enumerate(),
            batch_size,
            mode: self.mode,
        }
    }

    /// Iterate over the progress frames of every batch from the start.
    #[must_use]
    pub fn replay(&self) -> Replay<'a> {
        Replay {
            batches: self.batches(),
            current: None,
            frame: 0,
            total_batches: self.len(),
        }
    }
}

/// Iterator over the batches of a [`BatchPlan`].
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    chunks: Enumerate<Chunks<'a, UpdateOperation>>,
    batch_size: usize,
    mode: ExecutionMode,
}

impl<'a> Iterator for Batches<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, operations) = self.chunks.next()?;
        Some(Batch {
            index,
            offset: index * self.batch_size,
            operations,
            mode: self.mode,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Batches<'_> {}

/// One visual step of a replay: a batch at a given simulated completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayFrame<'a> {
    /// The batch being shown.
    pub batch: Batch<'a>,
    /// Number of batches in the plan.
    pub total_batches: usize,
    /// Simulated completion of the batch, in percent.
    pub percent: u8,
}

impl ReplayFrame<'_> {
    /// Whether the batch has finished in this frame.
    #[must_use]
    pub fn is_batch_done(&self) -> bool {
        self.percent == PROGRESS_DONE
    }

    /// Progress update describing this frame.
    #[must_use]
    pub fn to_update(&self, iteration: usize) -> ProgressUpdate {
        ProgressUpdate::new(iteration, self.batch.index(), self.total_batches, self.percent)
    }
}

/// Lazy, finite sequence of replay frames over a [`BatchPlan`].
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    batches: Batches<'a>,
    current: Option<Batch<'a>>,
    frame: usize,
    total_batches: usize,
}

impl<'a> Iterator for Replay<'a> {
    type Item = ReplayFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(batch) = self.current {
                if let Some(&percent) = batch.progress_frames().get(self.frame) {
                    self.frame += 1;
                    return Some(ReplayFrame {
                        batch,
                        total_batches: self.total_batches,
                        percent,
                    });
                }
            }
            self.current = Some(self.batches.next()?);
            self.frame = 0;
        }
    }
}

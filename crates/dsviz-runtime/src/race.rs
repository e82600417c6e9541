#![forbid(unsafe_code)]

//! Simulated algorithm race.
//!
//! Racers do not execute the algorithms. Each simulation tick every
//! unfinished racer draws a progress increment and comparison/swap counts
//! from its algorithm's [`RateProfile`], scaled by the race speed, so faster
//! algorithms tend to finish first while runs still vary. Racers expose a
//! view of the input to draw: a partially sorted copy for sorting racers and
//! a set of cursor indices for all of them.
//!
//! # Invariants
//!
//! 1. Progress is monotonic and capped at 100; reaching 100 finishes the
//!    racer and fixes its finishing position.
//! 2. Only a running race advances. Pausing keeps all racer state.
//! 3. Cursor indices always lie within the input.
//! 4. Given the same seed, input and sequence of calls, a race replays
//!    identically.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use dsviz_core::reference::Rating;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Default simulation tick.
pub const RACE_TICK: Duration = Duration::from_millis(100);
/// Speed at which rates apply unscaled.
pub const NOMINAL_SPEED: u32 = 50;

// ---------------------------------------------------------------------------
// Algorithms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceKind {
    Sorting,
    Searching,
}

impl RaceKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sorting => "sorting",
            Self::Searching => "searching",
        }
    }

    /// Algorithms that can enter a race of this kind.
    #[must_use]
    pub const fn algorithms(self) -> &'static [Algorithm] {
        use Algorithm as A;
        match self {
            Self::Sorting => &[
                A::BubbleSort,
                A::SelectionSort,
                A::InsertionSort,
                A::MergeSort,
                A::QuickSort,
            ],
            Self::Searching => &[A::LinearSearch, A::BinarySearch],
        }
    }
}

impl fmt::Display for RaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RaceKind {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sorting" | "sort" => Ok(Self::Sorting),
            "searching" | "search" => Ok(Self::Searching),
            _ => Err(RaceError::UnknownKind(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    LinearSearch,
    BinarySearch,
}

impl Algorithm {
    pub const ALL: [Self; 7] = [
        Self::BubbleSort,
        Self::SelectionSort,
        Self::InsertionSort,
        Self::MergeSort,
        Self::QuickSort,
        Self::LinearSearch,
        Self::BinarySearch,
    ];

    #[must_use]
    pub const fn kind(self) -> RaceKind {
        match self {
            Self::LinearSearch | Self::BinarySearch => RaceKind::Searching,
            _ => RaceKind::Sorting,
        }
    }

    /// Short identifier used on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble",
            Self::SelectionSort => "selection",
            Self::InsertionSort => "insertion",
            Self::MergeSort => "merge",
            Self::QuickSort => "quick",
            Self::LinearSearch => "linear",
            Self::BinarySearch => "binary",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BubbleSort => "Bubble Sort",
            Self::SelectionSort => "Selection Sort",
            Self::InsertionSort => "Insertion Sort",
            Self::MergeSort => "Merge Sort",
            Self::QuickSort => "Quick Sort",
            Self::LinearSearch => "Linear Search",
            Self::BinarySearch => "Binary Search",
        }
    }

    /// Typical time and auxiliary space, as shown on the algorithm cards.
    #[must_use]
    pub const fn complexity(self) -> AlgorithmComplexity {
        use Rating::{Average, Excellent, Good};
        match self {
            Self::BubbleSort | Self::SelectionSort | Self::InsertionSort => {
                AlgorithmComplexity::new("O(n²)", Average, "O(1)", Excellent)
            }
            Self::MergeSort => AlgorithmComplexity::new("O(n log n)", Good, "O(n)", Good),
            Self::QuickSort => AlgorithmComplexity::new("O(n log n)", Good, "O(log n)", Excellent),
            Self::LinearSearch => AlgorithmComplexity::new("O(n)", Good, "O(1)", Excellent),
            Self::BinarySearch => AlgorithmComplexity::new("O(log n)", Excellent, "O(1)", Excellent),
        }
    }

    /// Per-tick increments at nominal speed.
    #[must_use]
    pub const fn rates(self) -> RateProfile {
        match self {
            Self::QuickSort | Self::MergeSort => RateProfile::new(2.0, 5.0, 1, 2, 1, 1),
            Self::InsertionSort => RateProfile::new(1.0, 3.0, 1, 3, 1, 2),
            Self::SelectionSort | Self::BubbleSort => RateProfile::new(0.5, 1.5, 2, 5, 1, 3),
            Self::BinarySearch => RateProfile::new(5.0, 10.0, 1, 1, 0, 0),
            Self::LinearSearch => RateProfile::new(1.0, 3.0, 1, 3, 0, 0),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| {
                let id = a.id();
                let kind_suffix = match a.kind() {
                    RaceKind::Sorting => "sort",
                    RaceKind::Searching => "search",
                };
                key == id || key.strip_suffix(kind_suffix) == Some(id)
            })
            .ok_or_else(|| RaceError::UnknownAlgorithm(s.to_owned()))
    }
}

/// Complexity card for one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmComplexity {
    pub time: &'static str,
    pub time_rating: Rating,
    pub space: &'static str,
    pub space_rating: Rating,
}

impl AlgorithmComplexity {
    const fn new(
        time: &'static str,
        time_rating: Rating,
        space: &'static str,
        space_rating: Rating,
    ) -> Self {
        Self {
            time,
            time_rating,
            space,
            space_rating,
        }
    }
}

/// Ranges a racer draws its per-tick increments from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateProfile {
    pub progress_min: f64,
    pub progress_max: f64,
    pub comparisons: (u64, u64),
    pub swaps: (u64, u64),
}

impl RateProfile {
    const fn new(
        progress_min: f64,
        progress_max: f64,
        cmp_min: u64,
        cmp_max: u64,
        swap_min: u64,
        swap_max: u64,
    ) -> Self {
        Self {
            progress_min,
            progress_max,
            comparisons: (cmp_min, cmp_max),
            swaps: (swap_min, swap_max),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RaceError {
    #[error("a race needs at least one algorithm")]
    NoAlgorithms,
    #[error("a race needs a non-empty input")]
    EmptyInput,
    #[error("{algorithm} cannot enter a {kind} race")]
    WrongKind { algorithm: Algorithm, kind: RaceKind },
    #[error("{0} is entered twice")]
    Duplicate(Algorithm),
    #[error("speed must be in 1..=100, got {0}")]
    SpeedOutOfRange(u32),
    #[error("unknown race kind: {0}")]
    UnknownKind(String),
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

// ---------------------------------------------------------------------------
// Racers
// ---------------------------------------------------------------------------

/// One algorithm's simulated state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Racer {
    pub algorithm: Algorithm,
    /// Percent complete, 0..=100.
    pub progress: f64,
    pub comparisons: u64,
    pub swaps: u64,
    /// Input as this racer currently presents it.
    pub view: Vec<i64>,
    /// Indices the racer is "looking at".
    pub cursors: Vec<usize>,
    /// Simulated time spent racing.
    #[serde(skip)]
    pub elapsed: Duration,
    /// 1-based finishing position.
    pub finish_position: Option<usize>,
}

impl Racer {
    fn new(algorithm: Algorithm, input: &[i64]) -> Self {
        Self {
            algorithm,
            progress: 0.0,
            comparisons: 0,
            swaps: 0,
            view: input.to_vec(),
            cursors: Vec::new(),
            elapsed: Duration::ZERO,
            finish_position: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finish_position.is_some()
    }
}

/// A racer's place in the current ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub algorithm: Algorithm,
    pub progress: f64,
    pub comparisons: u64,
    pub swaps: u64,
    pub finished: bool,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceState {
    Ready,
    Running,
    Paused,
    Finished,
}

// ---------------------------------------------------------------------------
// Race
// ---------------------------------------------------------------------------

/// Tick-driven race between algorithms of one kind.
#[derive(Debug, Clone)]
pub struct Race {
    kind: RaceKind,
    input: Vec<i64>,
    sorted: Vec<i64>,
    target: Option<i64>,
    racers: Vec<Racer>,
    speed: u32,
    tick: Duration,
    state: RaceState,
    pending: Duration,
    finished: usize,
    seed: u64,
    rng: SmallRng,
}

impl Race {
    /// Set up a race. Nothing moves until [`start`](Self::start).
    ///
    /// Searching races pick a random target from the input; when binary
    /// search is entered the input is sorted first.
    ///
    /// # Errors
    ///
    /// [`RaceError`] for an empty field, an empty input, an algorithm of the
    /// wrong kind, a duplicate entry, or a speed outside 1..=100.
    pub fn new(
        kind: RaceKind,
        mut input: Vec<i64>,
        selected: &[Algorithm],
        speed: u32,
        seed: u64,
    ) -> Result<Self, RaceError> {
        if selected.is_empty() {
            return Err(RaceError::NoAlgorithms);
        }
        if input.is_empty() {
            return Err(RaceError::EmptyInput);
        }
        if !(1..=100).contains(&speed) {
            return Err(RaceError::SpeedOutOfRange(speed));
        }
        for (i, algorithm) in selected.iter().enumerate() {
            if algorithm.kind() != kind {
                return Err(RaceError::WrongKind {
                    algorithm: *algorithm,
                    kind,
                });
            }
            if selected[..i].contains(algorithm) {
                return Err(RaceError::Duplicate(*algorithm));
            }
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        if kind == RaceKind::Searching && selected.contains(&Algorithm::BinarySearch) {
            input.sort_unstable();
        }
        let target = (kind == RaceKind::Searching)
            .then(|| input[rng.random_range(0..input.len())]);
        let mut sorted = input.clone();
        sorted.sort_unstable();

        let racers = selected.iter().map(|a| Racer::new(*a, &input)).collect();
        Ok(Self {
            kind,
            input,
            sorted,
            target,
            racers,
            speed,
            tick: RACE_TICK,
            state: RaceState::Ready,
            pending: Duration::ZERO,
            finished: 0,
            seed,
            rng,
        })
    }

    /// Set up a race over `len` random values drawn from `range`, all from
    /// the one seed.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn with_random_input(
        kind: RaceKind,
        len: usize,
        range: RangeInclusive<i64>,
        selected: &[Algorithm],
        speed: u32,
        seed: u64,
    ) -> Result<Self, RaceError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let input = random_values(&mut rng, len, range);
        Self::new(kind, input, selected, speed, seed)
    }

    /// Use a different simulation tick (builder pattern).
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    // -----------------------------------------------------------------------
    // Control
    // -----------------------------------------------------------------------

    /// Begin racing, or continue after [`pause`](Self::pause).
    pub fn start(&mut self) {
        if matches!(self.state, RaceState::Ready | RaceState::Paused) {
            self.state = RaceState::Running;
            tracing::debug!(target: "dsviz.race", kind = %self.kind, racers = self.racers.len(), "race running");
        }
    }

    /// Alias of [`start`](Self::start) for a paused race.
    pub fn resume(&mut self) {
        self.start();
    }

    pub fn pause(&mut self) {
        if self.state == RaceState::Running {
            self.state = RaceState::Paused;
            tracing::debug!(target: "dsviz.race", "race paused");
        }
    }

    /// Put every racer back on the start line with the same input and seed.
    pub fn reset(&mut self) {
        self.racers = self
            .racers
            .iter()
            .map(|r| Racer::new(r.algorithm, &self.input))
            .collect();
        self.state = RaceState::Ready;
        self.pending = Duration::ZERO;
        self.finished = 0;
        self.rng = SmallRng::seed_from_u64(self.seed);
        if self.kind == RaceKind::Searching {
            // Keep the target draw aligned with a fresh race.
            let _ = self.rng.random_range(0..self.input.len());
        }
    }

    /// Feed elapsed time; returns the number of ticks simulated.
    pub fn advance(&mut self, dt: Duration) -> usize {
        if self.state != RaceState::Running {
            return 0;
        }
        self.pending = self.pending.saturating_add(dt);
        let mut ticks = 0;
        while self.pending >= self.tick && self.state == RaceState::Running {
            self.pending -= self.tick;
            self.step();
            ticks += 1;
        }
        ticks
    }

    /// Simulate exactly one tick regardless of elapsed time.
    pub fn step(&mut self) {
        if self.state != RaceState::Running {
            return;
        }
        let scale = f64::from(self.speed) / f64::from(NOMINAL_SPEED);
        let len = self.input.len();
        let tick = self.tick;

        for i in 0..self.racers.len() {
            if self.racers[i].is_finished() {
                continue;
            }
            let rates = self.racers[i].algorithm.rates();
            let increment = self.rng.random_range(rates.progress_min..rates.progress_max) * scale;
            let comparisons = self.rng.random_range(rates.comparisons.0..=rates.comparisons.1);
            let swaps = self.rng.random_range(rates.swaps.0..=rates.swaps.1);

            let progress = (self.racers[i].progress + increment).min(100.0);
            let fraction = progress / 100.0;
            let (view, cursors) = match self.kind {
                RaceKind::Sorting => {
                    let view = self.partial_sort(fraction);
                    let count = self.rng.random_range(1..=3);
                    let cursors = (0..count).map(|_| self.rng.random_range(0..len)).collect();
                    (Some(view), cursors)
                }
                RaceKind::Searching => (None, search_cursors(self.racers[i].algorithm, len, fraction)),
            };

            let racer = &mut self.racers[i];
            racer.progress = progress;
            racer.comparisons += comparisons;
            if self.kind == RaceKind::Sorting {
                racer.swaps += swaps;
            }
            if let Some(view) = view {
                racer.view = view;
            }
            racer.cursors = cursors;
            racer.elapsed += tick;
            if progress >= 100.0 {
                self.finished += 1;
                racer.finish_position = Some(self.finished);
                tracing::debug!(
                    target: "dsviz.race",
                    algorithm = %racer.algorithm,
                    position = self.finished,
                    comparisons = racer.comparisons,
                    "racer finished"
                );
            }
            tracing::trace!(
                target: "dsviz.race",
                algorithm = %racer.algorithm,
                progress = racer.progress,
                "tick"
            );
        }

        if self.finished == self.racers.len() {
            self.state = RaceState::Finished;
            tracing::info!(target: "dsviz.race", kind = %self.kind, "race finished");
        }
    }

    /// Each slot shows its sorted value with probability `fraction`.
    fn partial_sort(&mut self, fraction: f64) -> Vec<i64> {
        self.input
            .iter()
            .zip(&self.sorted)
            .map(|(&original, &sorted)| {
                if self.rng.random::<f64>() < fraction {
                    sorted
                } else {
                    original
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn kind(&self) -> RaceKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> RaceState {
        self.state
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == RaceState::Finished
    }

    #[must_use]
    pub fn input(&self) -> &[i64] {
        &self.input
    }

    /// Value searching racers look for.
    #[must_use]
    pub fn target(&self) -> Option<i64> {
        self.target
    }

    #[must_use]
    pub fn racers(&self) -> &[Racer] {
        &self.racers
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Racers ranked by finishing position, then by progress.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut order: Vec<&Racer> = self.racers.iter().collect();
        order.sort_by(|a, b| match (a.finish_position, b.finish_position) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.progress.total_cmp(&a.progress),
        });
        order
            .into_iter()
            .enumerate()
            .map(|(i, r)| Standing {
                rank: i + 1,
                algorithm: r.algorithm,
                progress: r.progress,
                comparisons: r.comparisons,
                swaps: r.swaps,
                finished: r.is_finished(),
                elapsed_ms: u64::try_from(r.elapsed.as_millis()).unwrap_or(u64::MAX),
            })
            .collect()
    }
}

/// Cursor indices for a searching racer at `fraction` progress.
///
/// Binary search shows `[left, mid, right]` starting together at the centre
/// and widening toward both ends as progress grows. Linear search shows its
/// scan position.
fn search_cursors(algorithm: Algorithm, len: usize, fraction: f64) -> Vec<usize> {
    let last = len.saturating_sub(1);
    let at = |x: f64| (x.floor() as usize).min(last);
    let n = len as f64;
    match algorithm {
        Algorithm::BinarySearch => {
            let left = at(n * (1.0 - fraction) / 2.0);
            let right = at(n * (1.0 + fraction) / 2.0);
            vec![left, (left + right) / 2, right]
        }
        _ => vec![at(n * fraction)],
    }
}

/// `len` random values drawn uniformly from `range`.
pub fn random_values(rng: &mut impl Rng, len: usize, range: RangeInclusive<i64>) -> Vec<i64> {
    (0..len).map(|_| rng.random_range(range.clone())).collect()
}

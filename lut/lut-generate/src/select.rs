//! Greedy diversity selection.
//!
//! Reduces the full candidate space to exactly `target_count` rows in four
//! ordered phases:
//!
//! 1. **Seed**: every single-material stack, in material order.
//! 2. **Threshold**: candidates in enumeration order whose colour is at least
//!    `distance_threshold` away (device RGB) from everything accepted so far.
//! 3. **Fill**: if still short, any not-yet-selected candidate in
//!    enumeration order.
//! 4. **Padding**: if the space ran out, repeats of the default stack.
//!
//! The result depends on enumeration order: the first candidate to clear the
//! threshold wins. No phase revisits a rejection, but phase 2 rejects remain
//! eligible for phase 3.

// Grid cell coordinates saturate for vanishingly small thresholds
#![allow(clippy::cast_possible_truncation)]

use hashbrown::{HashMap, HashSet};
use lut_types::{Rgb, Stack};
use tracing::{debug, info, warn};

use crate::candidate::{Candidate, CandidateSource};
use crate::error::{LutError, LutResult};
use crate::mix::Mixer;
use crate::params::{LutParams, PaddingPolicy};
use crate::result::{Selection, SelectionEntry, SelectionPhase};

const PROGRESS_INTERVAL: usize = 500;

/// Select a diverse, fixed-size subset of candidates.
///
/// # Arguments
///
/// * `source` - Candidates in enumeration order
/// * `params` - Generation parameters
///
/// # Returns
///
/// A [`Selection`] of exactly `params.target_count` entries.
///
/// # Errors
///
/// Returns a [`LutError`] if the parameters are invalid, or if padding
/// would be needed under [`PaddingPolicy::Reject`].
///
/// # Example
///
/// ```
/// use lut_generate::{LazyCandidates, LutParams, Mixer, StackSpace, select_diverse};
///
/// let params = LutParams::eight_color().with_layer_count(3).with_target_count(100);
/// let mixer = Mixer::new(&params);
/// let space = StackSpace::new(8, 3).unwrap();
/// let selection = select_diverse(&LazyCandidates::new(space, &mixer), &params).unwrap();
/// assert_eq!(selection.len(), 100);
/// ```
pub fn select_diverse<S>(source: &S, params: &LutParams) -> LutResult<Selection>
where
    S: CandidateSource + ?Sized,
{
    params.validate()?;
    let target = params.target_count;

    info!(
        candidates = source.total(),
        target,
        threshold = params.distance_threshold,
        "Starting diversity selection"
    );

    // Distinct rows never outnumber the stack space
    let capacity = usize::try_from(source.total()).map_or(target, |space| space.min(target));
    let mut selector = Selector::new(params.distance_threshold, target, capacity);

    // Phase 1: one seed per material
    for (id, material) in params.materials.iter() {
        if let Some(candidate) = source.find_uniform(id) {
            debug!(id, name = %material.name, color = %candidate.color, "Seed colour");
            selector.accept(candidate, SelectionPhase::Seed);
        }
    }
    let seeded = selector.len();

    // Phase 2: threshold growth
    for candidate in source.scan() {
        if selector.len() >= target {
            break;
        }
        if selector.contains(&candidate.stack) {
            continue;
        }
        if selector.is_distinct(candidate.color) {
            selector.accept(candidate, SelectionPhase::Threshold);
        }
    }
    debug!(
        accepted = selector.len() - seeded,
        "Threshold selection complete"
    );

    // Phase 3: fill without the threshold
    if selector.len() < target {
        debug!(missing = target - selector.len(), "Filling remaining rows");
        for candidate in source.scan() {
            if selector.len() >= target {
                break;
            }
            if selector.contains(&candidate.stack) {
                continue;
            }
            selector.accept(candidate, SelectionPhase::Fill);
        }
    }

    let mut entries = selector.entries;
    entries.truncate(target);

    // Phase 4: pad with the default stack
    if entries.len() < target {
        let missing = target - entries.len();
        if params.padding == PaddingPolicy::Reject {
            return Err(LutError::TargetExceedsStackSpace {
                target,
                space: source.total(),
            });
        }
        entries
            .try_reserve_exact(missing)
            .map_err(|_| LutError::TableTooLarge {
                target,
                layer_count: params.layer_count,
            })?;
        let stack = Stack::uniform(params.default_material, params.layer_count);
        let color = Mixer::new(params).mix(&stack);
        warn!(
            missing,
            stack = %stack,
            "Candidates exhausted before target; padding with duplicate default stack"
        );
        entries.extend(std::iter::repeat_n(
            SelectionEntry {
                stack,
                color,
                phase: SelectionPhase::Padding,
            },
            missing,
        ));
    }

    let selection = Selection {
        entries,
        layer_count: params.layer_count,
        candidates_considered: source.total(),
    };
    info!(
        rows = selection.len(),
        seeds = selection.count(SelectionPhase::Seed),
        threshold = selection.count(SelectionPhase::Threshold),
        fill = selection.count(SelectionPhase::Fill),
        padding = selection.count(SelectionPhase::Padding),
        "Diversity selection complete"
    );
    Ok(selection)
}

/// Accumulates accepted entries and answers membership and distance
/// queries.
struct Selector {
    entries: Vec<SelectionEntry>,
    stacks: HashSet<Stack>,
    grid: ColorGrid,
    target: usize,
}

impl Selector {
    fn new(threshold: f64, target: usize, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            stacks: HashSet::with_capacity(capacity),
            grid: ColorGrid::new(threshold),
            target,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, stack: &Stack) -> bool {
        self.stacks.contains(stack)
    }

    fn is_distinct(&self, color: Rgb) -> bool {
        self.grid.is_clear(color)
    }

    fn accept(&mut self, candidate: Candidate, phase: SelectionPhase) {
        self.grid.insert(candidate.color);
        self.stacks.insert(candidate.stack.clone());
        self.entries.push(SelectionEntry {
            stack: candidate.stack,
            color: candidate.color,
            phase,
        });
        if self.entries.len() % PROGRESS_INTERVAL == 0 {
            debug!(selected = self.entries.len(), target = self.target, "Selection progress");
        }
    }
}

/// Uniform spatial hash over RGB space with cell edge equal to the
/// threshold.
///
/// Two colours closer than the threshold differ by less than one cell edge
/// on every axis, so only the 27 surrounding cells need checking. This is
/// exactly equivalent to comparing against every accepted colour.
struct ColorGrid {
    threshold: f64,
    cells: HashMap<[i64; 3], Vec<Rgb>>,
}

impl ColorGrid {
    fn new(threshold: f64) -> Self {
        Self {
            threshold,
            cells: HashMap::new(),
        }
    }

    fn enabled(&self) -> bool {
        self.threshold > 0.0
    }

    fn key(&self, color: Rgb) -> [i64; 3] {
        color.to_f64().map(|c| (c / self.threshold).floor() as i64)
    }

    fn insert(&mut self, color: Rgb) {
        if !self.enabled() {
            return;
        }
        self.cells.entry(self.key(color)).or_default().push(color);
    }

    fn is_clear(&self, color: Rgb) -> bool {
        if !self.enabled() {
            return true;
        }
        let [x, y, z] = self.key(color);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(cell) = self.cells.get(&[
                        x.saturating_add(dx),
                        y.saturating_add(dy),
                        z.saturating_add(dz),
                    ]) else {
                        continue;
                    };
                    if cell.iter().any(|c| c.distance(color) < self.threshold) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

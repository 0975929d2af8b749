//! Candidate stacks and the sources that produce them.

use lut_types::{Lab, Rgb, Stack};
use rayon::prelude::*;
use tracing::debug;

use crate::enumerate::StackSpace;
use crate::mix::Mixer;

/// A stack together with its simulated colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position in enumeration order; unique per distinct stack.
    pub index: u64,

    /// The material stack.
    pub stack: Stack,

    /// Visible colour over the backing.
    pub color: Rgb,
}

impl Candidate {
    /// Perceptual representation of the colour.
    #[must_use]
    pub fn lab(&self) -> Lab {
        Lab::from_rgb(self.color)
    }
}

/// A restartable, ordered stream of candidates.
///
/// Every call to [`CandidateSource::scan`] must yield the same candidates
/// in enumeration order. Selection scans a source more than once.
pub trait CandidateSource {
    /// Number of candidates a full scan yields.
    fn total(&self) -> u64;

    /// Scan every candidate from the start.
    fn scan(&self) -> Box<dyn Iterator<Item = Candidate> + '_>;

    /// The first candidate whose stack is `layer_count` layers of `id`.
    fn find_uniform(&self, id: u8) -> Option<Candidate> {
        self.scan()
            .find(|c| !c.stack.is_empty() && c.stack.is_uniform() && c.stack.top() == Some(id))
    }
}

/// Candidates produced on demand from a [`StackSpace`].
///
/// Memory use is independent of the size of the space.
#[derive(Debug, Clone)]
pub struct LazyCandidates<'a> {
    space: StackSpace,
    mixer: &'a Mixer,
}

impl<'a> LazyCandidates<'a> {
    /// Create a lazy source.
    #[must_use]
    pub const fn new(space: StackSpace, mixer: &'a Mixer) -> Self {
        Self { space, mixer }
    }

    fn candidate(&self, index: u64, stack: Stack) -> Candidate {
        let color = self.mixer.mix(&stack);
        Candidate {
            index,
            stack,
            color,
        }
    }
}

impl CandidateSource for LazyCandidates<'_> {
    fn total(&self) -> u64 {
        self.space.len()
    }

    fn scan(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        Box::new(
            self.space
                .iter()
                .map(|(index, stack)| self.candidate(index, stack)),
        )
    }

    fn find_uniform(&self, id: u8) -> Option<Candidate> {
        let index = self.space.uniform_index(id)?;
        let stack = self.space.stack_at(index)?;
        Some(self.candidate(index, stack))
    }
}

impl CandidateSource for [Candidate] {
    fn total(&self) -> u64 {
        self.len() as u64
    }

    fn scan(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl CandidateSource for Vec<Candidate> {
    fn total(&self) -> u64 {
        self.as_slice().total()
    }

    fn scan(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        self.as_slice().scan()
    }
}

/// Mix every stack in the space and collect the candidates in enumeration
/// order.
///
/// With `parallel` set, mixing runs on the rayon pool; the result is
/// identical either way.
///
/// # Example
///
/// ```
/// use lut_generate::{LutParams, Mixer, StackSpace, materialize_candidates};
///
/// let mixer = Mixer::new(&LutParams::eight_color());
/// let space = StackSpace::new(8, 2).unwrap();
/// let candidates = materialize_candidates(space, &mixer, true);
/// assert_eq!(candidates.len(), 64);
/// assert_eq!(candidates[9].stack.layers(), &[1, 1]);
/// ```
#[must_use]
pub fn materialize_candidates(space: StackSpace, mixer: &Mixer, parallel: bool) -> Vec<Candidate> {
    debug!(stacks = space.len(), parallel, "Mixing all stacks");
    let mix = |index: u64| {
        // Indices come from 0..len, so decoding cannot fail.
        space.stack_at(index).map(|stack| Candidate {
            index,
            color: mixer.mix(&stack),
            stack,
        })
    };
    if parallel {
        (0..space.len()).into_par_iter().filter_map(mix).collect()
    } else {
        (0..space.len()).filter_map(mix).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LutParams;

    fn setup(layers: usize) -> (StackSpace, Mixer) {
        let params = LutParams::eight_color().with_layer_count(layers);
        (StackSpace::new(8, layers).unwrap(), Mixer::new(&params))
    }

    #[test]
    fn parallel_matches_serial() {
        let (space, mixer) = setup(3);
        let serial = materialize_candidates(space, &mixer, false);
        let parallel = materialize_candidates(space, &mixer, true);
        assert_eq!(serial, parallel);
        assert_eq!(serial.len(), 512);
        assert!(serial.iter().enumerate().all(|(i, c)| c.index == i as u64));
    }

    #[test]
    fn lazy_matches_materialized() {
        let (space, mixer) = setup(3);
        let lazy = LazyCandidates::new(space, &mixer);
        let eager = materialize_candidates(space, &mixer, false);
        assert_eq!(lazy.total(), eager.total());
        assert!(lazy.scan().eq(eager.scan()));
    }

    #[test]
    fn find_uniform_agrees() {
        let (space, mixer) = setup(4);
        let lazy = LazyCandidates::new(space, &mixer);
        let eager = materialize_candidates(space, &mixer, true);
        for id in 0..8 {
            let a = lazy.find_uniform(id).unwrap();
            let b = eager.find_uniform(id).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.stack, Stack::uniform(id, 4));
        }
        assert!(lazy.find_uniform(8).is_none());
        assert!(eager.find_uniform(8).is_none());
    }

    #[test]
    fn scan_restarts() {
        let (space, mixer) = setup(2);
        let lazy = LazyCandidates::new(space, &mixer);
        let first: Vec<_> = lazy.scan().take(3).collect();
        let again: Vec<_> = lazy.scan().take(3).collect();
        assert_eq!(first, again);
        assert_eq!(first[0].index, 0);
    }

    #[test]
    fn lab_of_black_stack() {
        let (space, mixer) = setup(2);
        let black = LazyCandidates::new(space, &mixer).find_uniform(4).unwrap();
        assert!(black.lab().l.abs() < 1e-9);
    }
}

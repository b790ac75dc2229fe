//! Symbolic stream pipeline
//!
//! Provides [`SymbolicStream`]. Intermediate operations only record stages;
//! the store is read when a terminal operation runs.

use crate::error::StreamError;
use crate::exploration::{Exploration, PathOutcome};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;
use symex_core::{EngineConfig, PathCondition, SymValue};
use symex_store::ElementStore;
use tracing::{debug, trace, warn};

/// Contract entry point that produced a stream
///
/// Recorded for diagnostics only: exploration never depends on it, so a
/// parallel request behaves exactly like a sequential one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StreamRequest {
    /// `stream()`
    #[default]
    Sequential,
    /// `parallelStream()`
    Parallel,
}

type Transform<'a> = Rc<dyn Fn(&SymValue) -> SymValue + 'a>;
type Observer<'a> = Rc<dyn Fn(&SymValue) + 'a>;

#[derive(Clone)]
enum Stage<'a> {
    Filter(Transform<'a>),
    Map(Transform<'a>),
    Skip(usize),
    Limit(usize),
    Peek(Observer<'a>),
}

impl Stage<'_> {
    fn name(&self) -> &'static str {
        match self {
            Self::Filter(_) => "filter",
            Self::Map(_) => "map",
            Self::Skip(_) => "skip",
            Self::Limit(_) => "limit",
            Self::Peek(_) => "peek",
        }
    }

    fn initial_budget(&self) -> usize {
        match self {
            Self::Skip(n) | Self::Limit(n) => *n,
            _ => 0,
        }
    }
}

/// Terminal test deciding whether a walker stops at an emitted element
type Stop<'s> = &'s dyn Fn(&SymValue) -> SymValue;

/// Shared state of one traversal step
struct Pass<'p, 'a> {
    stages: &'p [Stage<'a>],
    stop: Option<Stop<'p>>,
    branches: usize,
}

/// Partial path through the pipeline
///
/// A walker is `done` once it pulls no further elements: a `limit` it must
/// pass is exhausted, or the terminal operation stopped on it.
#[derive(Clone)]
struct Walker {
    condition: PathCondition,
    emitted: Vec<SymValue>,
    budgets: SmallVec<[usize; 4]>,
    done: bool,
    hit: bool,
}

impl Walker {
    fn start(condition: PathCondition, stages: &[Stage<'_>]) -> Self {
        Self {
            condition,
            emitted: Vec::new(),
            budgets: stages.iter().map(Stage::initial_budget).collect(),
            done: stages.iter().any(|s| matches!(s, Stage::Limit(0))),
            hit: false,
        }
    }

    /// Push `value` through `stages[at..]`, appending every resulting walker
    fn advance(
        mut self,
        value: SymValue,
        at: usize,
        pass: &mut Pass<'_, '_>,
        out: &mut Vec<Walker>,
    ) {
        let stages = pass.stages;
        let Some(stage) = stages.get(at) else {
            self.emit(value, pass, out);
            return;
        };

        match stage {
            Stage::Filter(predicate) => {
                let test = predicate(&value);
                let kept = self.condition.assume(test.clone());
                let dropped = self.condition.assume(test.negate());
                match (kept, dropped) {
                    (Some(kept), Some(dropped)) => {
                        pass.branches += 1;
                        trace!(condition = %test, "filter forks");
                        let mut keeper = self.clone();
                        keeper.condition = kept;
                        keeper.advance(value, at + 1, pass, out);
                        self.condition = dropped;
                        out.push(self);
                    }
                    (Some(kept), None) => {
                        self.condition = kept;
                        self.advance(value, at + 1, pass, out);
                    }
                    (None, Some(dropped)) => {
                        self.condition = dropped;
                        out.push(self);
                    }
                    // Only reachable for an already infeasible path
                    (None, None) => {}
                }
            }
            Stage::Map(mapper) => {
                let mapped = mapper(&value);
                self.advance(mapped, at + 1, pass, out);
            }
            Stage::Skip(_) => {
                if self.budgets[at] > 0 {
                    self.budgets[at] -= 1;
                    out.push(self);
                } else {
                    self.advance(value, at + 1, pass, out);
                }
            }
            Stage::Limit(_) => {
                if self.budgets[at] == 0 {
                    self.done = true;
                    out.push(self);
                } else {
                    self.budgets[at] -= 1;
                    if self.budgets[at] == 0 {
                        self.done = true;
                    }
                    self.advance(value, at + 1, pass, out);
                }
            }
            Stage::Peek(observer) => {
                observer(&value);
                self.advance(value, at + 1, pass, out);
            }
        }
    }

    /// Hand `value` to the terminal operation
    fn emit(mut self, value: SymValue, pass: &mut Pass<'_, '_>, out: &mut Vec<Walker>) {
        let Some(stop) = pass.stop else {
            self.emitted.push(value);
            out.push(self);
            return;
        };

        let test = stop(&value);
        let found = self.condition.assume(test.clone());
        let missed = self.condition.assume(test.negate());
        match (found, missed) {
            (Some(found), Some(missed)) => {
                pass.branches += 1;
                trace!(condition = %test, "terminal test forks");
                let mut hit = self.clone();
                hit.condition = found;
                hit.stop_at(value);
                out.push(hit);
                self.condition = missed;
                out.push(self);
            }
            (Some(found), None) => {
                self.condition = found;
                self.stop_at(value);
                out.push(self);
            }
            (None, Some(missed)) => {
                self.condition = missed;
                out.push(self);
            }
            (None, None) => {}
        }
    }

    fn stop_at(&mut self, value: SymValue) {
        self.emitted.push(value);
        self.hit = true;
        self.done = true;
    }
}

/// Finished walkers plus the branches spent reaching them
struct Traversal {
    walkers: Vec<Walker>,
    branches: usize,
}

/// Lazy symbolic pipeline over an element store
///
/// The stream borrows the store immutably: it can neither outlive nor mutate
/// the collection it was produced from. Two streams over the same store are
/// independent; consuming one leaves the other untouched.
///
/// Closures are reference counted and not `Send`, so a stream stays on the
/// exploration path that created it.
pub struct SymbolicStream<'a> {
    source: &'a ElementStore,
    stages: SmallVec<[Stage<'a>; 4]>,
    request: StreamRequest,
    max_paths: usize,
}

impl<'a> SymbolicStream<'a> {
    /// Create stream over `source` with the default path budget
    #[must_use]
    pub fn new(source: &'a ElementStore, request: StreamRequest) -> Self {
        Self {
            source,
            stages: SmallVec::new(),
            request,
            max_paths: EngineConfig::default().max_paths,
        }
    }

    /// Create stream with the path budget from `config`
    #[must_use]
    pub fn with_config(source: &'a ElementStore, request: StreamRequest, config: &EngineConfig) -> Self {
        Self::new(source, request).with_max_paths(config.max_paths)
    }

    /// Bound the number of paths a terminal operation may explore
    #[inline]
    #[must_use]
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }

    /// Entry point that produced this stream
    #[inline]
    #[must_use]
    pub fn request(&self) -> StreamRequest {
        self.request
    }

    /// Store the stream reads from
    #[inline]
    #[must_use]
    pub fn source(&self) -> &'a ElementStore {
        self.source
    }

    /// Recorded stage names in pipeline order
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Keep elements satisfying `predicate`; a predicate that does not fold to
    /// a constant forks the path
    #[must_use]
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&SymValue) -> SymValue + 'a,
    {
        self.stages.push(Stage::Filter(Rc::new(predicate)));
        self
    }

    /// Transform every element
    #[must_use]
    pub fn map<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&SymValue) -> SymValue + 'a,
    {
        self.stages.push(Stage::Map(Rc::new(mapper)));
        self
    }

    /// Drop the first `n` elements reaching this stage
    #[must_use]
    pub fn skip(mut self, n: usize) -> Self {
        self.stages.push(Stage::Skip(n));
        self
    }

    /// Pass at most `n` elements past this stage
    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.stages.push(Stage::Limit(n));
        self
    }

    /// Observe elements reaching this stage, once per path they reach it on
    #[must_use]
    pub fn peek<F>(mut self, observer: F) -> Self
    where
        F: Fn(&SymValue) + 'a,
    {
        self.stages.push(Stage::Peek(Rc::new(observer)));
        self
    }

    /// Elements reaching the end of the pipeline, in source order
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn collect(self) -> Result<Exploration<Vec<SymValue>>, StreamError> {
        let traversal = self.run("collect", None)?;
        Ok(finish(traversal, |walker| walker.emitted))
    }

    /// Number of elements reaching the end of the pipeline
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn count(self) -> Result<Exploration<usize>, StreamError> {
        let traversal = self.run("count", None)?;
        Ok(finish(traversal, |walker| walker.emitted.len()))
    }

    /// First element reaching the end of the pipeline
    ///
    /// Each path stops pulling elements once it has produced one.
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn find_first(self) -> Result<Exploration<Option<SymValue>>, StreamError> {
        let first = |_: &SymValue| SymValue::bool(true);
        let traversal = self.run("find_first", Some(&first))?;
        Ok(finish(traversal, |walker| walker.emitted.into_iter().next()))
    }

    /// Left fold with `init`
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn fold<T, F>(self, init: T, f: F) -> Result<Exploration<T>, StreamError>
    where
        T: Clone,
        F: Fn(T, &SymValue) -> T,
    {
        let traversal = self.run("fold", None)?;
        Ok(finish(traversal, |walker| {
            walker.emitted.iter().fold(init.clone(), &f)
        }))
    }

    /// Fold without identity; `None` on paths with no elements
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn reduce<F>(self, f: F) -> Result<Exploration<Option<SymValue>>, StreamError>
    where
        F: Fn(&SymValue, &SymValue) -> SymValue,
    {
        let traversal = self.run("reduce", None)?;
        Ok(finish(traversal, |walker| {
            walker.emitted.into_iter().reduce(|acc, v| f(&acc, &v))
        }))
    }

    /// Symbolic sum of the elements
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn sum(self) -> Result<Exploration<SymValue>, StreamError> {
        self.fold(SymValue::int(0), |acc, v| acc.plus(v))
    }

    /// Whether some element satisfies `predicate`
    ///
    /// Stops at the first element satisfying it on each path; an undecided
    /// test forks into "found here" and "keep looking".
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn any_match<F>(self, predicate: F) -> Result<Exploration<bool>, StreamError>
    where
        F: Fn(&SymValue) -> SymValue,
    {
        self.seek("any_match", &predicate, true)
    }

    /// Whether every element satisfies `predicate`
    ///
    /// Stops at the first counterexample on each path.
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn all_match<F>(self, predicate: F) -> Result<Exploration<bool>, StreamError>
    where
        F: Fn(&SymValue) -> SymValue,
    {
        let violated = |v: &SymValue| predicate(v).negate();
        self.seek("all_match", &violated, false)
    }

    /// Whether no element satisfies `predicate`
    ///
    /// # Errors
    /// Returns error on store failure or path budget overrun
    pub fn none_match<F>(self, predicate: F) -> Result<Exploration<bool>, StreamError>
    where
        F: Fn(&SymValue) -> SymValue,
    {
        Ok(self.any_match(predicate)?.map(|found| !found))
    }

    /// Short-circuiting search for an element where `hit` holds; paths that
    /// find one yield `on_hit`, exhausted paths yield `!on_hit`
    fn seek(
        self,
        op: &'static str,
        hit: Stop<'_>,
        on_hit: bool,
    ) -> Result<Exploration<bool>, StreamError> {
        let traversal = self.run(op, Some(hit))?;
        Ok(finish(traversal, |walker| walker.hit == on_hit))
    }

    /// Explore every feasible path through the pipeline
    ///
    /// Walkers that are done leave the frontier at once and pull no further
    /// elements.
    fn run(&self, op: &'static str, stop: Option<Stop<'_>>) -> Result<Traversal, StreamError> {
        let mut finished: Vec<Walker> = Vec::new();
        let mut pass = Pass {
            stages: &self.stages,
            stop,
            branches: 0,
        };
        let mut feasible_cases = 0usize;

        for case in self.source.length_cases()? {
            let condition = match case.constraint {
                Some(constraint) => match PathCondition::new().assume(constraint) {
                    Some(condition) => condition,
                    None => continue,
                },
                None => PathCondition::new(),
            };
            feasible_cases += 1;

            let start = Walker::start(condition, pass.stages);
            if start.done {
                finished.push(start);
                continue;
            }

            let mut frontier = vec![start];
            for index in 0..case.len {
                if frontier.is_empty() {
                    break;
                }
                let element = self.source.get(index)?;
                let mut next = Vec::with_capacity(frontier.len());
                for walker in frontier {
                    walker.advance(element.clone(), 0, &mut pass, &mut next);
                }
                let (done, live): (Vec<Walker>, Vec<Walker>) =
                    next.into_iter().partition(|w| w.done);
                finished.extend(done);
                frontier = live;
                check_budget(op, finished.len() + frontier.len(), self.max_paths)?;
            }
            finished.extend(frontier);
        }

        // Each feasible length beyond the first is one more fork
        let branches = pass.branches + feasible_cases.saturating_sub(1);

        debug!(
            op,
            request = ?self.request,
            stages = self.stages.len(),
            paths = finished.len(),
            branches,
            "pipeline explored"
        );
        Ok(Traversal {
            walkers: finished,
            branches,
        })
    }
}

fn finish<T, F>(traversal: Traversal, mut f: F) -> Exploration<T>
where
    F: FnMut(Walker) -> T,
{
    let outcomes = traversal
        .walkers
        .into_iter()
        .map(|w| PathOutcome::new(w.condition.clone(), f(w)))
        .collect();
    Exploration::new(outcomes, traversal.branches)
}

fn check_budget(op: &'static str, paths: usize, limit: usize) -> Result<(), StreamError> {
    if paths > limit {
        warn!(op, paths, limit, "path budget exceeded");
        return Err(StreamError::PathLimitExceeded { limit });
    }
    Ok(())
}

impl fmt::Debug for SymbolicStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolicStream")
            .field("source_len", &self.source.len())
            .field("stages", &self.stage_names())
            .field("request", &self.request)
            .field("max_paths", &self.max_paths)
            .finish()
    }
}

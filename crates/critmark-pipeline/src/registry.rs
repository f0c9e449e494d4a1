//! Named, orderable stage registry.
//!
//! Stages are registered with a [`Placement`] and the registry turns the
//! placements into one total order when [`Registry::resolve`] is called.
//! After that the order is frozen.

use std::cmp::Reverse;

use crate::error::PipelineError;

/// Where a stage sits in its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Absolute priority. Higher runs first; ties keep registration order.
    Priority(i32),
    /// Directly after the named stage.
    After(&'static str),
    /// Directly before the named stage.
    Before(&'static str),
}

impl Placement {
    fn anchor(self) -> Option<&'static str> {
        match self {
            Self::Priority(_) => None,
            Self::After(anchor) | Self::Before(anchor) => Some(anchor),
        }
    }
}

struct Entry<T: ?Sized> {
    name: &'static str,
    placement: Placement,
    /// Sequence number of the last `register`/`relink` touching this entry.
    link_seq: usize,
    stage: Box<T>,
}

/// Ordered collection of named stages.
///
/// Among stages anchored to the same stage, the most recently linked one
/// ends up closest to the anchor. An extension that re-links itself during
/// finalization therefore claims the slot right next to its anchor even if
/// other extensions registered against the same anchor earlier.
///
/// # Example
///
/// ```
/// use critmark_pipeline::{Placement, Registry};
///
/// let mut registry: Registry<str> = Registry::new("demo");
/// registry.register("first", "a".into(), Placement::Priority(30)).unwrap();
/// registry.register("last", "c".into(), Placement::Priority(10)).unwrap();
/// registry.register("middle", "b".into(), Placement::After("first")).unwrap();
/// registry.resolve().unwrap();
///
/// assert_eq!(registry.names(), ["first", "middle", "last"]);
/// ```
pub struct Registry<T: ?Sized> {
    kind: &'static str,
    entries: Vec<Entry<T>>,
    next_seq: usize,
    order: Option<Vec<usize>>,
}

impl<T: ?Sized> Registry<T> {
    /// Create an empty registry. `kind` names the stage type in log output.
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            next_seq: 0,
            order: None,
        }
    }

    /// Register a stage under a unique name.
    pub fn register(
        &mut self,
        name: &'static str,
        stage: Box<T>,
        placement: Placement,
    ) -> Result<(), PipelineError> {
        self.ensure_open(name)?;
        if self.contains(name) {
            return Err(PipelineError::DuplicateStage(name.to_owned()));
        }

        self.push(name, stage, placement);
        Ok(())
    }

    /// Append a stage without the name and seal checks of [`register`](Self::register).
    pub(crate) fn push(&mut self, name: &'static str, stage: Box<T>, placement: Placement) {
        let link_seq = self.bump_seq();
        self.entries.push(Entry {
            name,
            placement,
            link_seq,
            stage,
        });
    }

    /// Move an already registered stage to a new placement.
    pub fn relink(&mut self, name: &'static str, placement: Placement) -> Result<(), PipelineError> {
        self.ensure_open(name)?;
        let link_seq = self.bump_seq();
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| PipelineError::UnknownStage(name.to_owned()))?;
        entry.placement = placement;
        entry.link_seq = link_seq;
        Ok(())
    }

    /// Check if a stage with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Number of registered stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no stages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the order has been resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.order.is_some()
    }

    /// Resolve placements into the final execution order.
    ///
    /// Calling this again after a successful resolve is a no-op.
    pub fn resolve(&mut self) -> Result<(), PipelineError> {
        if self.order.is_some() {
            return Ok(());
        }

        let mut order: Vec<usize> = (0..self.entries.len())
            .filter(|&idx| self.entries[idx].placement.anchor().is_none())
            .collect();
        // Stable sort keeps registration order for equal priorities
        order.sort_by_key(|&idx| match self.entries[idx].placement {
            Placement::Priority(priority) => Reverse(priority),
            Placement::After(_) | Placement::Before(_) => Reverse(i32::MIN),
        });

        let mut pending: Vec<usize> = (0..self.entries.len())
            .filter(|&idx| self.entries[idx].placement.anchor().is_some())
            .collect();
        pending.sort_by_key(|&idx| self.entries[idx].link_seq);

        // One anchor group per round, oldest link first
        while !pending.is_empty() {
            let placed = |name: &str| order.iter().any(|&o| self.entries[o].name == name);
            let Some(anchor) = pending
                .iter()
                .filter_map(|&idx| self.entries[idx].placement.anchor())
                .find(|anchor| placed(anchor))
            else {
                let entry = &self.entries[pending[0]];
                return Err(PipelineError::UnknownAnchor {
                    stage: entry.name.to_owned(),
                    anchor: entry.placement.anchor().unwrap_or_default().to_owned(),
                });
            };

            let (group, rest): (Vec<usize>, Vec<usize>) = pending
                .iter()
                .partition(|&&idx| self.entries[idx].placement.anchor() == Some(anchor));
            pending = rest;

            for idx in group {
                let Some(pos) = order.iter().position(|&o| self.entries[o].name == anchor) else {
                    continue;
                };
                match self.entries[idx].placement {
                    Placement::After(_) => order.insert(pos + 1, idx),
                    Placement::Before(_) | Placement::Priority(_) => order.insert(pos, idx),
                }
            }
        }

        let names: Vec<&str> = order.iter().map(|&idx| self.entries[idx].name).collect();
        tracing::debug!(kind = self.kind, order = ?names, "Resolved stage order");

        self.order = Some(order);
        Ok(())
    }

    /// Stage names in execution order (registration order until resolved).
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|(name, _)| name).collect()
    }

    /// Iterate stages in execution order (registration order until resolved).
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &T)> + '_ {
        let order = self
            .order
            .clone()
            .unwrap_or_else(|| (0..self.entries.len()).collect());
        order.into_iter().map(move |idx| {
            let entry = &self.entries[idx];
            (entry.name, &*entry.stage)
        })
    }

    fn ensure_open(&self, name: &str) -> Result<(), PipelineError> {
        if self.order.is_some() {
            return Err(PipelineError::Sealed(name.to_owned()));
        }
        Ok(())
    }

    fn bump_seq(&mut self) -> usize {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

//! The assembled chain and the cursor stages use to delegate.

use tracing::debug;

use super::errors::ResolveError;
use super::stage::Stage;
use crate::names::NameSet;
use crate::registry::SourceRegistry;
use crate::value::ConfigValue;

/// Maximum nesting of expression re-entry before resolution fails.
pub const MAX_DEPTH: usize = 32;

pub(crate) struct LinkedStage {
    pub(crate) priority: i32,
    pub(crate) stage: Stage,
}

/// Stages in ascending priority over a source registry.
///
/// The last stage is the outermost. Lookups enter at the end and walk toward
/// index zero, then fall through to the registry.
pub struct Chain {
    stages: Vec<LinkedStage>,
    registry: SourceRegistry,
}

impl Chain {
    pub fn new(registry: SourceRegistry) -> Self {
        Self {
            stages: Vec::new(),
            registry,
        }
    }

    /// Append a stage above every stage already present.
    pub(crate) fn push(&mut self, priority: i32, stage: Stage) {
        debug!(
            event = "core.chain.stage_added",
            stage = stage.name(),
            priority = priority,
            position = self.stages.len()
        );
        self.stages.push(LinkedStage { priority, stage });
    }

    /// Entry point for a fresh lookup.
    pub fn context(&self) -> Context<'_> {
        Context {
            chain: self,
            next: self.stages.len(),
            depth: 0,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Stage names and priorities, outermost first.
    pub fn stages(&self) -> Vec<(&str, i32)> {
        self.stages
            .iter()
            .rev()
            .map(|linked| (linked.stage.name(), linked.priority))
            .collect()
    }
}

/// A position in the chain.
///
/// Each stage receives the context pointing at the stage below it. The
/// context is a plain value: delegating never mutates shared state, so
/// concurrent lookups cannot observe each other.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    chain: &'a Chain,
    next: usize,
    depth: usize,
}

impl<'a> Context<'a> {
    /// Resolve `name` through the remaining stages and then the sources.
    pub fn proceed(&self, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        match self.below() {
            Some((stage, context)) => stage.get_value(&context, name),
            None => Ok(self.chain.registry.resolve(name)?),
        }
    }

    pub fn iterate_names(&self) -> Result<NameSet, ResolveError> {
        match self.below() {
            Some((stage, context)) => stage.iterate_names(&context),
            None => Ok(self.chain.registry.property_names()?),
        }
    }

    pub fn iterate_values(&self) -> Result<Vec<ConfigValue>, ResolveError> {
        match self.below() {
            Some((stage, context)) => stage.iterate_values(&context),
            None => Ok(self.chain.registry.values()?),
        }
    }

    /// A context at the top of the chain, one level deeper.
    ///
    /// Used to resolve references found inside a value, which must see every
    /// stage again.
    pub fn reenter(&self) -> Context<'a> {
        Context {
            chain: self.chain,
            next: self.chain.stages.len(),
            depth: self.depth + 1,
        }
    }

    /// Number of [`reenter`](Self::reenter) calls between the original request and here.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn below(&self) -> Option<(&'a Stage, Context<'a>)> {
        let index = self.next.checked_sub(1)?;
        let context = Context {
            chain: self.chain,
            next: index,
            depth: self.depth,
        };
        Some((&self.chain.stages[index].stage, context))
    }
}

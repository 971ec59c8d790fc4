//! Processor lookup by component type.

use crate::context::{Component, Converter};
use crate::error::ProcessResult;
use crate::processors;
use quasar_style::{Category, ComponentTypeInfo};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;
use visual_node::NodeId;

/// Builds the visual node for one framework element.
pub trait Processor {
    fn build(&self, cx: &mut Converter<'_>, component: &Component<'_>) -> ProcessResult<NodeId>;
}

impl<F> Processor for F
where
    F: Fn(&mut Converter<'_>, &Component<'_>) -> ProcessResult<NodeId>,
{
    fn build(&self, cx: &mut Converter<'_>, component: &Component<'_>) -> ProcessResult<NodeId> {
        self(cx, component)
    }
}

/// Which table a lookup was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Kind,
    Category,
    Generic,
}

/// Processors keyed by `(category, kind)` and by category alone.
///
/// Built once by the caller and passed to every conversion.
pub struct ProcessorRegistry {
    by_kind: FxHashMap<(Category, SmolStr), Box<dyn Processor>>,
    by_category: FxHashMap<Category, Box<dyn Processor>>,
    generic: Box<dyn Processor>,
}

impl ProcessorRegistry {
    /// A registry that renders everything with the generic processor.
    pub fn empty() -> Self {
        Self {
            by_kind: FxHashMap::default(),
            by_category: FxHashMap::default(),
            generic: Box::new(processors::generic::build),
        }
    }

    /// The built-in processors for every known component.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        processors::register_defaults(&mut registry);
        registry
    }

    pub fn register(
        &mut self,
        category: Category,
        kind: &str,
        processor: impl Processor + 'static,
    ) -> &mut Self {
        self.by_kind
            .insert((category, SmolStr::new(kind)), Box::new(processor));
        self
    }

    pub fn register_category(
        &mut self,
        category: Category,
        processor: impl Processor + 'static,
    ) -> &mut Self {
        self.by_category.insert(category, Box::new(processor));
        self
    }

    pub fn set_generic(&mut self, processor: impl Processor + 'static) -> &mut Self {
        self.generic = Box::new(processor);
        self
    }

    pub fn lookup(&self, info: &ComponentTypeInfo) -> (&dyn Processor, Resolution) {
        if let Some(p) = self.by_kind.get(&(info.category, info.kind.clone())) {
            return (p.as_ref(), Resolution::Kind);
        }
        if let Some(p) = self.by_category.get(&info.category) {
            return (p.as_ref(), Resolution::Category);
        }
        (self.generic.as_ref(), Resolution::Generic)
    }

    pub fn generic(&self) -> &dyn Processor {
        self.generic.as_ref()
    }

    pub fn kind_count(&self) -> usize {
        self.by_kind.len()
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .by_kind
            .keys()
            .map(|(category, kind)| format!("{category}/{kind}"))
            .collect();
        kinds.sort();
        let mut categories: Vec<_> = self.by_category.keys().map(|c| c.as_str()).collect();
        categories.sort();
        f.debug_struct("ProcessorRegistry")
            .field("kinds", &kinds)
            .field("categories", &categories)
            .finish_non_exhaustive()
    }
}

//! Incremental construction of a dependency graph from a seed entity
//!
//! The builder walks entities breadth-first, asking an [`Introspector`] for
//! the dependencies of each in-scope entity and recording one edge per
//! accepted dependency. Scope is decided by a [`Validator`].

use crate::DirectedGraph;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// Source of the direct dependencies of an entity
pub trait Introspector<N> {
    fn dependencies(&mut self, entity: &N) -> HashSet<N>;
}

// Blanket implementation for closures
impl<N, F> Introspector<N> for F
where
    F: FnMut(&N) -> HashSet<N>,
{
    fn dependencies(&mut self, entity: &N) -> HashSet<N> {
        self(entity)
    }
}

// Lookup table, unknown entities have no dependencies
impl<N: Eq + Hash + Clone> Introspector<N> for HashMap<N, HashSet<N>> {
    fn dependencies(&mut self, entity: &N) -> HashSet<N> {
        self.get(entity).cloned().unwrap_or_default()
    }
}

/// Union of several introspectors
///
/// Each facet reports one kind of dependency (constructor arguments, fields,
/// base types...) and the combined set is deduplicated.
pub struct Facets<N> {
    facets: Vec<Box<dyn Introspector<N>>>,
}

impl<N> Default for Facets<N> {
    fn default() -> Self {
        Self { facets: Vec::new() }
    }
}

impl<N> Facets<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, facet: impl Introspector<N> + 'static) -> Self {
        self.facets.push(Box::new(facet));
        self
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

impl<N: Eq + Hash> Introspector<N> for Facets<N> {
    fn dependencies(&mut self, entity: &N) -> HashSet<N> {
        self.facets
            .iter_mut()
            .flat_map(|facet| facet.dependencies(entity))
            .collect()
    }
}

/// Decides whether an entity is in scope
pub trait Validator<N> {
    fn is_valid(&self, entity: &N) -> bool;
}

// Blanket implementation for closures
impl<N, F> Validator<N> for F
where
    F: Fn(&N) -> bool,
{
    fn is_valid(&self, entity: &N) -> bool {
        self(entity)
    }
}

/// Accepts every entity
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl<N> Validator<N> for AcceptAll {
    fn is_valid(&self, _entity: &N) -> bool {
        true
    }
}

/// Accepts exactly the listed entities
#[derive(Debug, Clone)]
pub struct AllowList<N>(HashSet<N>);

impl<N: Eq + Hash> AllowList<N> {
    pub fn new(allowed: impl IntoIterator<Item = N>) -> Self {
        Self(allowed.into_iter().collect())
    }
}

impl<N: Eq + Hash> FromIterator<N> for AllowList<N> {
    fn from_iter<I: IntoIterator<Item = N>>(allowed: I) -> Self {
        Self::new(allowed)
    }
}

impl<N: Eq + Hash> Validator<N> for AllowList<N> {
    fn is_valid(&self, entity: &N) -> bool {
        self.0.contains(entity)
    }
}

/// Destination of the nodes and edges discovered by the builder
pub trait GraphSink<N> {
    fn add_node(&mut self, node: N);
    fn add_edge(&mut self, from: N, to: N);
}

impl<N: Clone + Eq + Hash> GraphSink<N> for DirectedGraph<N> {
    fn add_node(&mut self, node: N) {
        DirectedGraph::add_node(self, node);
    }

    fn add_edge(&mut self, from: N, to: N) {
        DirectedGraph::add_edge(self, from, to);
    }
}

/// Breadth-first dependency discovery
///
/// Every distinct in-scope entity reachable from the start is introspected
/// exactly once. Out-of-scope entities are never introspected and never
/// appear in the output. Cycles and self-dependencies are recorded as edges.
pub struct DependencyGraphBuilder<I, V> {
    introspector: I,
    validator: V,
}

impl<I, V> DependencyGraphBuilder<I, V> {
    pub fn new(introspector: I, validator: V) -> Self {
        Self {
            introspector,
            validator,
        }
    }

    pub fn into_parts(self) -> (I, V) {
        (self.introspector, self.validator)
    }

    /// Discover dependencies of `start`, recording them into `graph`
    ///
    /// Returns the introspected entities in the order they were expanded. An
    /// out-of-scope start entity yields an empty result and leaves `graph`
    /// untouched.
    pub fn build_into<N, G>(&mut self, start: N, graph: &mut G) -> Vec<N>
    where
        N: Clone + Eq + Hash + fmt::Debug,
        I: Introspector<N>,
        V: Validator<N>,
        G: GraphSink<N>,
    {
        debug!(?start, "Building dependency graph");

        let mut visited = HashSet::new();
        let mut expanded = Vec::new();
        let mut queue = VecDeque::from([start]);
        let mut edges = 0usize;

        while let Some(entity) = queue.pop_front() {
            // Duplicates may be queued, they are filtered here
            if visited.contains(&entity) || !self.validator.is_valid(&entity) {
                continue;
            }
            visited.insert(entity.clone());
            graph.add_node(entity.clone());

            let dependencies = self.introspector.dependencies(&entity);
            trace!(?entity, count = dependencies.len(), "Introspected entity");

            for dependency in dependencies {
                if !self.validator.is_valid(&dependency) {
                    continue;
                }
                graph.add_edge(entity.clone(), dependency.clone());
                queue.push_back(dependency);
                edges += 1;
            }

            expanded.push(entity);
        }

        debug!(
            entities = expanded.len(),
            edges, "Finished building dependency graph"
        );
        expanded
    }

    /// Discover dependencies of `start` into a fresh graph
    pub fn build<N>(&mut self, start: N) -> DirectedGraph<N>
    where
        N: Clone + Eq + Hash + fmt::Debug,
        I: Introspector<N>,
        V: Validator<N>,
    {
        let mut graph = DirectedGraph::new();
        self.build_into(start, &mut graph);
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    /// Table-backed introspector that counts how often each entity is asked
    #[derive(Default)]
    struct Recording {
        table: HashMap<&'static str, HashSet<&'static str>>,
        calls: HashMap<&'static str, usize>,
    }

    impl Recording {
        fn with(mut self, entity: &'static str, deps: &[&'static str]) -> Self {
            self.table.insert(entity, deps.iter().copied().collect());
            self
        }

        fn calls(&self, entity: &str) -> usize {
            self.calls.get(entity).copied().unwrap_or(0)
        }
    }

    impl Introspector<&'static str> for Recording {
        fn dependencies(&mut self, entity: &&'static str) -> HashSet<&'static str> {
            *self.calls.entry(*entity).or_default() += 1;
            self.table.dependencies(entity)
        }
    }

    /// Records every sink call, duplicates included
    #[derive(Default)]
    struct Calls {
        nodes: Vec<&'static str>,
        edges: Vec<(&'static str, &'static str)>,
    }

    impl GraphSink<&'static str> for Calls {
        fn add_node(&mut self, node: &'static str) {
            self.nodes.push(node);
        }

        fn add_edge(&mut self, from: &'static str, to: &'static str) {
            self.edges.push((from, to));
        }
    }

    fn allow(entities: &[&'static str]) -> AllowList<&'static str> {
        entities.iter().copied().collect()
    }

    #[test]
    fn test_invalid_start_is_not_introspected() {
        let mut builder = DependencyGraphBuilder::new(Recording::default(), allow(&[]));
        let mut sink = Calls::default();

        let expanded = builder.build_into("A", &mut sink);

        assert!(expanded.is_empty());
        assert!(sink.nodes.is_empty());
        assert!(sink.edges.is_empty());
        let (introspector, _) = builder.into_parts();
        assert_eq!(introspector.calls("A"), 0);
    }

    #[test]
    fn test_valid_start_is_introspected_once() {
        let mut builder = DependencyGraphBuilder::new(Recording::default(), allow(&["A"]));

        let graph = builder.build("A");

        assert_eq!(graph.nodes(), &["A"]);
        assert_eq!(graph.edge_count(), 0);
        let (introspector, _) = builder.into_parts();
        assert_eq!(introspector.calls("A"), 1);
    }

    #[test]
    fn test_invalid_dependency_adds_no_edge() {
        let introspector = Recording::default().with("A", &["B"]);
        let mut builder = DependencyGraphBuilder::new(introspector, allow(&["A"]));
        let mut sink = Calls::default();

        builder.build_into("A", &mut sink);

        assert!(sink.edges.is_empty());
        let (introspector, _) = builder.into_parts();
        assert_eq!(introspector.calls("A"), 1);
        assert_eq!(introspector.calls("B"), 0);
    }

    #[test]
    fn test_valid_dependency_adds_edge() {
        let introspector = Recording::default().with("A", &["B"]);
        let mut builder = DependencyGraphBuilder::new(introspector, allow(&["A", "B"]));
        let mut sink = Calls::default();

        let expanded = builder.build_into("A", &mut sink);

        assert_eq!(expanded, vec!["A", "B"]);
        assert_eq!(sink.edges, vec![("A", "B")]);
        let (introspector, _) = builder.into_parts();
        assert_eq!(introspector.calls("A"), 1);
        assert_eq!(introspector.calls("B"), 1);
    }

    #[test]
    fn test_fan_out() {
        let introspector = Recording::default().with("A", &["B", "C", "D", "E"]);
        let mut builder =
            DependencyGraphBuilder::new(introspector, allow(&["A", "B", "C", "D", "E"]));

        let graph = builder.build("A");

        let mut edges = graph.edges();
        edges.sort_unstable();
        assert_eq!(edges, vec![("A", "B"), ("A", "C"), ("A", "D"), ("A", "E")]);
        let (introspector, _) = builder.into_parts();
        for entity in ["A", "B", "C", "D", "E"] {
            assert_eq!(introspector.calls(entity), 1, "{entity}");
        }
    }

    #[test]
    fn test_circular_dependency_adds_both_edges() {
        let introspector = Recording::default().with("A", &["B"]).with("B", &["A"]);
        let mut builder = DependencyGraphBuilder::new(introspector, allow(&["A", "B"]));
        let mut sink = Calls::default();

        builder.build_into("A", &mut sink);

        assert_eq!(sink.edges, vec![("A", "B"), ("B", "A")]);
        let (introspector, _) = builder.into_parts();
        assert_eq!(introspector.calls("A"), 1);
        assert_eq!(introspector.calls("B"), 1);
    }

    #[test]
    fn test_self_dependency_adds_self_loop() {
        let introspector = Recording::default().with("A", &["A"]);
        let mut builder = DependencyGraphBuilder::new(introspector, allow(&["A"]));
        let mut sink = Calls::default();

        builder.build_into("A", &mut sink);

        assert_eq!(sink.edges, vec![("A", "A")]);
        let (introspector, _) = builder.into_parts();
        assert_eq!(introspector.calls("A"), 1);
    }

    #[test]
    fn test_shared_dependency_is_introspected_once() {
        let introspector = Recording::default()
            .with("A", &["B", "C"])
            .with("B", &["D"])
            .with("C", &["D"])
            .with("D", &["E"]);
        let mut builder = DependencyGraphBuilder::new(introspector, AcceptAll);

        let graph = builder.build("A");

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.contains_edge(&"B", &"D"));
        assert!(graph.contains_edge(&"C", &"D"));
        assert!(graph.contains_edge(&"D", &"E"));
        let (introspector, _) = builder.into_parts();
        for entity in ["A", "B", "C", "D", "E"] {
            assert_eq!(introspector.calls(entity), 1, "{entity}");
        }
    }

    #[test]
    fn test_closure_capabilities() {
        let introspect = |entity: &u32| -> HashSet<u32> {
            [entity * 2, entity * 3].into_iter().collect()
        };
        let in_scope = |entity: &u32| *entity < 20;
        let mut builder = DependencyGraphBuilder::new(introspect, in_scope);

        let graph = builder.build(1u32);

        assert!(graph.contains_edge(&1, &2));
        assert!(graph.contains_edge(&6, &12));
        assert!(graph.contains_edge(&6, &18));
        assert!(!graph.contains_node(&24));
        assert!(graph.nodes().iter().all(|node| *node < 20));
    }

    #[test]
    fn test_facets_are_merged() {
        let fields: HashMap<_, HashSet<_>> = [("A", ["B"].into())].into();
        let bases: HashMap<_, HashSet<_>> = [("A", ["B", "C"].into())].into();
        let mut facets = Facets::new().with(fields).with(bases);
        assert_eq!(facets.len(), 2);

        let dependencies = facets.dependencies(&"A");

        assert_eq!(dependencies, HashSet::from(["B", "C"]));
        assert!(facets.dependencies(&"Z").is_empty());
    }
}

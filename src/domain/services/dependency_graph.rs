//! Dependency graph
//!
//! Parts connected by "runs after" edges. Pure in-memory structure; nothing
//! here touches the filesystem.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::domain::entities::Project;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Circular dependency chain found in parts definition: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("The part named '{part}' runs after '{dependency}', which is not defined")]
    UnknownDependency { part: String, dependency: String },
}

/// A part that depends on another, with how many edges separate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependent {
    pub name: String,
    /// 1 for a direct dependent.
    pub distance: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// part -> parts it runs after
    dependencies: BTreeMap<String, BTreeSet<String>>,
    /// part -> parts that run after it
    dependents: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Build the graph from `(part, after)` pairs.
    ///
    /// Fails if an `after` entry names an unknown part or the edges form a
    /// cycle.
    pub fn build<'a, I>(parts: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (&'a str, &'a BTreeSet<String>)>,
    {
        let mut graph = Self::default();
        for (name, after) in parts {
            graph
                .dependencies
                .insert(name.to_string(), after.iter().cloned().collect());
            graph.dependents.entry(name.to_string()).or_default();
        }

        for (name, after) in &graph.dependencies {
            for dependency in after {
                if !graph.dependents.contains_key(dependency) {
                    return Err(GraphError::UnknownDependency {
                        part: name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let edges: Vec<(String, String)> = graph
            .dependencies
            .iter()
            .flat_map(|(name, after)| after.iter().map(move |dep| (dep.clone(), name.clone())))
            .collect();
        for (dependency, dependent) in edges {
            graph
                .dependents
                .entry(dependency)
                .or_default()
                .insert(dependent);
        }

        graph.detect_cycles()?;
        Ok(graph)
    }

    pub fn for_project(project: &Project) -> Result<Self, GraphError> {
        Self::build(project.parts().map(|p| (p.name(), p.after())))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    /// Parts `name` runs after.
    pub fn dependencies(&self, name: &str) -> impl Iterator<Item = &str> {
        self.dependencies
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Parts that run directly after `name`.
    pub fn direct_dependents(&self, name: &str) -> impl Iterator<Item = &str> {
        self.dependents
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Every part reachable from `name` by following edges in reverse.
    ///
    /// Ordered by distance, then name. Each dependent appears once, at its
    /// shortest distance.
    pub fn transitive_dependents(&self, name: &str) -> Vec<Dependent> {
        let mut seen = BTreeSet::from([name.to_string()]);
        let mut queue = VecDeque::from([(name.to_string(), 0usize)]);
        let mut found = Vec::new();

        while let Some((current, distance)) = queue.pop_front() {
            for dependent in self.direct_dependents(&current) {
                if seen.insert(dependent.to_string()) {
                    found.push(Dependent {
                        name: dependent.to_string(),
                        distance: distance + 1,
                    });
                    queue.push_back((dependent.to_string(), distance + 1));
                }
            }
        }

        found.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.name.cmp(&b.name)));
        found
    }

    /// Every part `name` runs after, directly or not, sorted by name.
    pub fn transitive_dependencies(&self, name: &str) -> BTreeSet<&str> {
        let mut found = BTreeSet::new();
        let mut stack: Vec<&str> = self.dependencies(name).collect();
        while let Some(current) = stack.pop() {
            if found.insert(current) {
                stack.extend(self.dependencies(current));
            }
        }
        found
    }

    /// Topological order, dependencies first; ties broken by name.
    pub fn build_order(&self) -> Vec<&str> {
        let mut remaining: BTreeMap<&str, usize> = self
            .dependencies
            .iter()
            .map(|(name, after)| (name.as_str(), after.len()))
            .collect();
        let mut ready: BTreeSet<&str> = remaining
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut order = Vec::with_capacity(remaining.len());

        while let Some(next) = ready.pop_first() {
            remaining.remove(next);
            order.push(next);
            for dependent in self.direct_dependents(next) {
                if let Some(count) = remaining.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        order
    }

    fn detect_cycles(&self) -> Result<(), GraphError> {
        let mut visited = BTreeSet::new();
        let mut rec_stack = BTreeSet::new();
        let mut path = Vec::new();

        for name in self.dependencies.keys() {
            if !visited.contains(name) {
                if let Some(cycle) = self.dfs_cycle(name, &mut visited, &mut rec_stack, &mut path) {
                    return Err(GraphError::CyclicDependency { cycle });
                }
            }
        }
        Ok(())
    }

    fn dfs_cycle(
        &self,
        node: &str,
        visited: &mut BTreeSet<String>,
        rec_stack: &mut BTreeSet<String>,
        path: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        visited.insert(node.to_string());
        rec_stack.insert(node.to_string());
        path.push(node.to_string());

        for dep in self.dependencies(node) {
            if !visited.contains(dep) {
                if let Some(cycle) = self.dfs_cycle(dep, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(dep) {
                if let Some(start) = path.iter().position(|n| n == dep) {
                    let mut cycle = path[start..].to_vec();
                    cycle.push(dep.to_string());
                    return Some(cycle);
                }
            }
        }

        path.pop();
        rec_stack.remove(node);
        None
    }
}

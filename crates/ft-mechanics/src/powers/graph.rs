//! Prerequisite graph over the power catalog.
//!
//! Built once when the rules load. Edges point from a power to the powers
//! that require it, so cascading removal is a breadth-first walk.

use std::collections::{HashMap, HashSet, VecDeque};

use ft_core::{CatalogError, CatalogResult, PowerDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Power prerequisites and their reverse edges.
#[derive(Debug, Clone, Default)]
pub struct PowerGraph {
    prerequisites: HashMap<String, Vec<String>>,
    dependents: HashMap<String, Vec<String>>,
}

impl PowerGraph {
    /// Build the graph, rejecting unknown prerequisite ids and cycles.
    pub fn build(powers: &[PowerDefinition]) -> CatalogResult<Self> {
        let mut graph = Self::default();
        for power in powers {
            graph
                .prerequisites
                .insert(power.id.clone(), power.prerequisites.powers.clone());
            graph.dependents.entry(power.id.clone()).or_default();
        }

        for power in powers {
            for required in &power.prerequisites.powers {
                let Some(dependents) = graph.dependents.get_mut(required) else {
                    return Err(CatalogError::UnknownReference {
                        owner: format!("power \"{}\"", power.id),
                        kind: "power",
                        id: required.clone(),
                    });
                };
                if !dependents.contains(&power.id) {
                    dependents.push(power.id.clone());
                }
            }
        }

        let mut marks = HashMap::new();
        for power in powers {
            let mut path = Vec::new();
            graph.visit(&power.id, &mut marks, &mut path)?;
        }

        Ok(graph)
    }

    fn visit(
        &self,
        id: &str,
        marks: &mut HashMap<String, Mark>,
        path: &mut Vec<String>,
    ) -> CatalogResult<()> {
        match marks.get(id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|p| p == id).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(id.to_string());
                return Err(CatalogError::DependencyCycle(cycle));
            }
            None => {}
        }

        marks.insert(id.to_string(), Mark::Visiting);
        path.push(id.to_string());
        for required in self.prerequisites_of(id) {
            self.visit(required, marks, path)?;
        }
        path.pop();
        marks.insert(id.to_string(), Mark::Done);
        Ok(())
    }

    /// Returns true if the power is in the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.prerequisites.contains_key(id)
    }

    /// Number of powers.
    pub fn len(&self) -> usize {
        self.prerequisites.len()
    }

    /// Returns true if the graph has no powers.
    pub fn is_empty(&self) -> bool {
        self.prerequisites.is_empty()
    }

    /// Powers that `id` requires directly.
    pub fn prerequisites_of(&self, id: &str) -> &[String] {
        self.prerequisites.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Powers that require `id` directly.
    pub fn direct_dependents(&self, id: &str) -> &[String] {
        self.dependents.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every power that requires `id`, directly or through other powers,
    /// nearest first. Does not include `id`.
    pub fn dependents_of(&self, id: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue = VecDeque::new();
        let mut out = Vec::new();

        seen.insert(id);
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            for dependent in self.direct_dependents(current) {
                if seen.insert(dependent.as_str()) {
                    out.push(dependent.clone());
                    queue.push_back(dependent.as_str());
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::PowerKind;

    fn power(id: &str) -> PowerDefinition {
        PowerDefinition::new(id, id.to_uppercase(), PowerKind::Manual, "combate")
    }

    #[test]
    fn chain_dependents_are_transitive() {
        let powers = vec![
            power("p"),
            power("q").requires("p"),
            power("r").requires("q"),
            power("s"),
        ];
        let graph = PowerGraph::build(&powers).unwrap();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.dependents_of("p"), vec!["q", "r"]);
        assert_eq!(graph.dependents_of("q"), vec!["r"]);
        assert!(graph.dependents_of("r").is_empty());
        assert!(graph.dependents_of("s").is_empty());
        assert_eq!(graph.prerequisites_of("r"), ["q".to_string()]);
    }

    #[test]
    fn diamond_lists_each_dependent_once() {
        let powers = vec![
            power("a"),
            power("b").requires("a"),
            power("c").requires("a"),
            power("d").requires("b").requires("c"),
        ];
        let graph = PowerGraph::build(&powers).unwrap();
        assert_eq!(graph.dependents_of("a"), vec!["b", "c", "d"]);
    }

    #[test]
    fn unknown_prerequisite_is_rejected() {
        let powers = vec![power("a").requires("ghost")];
        let err = PowerGraph::build(&powers).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownReference { kind: "power", .. }));
    }

    #[test]
    fn cycle_is_rejected_with_its_path() {
        let powers = vec![
            power("a").requires("c"),
            power("b").requires("a"),
            power("c").requires("b"),
        ];
        let err = PowerGraph::build(&powers).unwrap_err();
        let CatalogError::DependencyCycle(path) = err else {
            panic!("expected a cycle, got {err:?}");
        };
        assert_eq!(path.first(), path.last());
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let powers = vec![power("a").requires("a")];
        assert!(matches!(
            PowerGraph::build(&powers),
            Err(CatalogError::DependencyCycle(_))
        ));
    }

    #[test]
    fn unknown_ids_have_no_edges() {
        let graph = PowerGraph::build(&[power("a")]).unwrap();
        assert!(!graph.contains("zzz"));
        assert!(graph.dependents_of("zzz").is_empty());
        assert!(graph.prerequisites_of("zzz").is_empty());
    }
}

//! Prerequisite ordering for chapter units.
//!
//! Units are displayed so that every unit comes after its prerequisite.
//! Among units whose prerequisites are satisfied, lower `position` wins,
//! then lower ID. Cycles and dangling prerequisites are rejected instead
//! of being rendered in an arbitrary order.

use std::collections::HashMap;
use std::convert::Infallible;

use rustworkx_core::dag_algo::{TopologicalSortError, lexicographical_topological_sort};
use rustworkx_core::petgraph::algo::tarjan_scc;
use rustworkx_core::petgraph::graph::{DiGraph, NodeIndex};

use crate::entities::Unit;
use crate::errors::CoreError;

/// Order units so that each follows its prerequisite.
///
/// # Errors
///
/// - [`CoreError::Validation`] if two units share an ID.
/// - [`CoreError::UnknownPrerequisite`] if a prerequisite is not in `units`.
/// - [`CoreError::PrerequisiteCycle`] if prerequisites form a cycle
///   (including a unit requiring itself).
pub fn order_units(units: &[Unit]) -> Result<Vec<Unit>, CoreError> {
    let graph = prerequisite_graph(units)?;

    let sorted = match lexicographical_topological_sort(
        &graph,
        |node| {
            let unit = &units[graph[node]];
            Ok::<_, Infallible>((unit.position, unit.id))
        },
        false,
        None,
    ) {
        Ok(sorted) => sorted,
        Err(TopologicalSortError::KeyError(never)) => match never {},
        Err(TopologicalSortError::CycleOrBadInitialState) => {
            return Err(CoreError::PrerequisiteCycle {
                unit_id: lowest_id_in_cycle(&graph, units),
            });
        }
    };

    Ok(sorted.into_iter().map(|node| units[graph[node]].clone()).collect())
}

/// Node weights are indices into `units`; edges run prerequisite -> dependent.
fn prerequisite_graph(units: &[Unit]) -> Result<DiGraph<usize, ()>, CoreError> {
    let mut graph = DiGraph::with_capacity(units.len(), units.len());
    let mut node_by_id: HashMap<i64, NodeIndex> = HashMap::with_capacity(units.len());
    for (idx, unit) in units.iter().enumerate() {
        let node = graph.add_node(idx);
        if node_by_id.insert(unit.id, node).is_some() {
            return Err(CoreError::Validation(format!("duplicate unit id {}", unit.id)));
        }
    }

    for unit in units {
        let Some(prerequisite_id) = unit.prerequisite_id else {
            continue;
        };
        let Some(&prerequisite) = node_by_id.get(&prerequisite_id) else {
            return Err(CoreError::UnknownPrerequisite {
                unit_id: unit.id,
                prerequisite_id,
            });
        };
        graph.add_edge(prerequisite, node_by_id[&unit.id], ());
    }
    Ok(graph)
}

fn lowest_id_in_cycle(graph: &DiGraph<usize, ()>, units: &[Unit]) -> i64 {
    tarjan_scc(graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || graph.contains_edge(component[0], component[0])
        })
        .flatten()
        .map(|node| units[graph[node]].id)
        .min()
        .unwrap_or_default()
}

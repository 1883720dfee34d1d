//! Collapses variable aliases into literal values.
//!
//! A variable whose whole value is `{{ other }}` takes the value of `other`.
//! Aliases may chain (`a -> b -> c`); they are resolved in dependency order
//! so every alias sees an already-resolved target. Placeholders embedded in
//! longer values are left alone here and expanded at substitution time.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::Variables;
use super::substitutor::alias_target;
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current traversal path
    InProgress,
    /// All dependencies already ordered
    Done,
}

/// Alias edges `variable -> target`. A variable aliases at most one other.
fn reference_graph(vars: &Variables) -> BTreeMap<String, String> {
    vars.iter()
        .filter_map(|(name, value)| {
            alias_target(value).map(|target| (name.to_string(), target.to_string()))
        })
        .collect()
}

/// Depth-first post-order over the alias graph: every variable comes after
/// the variable it aliases.
fn resolution_order(graph: &BTreeMap<String, String>) -> Result<Vec<&str>> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut order = Vec::with_capacity(graph.len());

    for start in graph.keys() {
        if marks.contains_key(start.as_str()) {
            continue;
        }

        // Out-degree is at most one, so the DFS is a walk down a chain.
        let mut path: Vec<&str> = Vec::new();
        let mut node = Some(start.as_str());

        while let Some(current) = node {
            match marks.get(current) {
                Some(Mark::InProgress) => {
                    let begin = path.iter().position(|n| *n == current).unwrap_or(0);
                    let participants = path[begin..].iter().map(|n| n.to_string()).collect();
                    return Err(Error::CyclicReference { participants });
                }
                Some(Mark::Done) => break,
                None => {
                    marks.insert(current, Mark::InProgress);
                    path.push(current);
                    node = graph.get(current).map(String::as_str);
                }
            }
        }

        while let Some(finished) = path.pop() {
            marks.insert(finished, Mark::Done);
            order.push(finished);
        }
    }

    Ok(order)
}

/// Resolves every alias in `vars` to the literal value it ultimately points at.
///
/// An alias to a variable that is not defined resolves to the empty string.
/// Alias loops are reported as [`Error::CyclicReference`].
///
/// # Examples
/// ```
/// use arti::core::variables::{Variables, resolve};
///
/// let vars: Variables = [("a", "{{ b }}"), ("b", "{{c}}"), ("c", "lit")]
///     .into_iter()
///     .collect();
/// let resolved = resolve(vars).unwrap();
///
/// assert_eq!(resolved.get("a"), Some("lit"));
/// assert_eq!(resolved.get("b"), Some("lit"));
/// ```
pub fn resolve(mut vars: Variables) -> Result<Variables> {
    let graph = reference_graph(&vars);
    if graph.is_empty() {
        return Ok(vars);
    }

    let order = resolution_order(&graph)?;
    debug!(order = ?order, "Resolving variable aliases");

    for name in order {
        let Some(target) = graph.get(name) else {
            continue;
        };
        let value = vars.get(target).unwrap_or_default().to_string();
        debug!(variable = name, target = %target, value = %value, "Resolved alias");
        vars.set(name, value);
    }

    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_resolve_simple_alias() {
        let resolved = resolve(vars(&[("a", "{{b}}"), ("b", "lit")])).unwrap();
        assert_eq!(resolved, vars(&[("a", "lit"), ("b", "lit")]));
    }

    #[test]
    fn test_resolve_chain_in_any_order() {
        // Names sort against the chain direction so order can't come for free.
        let table = vars(&[
            ("a", "{{b}}"),
            ("b", "{{ c }}"),
            ("c", "{{d}}"),
            ("d", "{{e}}"),
            ("e", "end"),
        ]);
        let resolved = resolve(table).unwrap();
        for name in ["a", "b", "c", "d", "e"] {
            assert_eq!(resolved.get(name), Some("end"), "variable {name}");
        }

        let reversed = vars(&[
            ("e", "{{d}}"),
            ("d", "{{c}}"),
            ("c", "{{b}}"),
            ("b", "{{a}}"),
            ("a", "start"),
        ]);
        let resolved = resolve(reversed).unwrap();
        for name in ["a", "b", "c", "d", "e"] {
            assert_eq!(resolved.get(name), Some("start"), "variable {name}");
        }
    }

    #[test]
    fn test_resolve_shared_target() {
        let resolved =
            resolve(vars(&[("x", "{{name}}"), ("y", "{{name}}"), ("name", "Proj")])).unwrap();
        assert_eq!(resolved.get("x"), Some("Proj"));
        assert_eq!(resolved.get("y"), Some("Proj"));
    }

    #[test]
    fn test_resolve_alias_to_unknown_is_empty() {
        let resolved = resolve(vars(&[("a", "{{ghost}}")])).unwrap();
        assert_eq!(resolved.get("a"), Some(""));
        assert!(!resolved.contains("ghost"));
    }

    #[test]
    fn test_resolve_leaves_embedded_placeholders() {
        let table = vars(&[("greeting", "Hello {{name}}"), ("name", "World")]);
        let resolved = resolve(table.clone()).unwrap();
        assert_eq!(resolved, table);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let table = vars(&[("a", "1"), ("b", "two"), ("c", "x {{a}} y")]);
        let once = resolve(table.clone()).unwrap();
        assert_eq!(once, table);
        assert_eq!(resolve(once.clone()).unwrap(), once);
    }

    #[test]
    fn test_resolve_detects_two_node_cycle() {
        let err = resolve(vars(&[("a", "{{b}}"), ("b", "{{a}}")])).unwrap_err();
        match err {
            Error::CyclicReference { participants } => {
                assert_eq!(participants, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("expected cyclic reference, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_detects_self_reference() {
        let err = resolve(vars(&[("a", "{{ a }}")])).unwrap_err();
        assert!(matches!(err, Error::CyclicReference { participants } if participants == ["a"]));
    }

    #[test]
    fn test_resolve_cycle_reached_through_tail() {
        let err = resolve(vars(&[
            ("a", "{{b}}"),
            ("b", "{{c}}"),
            ("c", "{{d}}"),
            ("d", "{{b}}"),
        ]))
        .unwrap_err();
        match err {
            Error::CyclicReference { participants } => {
                assert_eq!(participants, vec!["b", "c", "d"]);
            }
            other => panic!("expected cyclic reference, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_long_chain_does_not_overflow() {
        let mut table = Variables::new();
        for i in 0..10_000 {
            table.insert(format!("v{i}"), format!("{{{{v{}}}}}", i + 1));
        }
        table.insert("v10000", "bottom");
        let resolved = resolve(table).unwrap();
        assert_eq!(resolved.get("v0"), Some("bottom"));
        assert_eq!(resolved.get("v9999"), Some("bottom"));
    }
}

//! Hierarchy rules for places attached to a plan.
//!
//! Entries form a forest through `parent_id` (country -> city -> place is the
//! usual shape). Chains are at most [`MAX_DEPTH`] entries long.

use std::collections::{HashMap, HashSet, VecDeque};

use uuid::Uuid;

use crate::domain::entities::PlanPlace;

/// Longest allowed chain from a root entry down to a leaf, both included.
pub const MAX_DEPTH: usize = 32;

/// An entry with its nested children.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanPlaceNode {
    pub entry: PlanPlace,
    pub children: Vec<PlanPlaceNode>,
}

/// Domain service for plan place hierarchies.
pub struct PlaceHierarchy;

impl PlaceHierarchy {
    /// Nest entries under their parents.
    ///
    /// Entries whose parent is missing from `entries` become roots. Siblings
    /// keep the order they had in `entries`. Entries that would sit deeper
    /// than [`MAX_DEPTH`] start new roots, so nesting stays bounded even for
    /// rows written before the limit existed.
    pub fn build_tree(entries: Vec<PlanPlace>) -> Vec<PlanPlaceNode> {
        let ids: HashSet<Uuid> = entries.iter().map(|e| e.id).collect();
        let mut children: HashMap<Uuid, Vec<PlanPlace>> = HashMap::new();
        let mut roots = VecDeque::new();

        for entry in entries {
            match entry.parent_id {
                Some(parent) if parent != entry.id && ids.contains(&parent) => {
                    children.entry(parent).or_default().push(entry)
                }
                _ => roots.push_back(entry),
            }
        }

        let mut forest = Vec::new();
        loop {
            while let Some(entry) = roots.pop_front() {
                let mut cut = Vec::new();
                forest.push(Self::attach(entry, 1, &mut children, &mut cut));
                roots.extend(cut);
            }

            // Whatever is left was only reachable through a cycle
            let Some(&parent) = children.keys().min() else {
                break;
            };
            if let Some(group) = children.remove(&parent) {
                roots.extend(group);
            }
        }

        forest
    }

    /// Recursion depth is bounded by [`MAX_DEPTH`]; deeper entries go to `cut`.
    fn attach(
        entry: PlanPlace,
        depth: usize,
        children: &mut HashMap<Uuid, Vec<PlanPlace>>,
        cut: &mut Vec<PlanPlace>,
    ) -> PlanPlaceNode {
        let kids = children.remove(&entry.id).unwrap_or_default();
        if depth >= MAX_DEPTH {
            cut.extend(kids);
            return PlanPlaceNode {
                entry,
                children: Vec::new(),
            };
        }

        PlanPlaceNode {
            children: kids
                .into_iter()
                .map(|kid| Self::attach(kid, depth + 1, children, cut))
                .collect(),
            entry,
        }
    }

    /// Entries on the path from the root down to `id`, both included.
    ///
    /// Returns 0 when `id` is not in `entries`. A parent cycle stops the walk.
    pub fn depth_of(entries: &[PlanPlace], id: Uuid) -> usize {
        let parents: HashMap<Uuid, Option<Uuid>> =
            entries.iter().map(|e| (e.id, e.parent_id)).collect();

        let mut depth = 0;
        let mut seen = HashSet::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if !seen.insert(node) {
                break;
            }
            match parents.get(&node) {
                Some(parent) => {
                    depth += 1;
                    current = *parent;
                }
                None => break,
            }
        }
        depth
    }

    /// Levels in the subtree rooted at `root`, the root itself counting as one.
    pub fn height_of(entries: &[PlanPlace], root: Uuid) -> usize {
        let by_parent = Self::children_by_parent(entries);

        let mut height = 0;
        let mut seen = HashSet::from([root]);
        let mut level = vec![root];
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|id| by_parent.get(id).into_iter().flatten().copied())
                .filter(|child| seen.insert(*child))
                .collect();
        }
        height
    }

    fn children_by_parent(entries: &[PlanPlace]) -> HashMap<Uuid, Vec<Uuid>> {
        let mut by_parent: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for entry in entries {
            if let Some(parent) = entry.parent_id {
                by_parent.entry(parent).or_default().push(entry.id);
            }
        }
        by_parent
    }

    /// Whether `candidate` is `root` or one of its descendants.
    pub fn is_in_subtree(entries: &[PlanPlace], root: Uuid, candidate: Uuid) -> bool {
        if root == candidate {
            return true;
        }

        let by_parent = Self::children_by_parent(entries);

        let mut seen = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            for &child in by_parent.get(&current).into_iter().flatten() {
                if child == candidate {
                    return true;
                }
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        false
    }
}

use std::fmt;

use constants::materials::{BAKED_NODE_NAME, POLE_NODE_PATTERN, PORTAL_NODE_PATTERN};

use crate::engine::error::SceneError;
use crate::engine::materials::registry::MaterialSlot;

/// Name test applied to model nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMatcher {
    Exact(&'static str),
    Contains(&'static str),
}

impl NodeMatcher {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NodeMatcher::Exact(expected) => name == *expected,
            NodeMatcher::Contains(pattern) => name.contains(pattern),
        }
    }
}

impl fmt::Display for NodeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeMatcher::Exact(expected) => write!(f, "name `{expected}`"),
            NodeMatcher::Contains(pattern) => write!(f, "pattern `{pattern}`"),
        }
    }
}

/// How many nodes a rule binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// First match only, absence is reported.
    One,
    /// Every match, absence is fine.
    Any,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignmentRule {
    pub matcher: NodeMatcher,
    pub expect: Expect,
    pub slot: MaterialSlot,
}

/// Baked surface, pole lights, then the portal. Later rules win on overlap.
pub const PORTAL_SCENE_RULES: [AssignmentRule; 3] = [
    AssignmentRule {
        matcher: NodeMatcher::Exact(BAKED_NODE_NAME),
        expect: Expect::One,
        slot: MaterialSlot::Baked,
    },
    AssignmentRule {
        matcher: NodeMatcher::Contains(POLE_NODE_PATTERN),
        expect: Expect::Any,
        slot: MaterialSlot::PoleLight,
    },
    AssignmentRule {
        matcher: NodeMatcher::Contains(PORTAL_NODE_PATTERN),
        expect: Expect::One,
        slot: MaterialSlot::Portal,
    },
];

/// Single pass over `names`, yielding the index of every name accepted by
/// `predicate`.
pub fn scan_nodes<'a, P>(names: &'a [&'a str], predicate: P) -> impl Iterator<Item = usize> + 'a
where
    P: Fn(&str) -> bool + 'a,
{
    names
        .iter()
        .enumerate()
        .filter(move |(_, name)| predicate(**name))
        .map(|(index, _)| index)
}

pub fn find_node(names: &[&str], matcher: NodeMatcher) -> Option<usize> {
    scan_nodes(names, |name| matcher.matches(name)).next()
}

/// Per-node material slots plus the expectations that were not met.
#[derive(Debug, Default)]
pub struct AssignmentPlan {
    pub slots: Vec<MaterialSlot>,
    pub missing: Vec<SceneError>,
}

/// Resolve which material slot every top-level node receives.
///
/// Nodes no rule touches keep `MaterialSlot::Imported`.
pub fn plan_assignments(names: &[&str], rules: &[AssignmentRule]) -> AssignmentPlan {
    let mut plan = AssignmentPlan {
        slots: vec![MaterialSlot::Imported; names.len()],
        missing: Vec::new(),
    };

    for rule in rules {
        let matched: Vec<usize> = match rule.expect {
            Expect::One => find_node(names, rule.matcher).into_iter().collect(),
            Expect::Any => scan_nodes(names, |name| rule.matcher.matches(name)).collect(),
        };

        if matched.is_empty() && rule.expect == Expect::One {
            plan.missing.push(SceneError::MissingNode {
                matcher: rule.matcher,
            });
            continue;
        }

        for index in matched {
            plan.slots[index] = rule.slot;
        }
    }

    plan
}

//! The decision tree produced by [`Id3`](super::Id3).
use serde::{Serialize, Deserialize};

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, TreeError};
use crate::sample::{Outcome, Row, Value};
use super::node::*;


/// A decision tree over binary outcomes.
///
/// Nodes live in a single arena and refer to each other by [`NodeId`].
/// After construction, pruning, and contraction the arena is compact:
/// it holds exactly the nodes reachable from the root,
/// in pre-order, with the root at index `0`.
///
/// # Example
/// ```no_run
/// use minitree::prelude::*;
///
/// let dataset = DatasetReader::default()
///     .file("/path/to/data.tsv")
///     .read()
///     .unwrap();
/// let tree = Id3Builder::new()
///     .prune(true)
///     .build()
///     .unwrap()
///     .fit(&dataset)
///     .unwrap();
///
/// println!("{tree}");
/// tree.to_dot_file("tree.dot", None).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    root: NodeId,
}


impl DecisionTree {
    /// Wraps an arena built by the grower and compacts it.
    pub(crate) fn from_arena(nodes: Vec<Node>, root: NodeId) -> Self {
        let mut tree = Self { nodes, root };
        tree.compact();
        tree
    }


    /// Returns the root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }


    /// Returns the node `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }


    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }


    /// Returns the node ids reachable from the root in pre-order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children().iter().rev());
        }
        order
    }


    /// Returns the number of nodes reachable from the root.
    pub fn n_nodes(&self) -> usize {
        self.preorder().len()
    }


    /// Returns the leaves in pre-order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.node(id).is_leaf())
            .collect()
    }


    /// Returns the number of edges on the longest root-to-leaf path.
    /// A single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, d)) = stack.pop() {
            depth = depth.max(d);
            for &child in self.node(id).children() {
                stack.push((child, d + 1));
            }
        }
        depth
    }


    /// Classifies `row` by walking the tree from the root.
    /// Returns `None` if some node has no branch for the row's value,
    /// e.g., a categorical value never seen while training.
    pub fn classify(&self, row: &Row) -> Option<Outcome> {
        self.walk(|split| row.value(split.column()).cloned())
    }


    /// Same as [`DecisionTree::classify`],
    /// but the row is given as `attribute name -> token` pairs.
    /// A missing attribute or a non-integer token
    /// for a numeric split yields `None`.
    pub fn classify_values(&self, values: &HashMap<&str, &str>) -> Option<Outcome> {
        self.walk(|split| {
            let token = values.get(split.feature())?.trim();
            match split.rule() {
                SplitRule::Categorical => Some(Value::Category(token.to_string())),
                SplitRule::Threshold(_) => token.parse::<i64>().ok().map(Value::Number),
            }
        })
    }


    fn walk<F>(&self, mut value_of: F) -> Option<Outcome>
        where F: FnMut(&Split) -> Option<Value>
    {
        let mut id = self.root;
        loop {
            let node = self.node(id);
            let split = match node.split() {
                Some(split) => split,
                None => { return node.outcome(); },
            };
            let value = value_of(split)?;
            id = node.children()
                .iter()
                .copied()
                .find(|&child| {
                    self.node(child)
                        .branch_label()
                        .is_some_and(|branch| branch.admits(&value))
                })?;
        }
    }


    /// Collapses into a leaf every internal node whose children are
    /// all leaves with the same outcome, bottom-up, so that a collapse
    /// can make the parent collapsible too.
    /// Returns the number of collapsed nodes.
    pub fn contract(&mut self) -> usize {
        let mut collapsed = 0;
        // Reverse pre-order visits every child before its parent.
        for id in self.preorder().into_iter().rev() {
            let node = self.node(id);
            if node.is_leaf() { continue; }

            let mut outcomes = node.children()
                .iter()
                .map(|&child| {
                    let child = self.node(child);
                    if child.is_leaf() { child.outcome() } else { None }
                });
            let first = outcomes.next().flatten();
            let unanimous = first.is_some() && outcomes.all(|o| o == first);

            if let (true, Some(outcome)) = (unanimous, first) {
                self.node_mut(id).collapse(outcome);
                collapsed += 1;
            }
        }
        self.compact();
        collapsed
    }


    /// Turns the internal node `id` into a leaf predicting
    /// the majority of its counts.
    pub(crate) fn collapse(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        let outcome = node.counts().majority();
        node.collapse(outcome);
    }


    /// Drops the nodes unreachable from the root
    /// and renumbers the rest in pre-order.
    pub(crate) fn compact(&mut self) {
        let order = self.preorder();
        let mut remap = vec![None; self.nodes.len()];
        for (new, old) in order.iter().enumerate() {
            remap[old.0] = Some(NodeId(new));
        }

        let nodes = order.iter()
            .map(|old| {
                let mut node = self.nodes[old.0].clone();
                node.children = node.children.iter()
                    .filter_map(|child| remap[child.0])
                    .collect();
                node.parent = node.parent.and_then(|parent| remap[parent.0]);
                node
            })
            .collect::<Vec<_>>();

        self.nodes = nodes;
        self.root = NodeId(0);
    }


    /// Returns the tree in GraphViz DOT format.
    /// Internal nodes show the split attribute,
    /// edges show the branch label,
    /// and leaves are boxes with the outcome and the counts.
    pub fn to_dot(&self, caption: Option<&str>) -> String {
        let mut dot = String::from("graph DecisionTree {\n");
        if let Some(caption) = caption {
            dot.push_str(&format!(
                "\tlabel = \"{}\";\n\tlabelloc = \"t\";\n",
                escape(caption),
            ));
        }

        for id in self.preorder() {
            let node = self.node(id);
            let id = id.0;
            match node.outcome() {
                Some(outcome) => {
                    dot.push_str(&format!(
                        "\tnode_{id} [ label = \"{outcome}\\n{yes} yes / {no} no\", shape = box ];\n",
                        yes = node.num_yes(),
                        no  = node.num_no(),
                    ));
                },
                None => {
                    dot.push_str(&format!(
                        "\tnode_{id} [ label = \"{}\" ];\n",
                        escape(node.name()),
                    ));
                },
            }

            for &child in node.children() {
                let label = self.node(child)
                    .branch_label()
                    .map(|branch| escape(&branch.to_string()))
                    .unwrap_or_default();
                dot.push_str(&format!(
                    "\tnode_{id} -- node_{child} [ label = \"{label}\" ];\n",
                    child = child.0,
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }


    /// Writes [`DecisionTree::to_dot`] to `path`.
    pub fn to_dot_file<P>(&self, path: P, caption: Option<&str>) -> Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(self.to_dot(caption).as_bytes())?;
        Ok(())
    }


    /// Serializes the tree to JSON.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }


    /// Deserializes a tree written by [`DecisionTree::to_json`].
    ///
    /// The arena must describe a single tree rooted at `root`:
    /// every node is reached exactly once from the root,
    /// each child points back to its parent,
    /// leaves carry an outcome and no split,
    /// and internal nodes carry a split and at least two children.
    pub fn from_json(json: &str) -> Result<Self> {
        let tree: Self = serde_json::from_str(json)?;
        tree.validate()?;
        Ok(tree)
    }


    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(TreeError::InvalidParameter(reason));

        let n_nodes = self.nodes.len();
        if self.root.0 >= n_nodes {
            return invalid(format!("the root {} does not exist", self.root.0));
        }
        if self.nodes[self.root.0].parent.is_some() {
            return invalid("the root has a parent".to_string());
        }

        let mut visited = vec![false; n_nodes];
        visited[self.root.0] = true;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];

            match (&node.split, node.outcome) {
                (None, Some(_)) if node.children.is_empty() => {},
                (Some(_), None) if node.children.len() >= 2 => {},
                _ => {
                    return invalid(format!(
                        "node {} is neither a leaf nor a node with two or more children",
                        id.0
                    ));
                },
            }

            for &child in node.children.iter() {
                if child.0 >= n_nodes {
                    return invalid(format!("node {} does not exist", child.0));
                }
                if visited[child.0] {
                    return invalid(format!("node {} is reached twice", child.0));
                }
                if self.nodes[child.0].parent != Some(id) {
                    return invalid(format!(
                        "node {} does not point back to its parent {}",
                        child.0, id.0
                    ));
                }
                visited[child.0] = true;
                stack.push(child);
            }
        }

        if let Some(orphan) = visited.iter().position(|&seen| !seen) {
            return invalid(format!("node {orphan} is not reachable from the root"));
        }
        Ok(())
    }


    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize)
        -> fmt::Result
    {
        let node = self.node(id);
        let pad = "    ".repeat(indent);
        if let Some(branch) = node.branch_label() {
            write!(f, "{pad}{branch} => ")?;
        } else {
            write!(f, "{pad}")?;
        }

        match node.outcome() {
            Some(outcome) => writeln!(
                f, "{outcome} [{} yes / {} no]", node.num_yes(), node.num_no()
            )?,
            None => writeln!(
                f, "{} [{} yes / {} no]", node.name(), node.num_yes(), node.num_no()
            )?,
        }

        for &child in node.children() {
            self.fmt_node(f, child, indent + 1)?;
        }
        Ok(())
    }
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}


fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

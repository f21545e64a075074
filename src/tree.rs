use std::fmt::{self, Display};

use proptest::{collection::vec, prelude::*};

use crate::{
    error::{Error, Result},
    node::{self, Link, Node},
    queue::SeqQueue,
};

/// A self-balancing binary search tree (AVL tree).
///
/// Every node's child subtrees differ in height by at most one, which keeps
/// the tree height, and with it every operation, O(log n). Values only need
/// a total order; duplicates are allowed and are routed into the right
/// subtree of the first equal ancestor.
///
/// The tree owns its nodes exclusively and is mutated through `&mut self`,
/// so concurrent use requires external synchronization, like any other
/// standard collection.
///
/// ```
/// use avltree::prelude::*;
///
/// let mut tree = AvlTree::new();
/// tree.insert(4);
/// tree.insert(2);
/// tree.insert(3);
///
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.root().map(Node::data), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlTree<T: Ord + Clone> {
    root: Link<T>,
}

impl<T: Ord + Clone> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> AvlTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree, 0 when empty. Reads the root's cached height,
    /// so this is O(1).
    pub fn height(&self) -> u32 {
        node::height(&self.root)
    }

    /// Inserts `value`, rebalancing on the way back up. Always succeeds;
    /// inserting an already present value keeps both copies.
    pub fn insert(&mut self, value: T) {
        self.root = Some(node::insert(self.root.take(), &value));
    }

    /// Removes one occurrence of `value`.
    ///
    /// Removing from an empty tree or removing an absent value leaves the
    /// tree untouched and reports [`Error::EmptyTree`] / [`Error::NotFound`],
    /// both recoverable.
    pub fn remove(&mut self, value: &T) -> Result<()> {
        let Some(root) = self.root.take() else {
            log::debug!("remove requested on an empty tree");
            return Err(Error::EmptyTree);
        };

        let (root, removed) = node::remove(root, value);
        self.root = root;

        if removed {
            Ok(())
        } else {
            log::debug!("remove requested for a value that is not present");
            Err(Error::NotFound)
        }
    }

    /// Whether `value` is present, by plain BST descent.
    pub fn contains(&self, value: &T) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(node.data()) {
                std::cmp::Ordering::Less => node.left(),
                std::cmp::Ordering::Greater => node.right(),
                std::cmp::Ordering::Equal => return true,
            };
        }
        false
    }

    /// Smallest value in the tree.
    pub fn smallest(&self) -> Option<&T> {
        self.root.as_deref().map(node::leftmost)
    }

    /// Largest value in the tree.
    pub fn largest(&self) -> Option<&T> {
        self.root.as_deref().map(node::rightmost)
    }

    /// Read access to the root node, for shape inspection and invariant
    /// checking.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Checks the balance invariant over the whole tree from the cached
    /// heights. Diagnostic; always true unless the balancing logic is
    /// defective.
    pub fn is_balanced(&self) -> bool {
        node::is_balanced(self.root.as_deref())
    }

    /// In-order (sorted) iteration over the stored values.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }
}

impl<T: Ord + Clone> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

impl<'a, T: Ord + Clone> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`AvlTree`], tracking the unvisited left spine.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right());
        Some(node.data())
    }
}

/// Level-order rendering of the tree shape, one line per level, absent
/// slots marked with `*`. A debug affordance, not a stable format.
impl<T: Ord + Clone + Display> Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let height = self.height();
        if height == 0 {
            return Ok(());
        }

        let mut queue = SeqQueue::new();
        queue.push(self.root.as_deref());

        // Sentinel slots re-enqueue two sentinel children so every level
        // keeps a power-of-two slot count and columns stay aligned.
        for layer in (1..=height).rev() {
            let pad = " ".repeat(1 << (layer - 1));
            for _ in 0..queue.len() {
                let Some(slot) = queue.pop() else { break };
                f.write_str(&pad)?;
                match slot {
                    Some(node) => {
                        write!(f, "{}", node.data())?;
                        queue.push(node.left());
                        queue.push(node.right());
                    }
                    None => {
                        f.write_str("*")?;
                        queue.push(None);
                        queue.push(None);
                    }
                }
                f.write_str(&pad)?;
            }
            writeln!(f)?;
        }

        f.write_str("*************************************")
    }
}

impl<T> Arbitrary for AvlTree<T>
where
    T: Arbitrary + Ord + Clone + 'static,
{
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        vec(any::<T>(), 0..64)
            .prop_map(|values| values.into_iter().collect())
            .boxed()
    }
}

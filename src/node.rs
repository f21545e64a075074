use std::cmp::Ordering;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single vertex of an [`AvlTree`](crate::tree::AvlTree).
///
/// Each node exclusively owns its children and caches the height of the
/// subtree rooted at it. The cache is what keeps every rebalancing decision
/// O(1); it is recomputed and stored after every structural change, child
/// before parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub(crate) data: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) height: u32,
}

impl<T> Node<T> {
    pub(crate) fn leaf(data: T) -> Box<Self> {
        Box::new(Self {
            data,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// The value stored at this node, which is also its sort key.
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Cached height of the subtree rooted at this node, always >= 1.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Left subtree height minus right subtree height, from the caches.
    pub(crate) fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

/// Height of a possibly absent subtree. Reads the cached field only, never
/// walks the subtree.
pub(crate) fn height<T>(link: &Link<T>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

/// Single right rotation: promotes the left child over `node`, handing the
/// child's right subtree across as `node`'s new left subtree.
///
/// Precondition: `node.left` is present. A violation means the balance
/// bookkeeping itself is broken, so it only asserts in debug builds.
pub(crate) fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    log::trace!("right rotation (subtree height {})", node.height);
    let mut pivot = match node.left.take() {
        Some(pivot) => pivot,
        None => {
            debug_assert!(false, "right rotation requires a left child");
            return node;
        }
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Single left rotation, the mirror image of [`rotate_right`].
pub(crate) fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    log::trace!("left rotation (subtree height {})", node.height);
    let mut pivot = match node.right.take() {
        Some(pivot) => pivot,
        None => {
            debug_assert!(false, "left rotation requires a right child");
            return node;
        }
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Left-right double rotation, used when the left subtree is right heavy.
pub(crate) fn rotate_left_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    if let Some(left) = node.left.take() {
        node.left = Some(rotate_left(left));
    }
    rotate_right(node)
}

/// Right-left double rotation, used when the right subtree is left heavy.
pub(crate) fn rotate_right_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    if let Some(right) = node.right.take() {
        node.right = Some(rotate_right(right));
    }
    rotate_left(node)
}

/// Inserts `value` into the subtree, returning its (possibly new) root.
///
/// Ties go right, so duplicates are kept. On a ±2 overflow the rotation is
/// chosen by comparing the inserted value against the heavier child's data:
/// a single rotation when the value continued in the same direction, a
/// double rotation when it zig-zagged.
pub(crate) fn insert<T: Ord + Clone>(link: Link<T>, value: &T) -> Box<Node<T>> {
    let Some(mut node) = link else {
        return Node::leaf(value.clone());
    };

    if *value < node.data {
        node.left = Some(insert(node.left.take(), value));
        if node.balance_factor() == 2 {
            node = if matches!(&node.left, Some(left) if *value < left.data) {
                rotate_right(node)
            } else {
                rotate_left_right(node)
            };
        }
    } else {
        node.right = Some(insert(node.right.take(), value));
        if node.balance_factor() == -2 {
            node = if matches!(&node.right, Some(right) if *value < right.data) {
                rotate_right_left(node)
            } else {
                rotate_left(node)
            };
        }
    }

    node.update_height();
    node
}

/// Removes one occurrence of `value` from the subtree.
///
/// Returns the (possibly new) subtree root plus whether the value was found.
/// A two-child target is overwritten with its in-order successor, which is
/// then removed from the right subtree; a one-child target is replaced by
/// that child.
pub(crate) fn remove<T: Ord + Clone>(mut node: Box<Node<T>>, value: &T) -> (Link<T>, bool) {
    let removed = match value.cmp(&node.data) {
        Ordering::Less => match node.left.take() {
            // Descent hit an absent child: the value is not in the tree.
            None => return (Some(node), false),
            Some(left) => {
                let (link, removed) = remove(left, value);
                node.left = link;
                removed
            }
        },
        Ordering::Greater => match node.right.take() {
            None => return (Some(node), false),
            Some(right) => {
                let (link, removed) = remove(right, value);
                node.right = link;
                removed
            }
        },
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                node.data = leftmost(&right).clone();
                node.left = Some(left);
                let (link, _) = remove(right, &node.data);
                node.right = link;
                true
            }
            (Some(child), None) | (None, Some(child)) => return (Some(child), true),
            (None, None) => return (None, true),
        },
    };

    (Some(rebalance(node)), removed)
}

/// Restores the balance invariant at `node` after a removal underneath it.
///
/// Unlike insert, the rotation here is chosen from the heavier child's own
/// subtree heights: a single rotation suffices unless that child is skewed
/// the opposite way. The two rules are not interchangeable; unifying them
/// breaks the balance invariant on some delete sequences.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.balance_factor() {
        -2 => {
            let zigzag =
                matches!(&node.right, Some(right) if height(&right.left) > height(&right.right));
            node = if zigzag {
                rotate_right_left(node)
            } else {
                rotate_left(node)
            };
        }
        2 => {
            let zigzag =
                matches!(&node.left, Some(left) if height(&left.right) > height(&left.left));
            node = if zigzag {
                rotate_left_right(node)
            } else {
                rotate_right(node)
            };
        }
        _ => {}
    }

    node.update_height();
    node
}

/// Smallest value in the subtree: the in-order successor used by removal.
pub(crate) fn leftmost<T>(node: &Node<T>) -> &T {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    &current.data
}

/// Largest value in the subtree.
pub(crate) fn rightmost<T>(node: &Node<T>) -> &T {
    let mut current = node;
    while let Some(right) = current.right.as_deref() {
        current = right;
    }
    &current.data
}

/// Checks the balance invariant from the cached heights.
pub(crate) fn is_balanced<T>(node: Option<&Node<T>>) -> bool {
    node.map_or(true, |node| {
        node.balance_factor().abs() <= 1
            && is_balanced(node.left.as_deref())
            && is_balanced(node.right.as_deref())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtree(values: &[u32]) -> Link<u32> {
        values
            .iter()
            .fold(None, |link, value| Some(insert(link, value)))
    }

    #[test]
    fn test_height_of_absent_subtree_is_zero() {
        assert_eq!(height::<u32>(&None), 0);
    }

    #[test]
    fn test_leaf_has_height_one() {
        let leaf = Node::leaf(7);
        assert_eq!(leaf.height(), 1);
        assert!(leaf.left().is_none());
        assert!(leaf.right().is_none());
    }

    #[test]
    fn test_right_rotation_on_a_left_left_chain() {
        // Inserting a strictly descending run overflows to the left, which
        // the insert path fixes with a single right rotation.
        let root = subtree(&[3, 2, 1]).unwrap();
        assert_eq!(root.data, 2);
        assert_eq!(root.left.as_ref().unwrap().data, 1);
        assert_eq!(root.right.as_ref().unwrap().data, 3);
        assert_eq!(root.height, 2);
    }

    #[test]
    fn test_left_rotation_on_a_right_right_chain() {
        let root = subtree(&[1, 2, 3]).unwrap();
        assert_eq!(root.data, 2);
        assert_eq!(root.left.as_ref().unwrap().data, 1);
        assert_eq!(root.right.as_ref().unwrap().data, 3);
        assert_eq!(root.height, 2);
    }

    #[test]
    fn test_left_right_double_rotation() {
        let root = subtree(&[3, 1, 2]).unwrap();
        assert_eq!(root.data, 2);
        assert_eq!(root.left.as_ref().unwrap().data, 1);
        assert_eq!(root.right.as_ref().unwrap().data, 3);
    }

    #[test]
    fn test_right_left_double_rotation() {
        let root = subtree(&[1, 3, 2]).unwrap();
        assert_eq!(root.data, 2);
        assert_eq!(root.left.as_ref().unwrap().data, 1);
        assert_eq!(root.right.as_ref().unwrap().data, 3);
    }

    #[test]
    fn test_rotations_recompute_heights_child_before_parent() {
        // rotate_right of 2-over-1 with an empty right side: the demoted
        // node must shrink to a leaf before the pivot reads its height.
        let root = subtree(&[3, 2, 1]).unwrap();
        assert_eq!(root.left.as_ref().unwrap().height, 1);
        assert_eq!(root.right.as_ref().unwrap().height, 1);
        assert_eq!(root.height, 2);
    }

    #[test]
    fn test_extrema_of_a_subtree() {
        let root = subtree(&[5, 2, 8, 1, 9]).unwrap();
        assert_eq!(*leftmost(&root), 1);
        assert_eq!(*rightmost(&root), 9);
    }

    #[test]
    fn test_remove_reports_missing_values() {
        let root = subtree(&[2, 1, 3]).unwrap();
        let (link, removed) = remove(root, &9);
        assert!(!removed);
        assert_eq!(link.unwrap().data, 2);
    }

    #[test]
    fn test_remove_of_a_two_child_node_promotes_the_successor() {
        let root = subtree(&[2, 1, 3]).unwrap();
        let (link, removed) = remove(root, &2);
        assert!(removed);
        let root = link.unwrap();
        assert_eq!(root.data, 3);
        assert_eq!(root.left.as_ref().unwrap().data, 1);
        assert!(root.right.is_none());
    }

    #[test]
    fn test_remove_rebalances_with_the_child_balance_rule() {
        // Removing 1 leaves the root right heavy with a perfectly even
        // right child, which must be fixed by a single left rotation.
        let root = subtree(&[2, 1, 4, 3, 5]).unwrap();
        let (link, removed) = remove(root, &1);
        assert!(removed);
        let root = link.unwrap();
        assert_eq!(root.data, 4);
        assert!(is_balanced(Some(&root)));
        assert_eq!(root.height, 3);
        assert_eq!(root.left.as_ref().unwrap().data, 2);
        assert_eq!(root.right.as_ref().unwrap().data, 5);
    }
}

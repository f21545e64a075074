mod error;
mod node;
mod queue;

pub mod prelude;
pub mod testing;
pub mod tree;

#[doc(hidden)]
/// This is a hidden module to make the macros defined on this crate available for the users.
pub mod __dependencies {
    pub use paste;
    pub use proptest;
    pub use test_strategy;
}

/// Generates property tests asserting the AVL invariants for trees over the
/// given element type: balance factors confined to {-1, 0, +1}, cached
/// heights matching a full recomputation, sorted in-order traversal, and
/// removal restoring the empty tree.
#[macro_export]
macro_rules! test_avl_tree_properties {
    ($type:ty) => {
        $crate::__dependencies::paste::paste! {
            mod [<test_avl_tree_$type:snake>] {
                use $crate::__dependencies::{
                    proptest::prelude::*,
                    test_strategy,
                };
                use $crate::prelude::{AvlTree, Node};

                /// Recomputes every height from scratch, asserting the
                /// cached value and the balance factor on the way up.
                #[cfg_attr(coverage_nightly, coverage(off))]
                fn checked_height(node: Option<&Node<$type>>) -> u32 {
                    let Some(node) = node else { return 0 };

                    let left = checked_height(node.left());
                    let right = checked_height(node.right());
                    assert!(
                        left.abs_diff(right) <= 1,
                        "balance factor out of range at a node of height {}",
                        node.height(),
                    );

                    let height = 1 + left.max(right);
                    assert_eq!(node.height(), height, "cached height is stale");
                    height
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                fn assert_invariants(tree: &AvlTree<$type>) {
                    checked_height(tree.root());

                    let values: Vec<&$type> = tree.iter().collect();
                    assert!(
                        values.windows(2).all(|pair| pair[0] <= pair[1]),
                        "in-order traversal is not sorted"
                    );
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_invariants_hold_after_every_insert(values: Vec<$type>) {
                    let mut tree = AvlTree::new();
                    for value in values {
                        tree.insert(value);
                        assert_invariants(&tree);
                    }
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_invariants_hold_after_every_remove(values: Vec<$type>) {
                    let mut tree: AvlTree<$type> = values.iter().cloned().collect();
                    for value in &values {
                        tree.remove(value)?;
                        assert_invariants(&tree);
                    }
                    prop_assert!(tree.is_empty());
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_removing_an_absent_value_changes_nothing(
                    values: Vec<$type>,
                    probe: $type,
                ) {
                    prop_assume!(!values.contains(&probe));

                    let mut tree: AvlTree<$type> = values.iter().cloned().collect();
                    let before: Vec<$type> = tree.iter().cloned().collect();

                    prop_assert!(tree.remove(&probe).is_err());

                    let after: Vec<$type> = tree.iter().cloned().collect();
                    prop_assert_eq!(before, after);
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_duplicates_are_kept(values: Vec<$type>) {
                    let mut tree = AvlTree::new();
                    for value in values.iter().cloned() {
                        tree.insert(value.clone());
                        tree.insert(value);
                    }
                    assert_invariants(&tree);
                    prop_assert_eq!(tree.iter().count(), values.len() * 2);
                }
            }
        }
    };
}

pub use crate::{
    error::{Error, Result},
    node::Node,
    tree::{AvlTree, Iter},
};

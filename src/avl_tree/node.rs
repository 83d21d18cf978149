/// Height bookkeeping of a node of an avl tree.
///
/// A leaf has height zero and an absent child counts as height `-1`. `prev_height` holds the
/// height from before the last recomputation so that an upward pass can tell when a subtree
/// stopped growing or shrinking.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Heights {
    pub height: i32,
    pub prev_height: i32,
}

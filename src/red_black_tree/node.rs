/// The color of a node in a red-black tree.
///
/// New nodes are red. Missing children count as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

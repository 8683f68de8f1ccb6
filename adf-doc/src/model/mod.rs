//! The typed document model.
//!
//! Split in two: [`marks`] holds the formatting annotations, [`nodes`] the
//! structural tree. Both expose the same surface per variant: a `from_data`
//! constructor from untyped JSON, a `to_data` inverse, and a type-tag
//! accessor. The free functions [`parse_node`] and [`parse_mark`] are the
//! dispatch entry points used by the recursive descent.

pub mod marks;
pub mod nodes;

pub use marks::{parse_mark, Mark};
pub use nodes::{parse_children, parse_marks, parse_node, Node};

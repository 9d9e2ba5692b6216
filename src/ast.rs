pub mod class;
pub mod len;
pub mod node;

pub use self::{
    class::{CharClass, CharRange, CharSet, NamedClass},
    len::Len,
    node::{BackRef, Check, Choice, Literal, Look, LookDirection, Node, Repeat},
};

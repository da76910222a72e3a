//! Flutter bridge crate for LazyTodo.

pub mod api;

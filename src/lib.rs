// Treescribe library - exposes the tree model and its services

pub mod services;
pub mod tree;

pub(crate) mod bind;
pub(crate) mod display;
pub(crate) mod lexer;
pub(crate) mod node;
pub(crate) mod parser;
pub(crate) mod syntax;

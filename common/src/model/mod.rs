pub mod document;
pub mod place_holder;
pub mod template;
pub mod variable;

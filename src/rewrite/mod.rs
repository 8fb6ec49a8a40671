pub(crate) mod compose;
pub(crate) mod null_safe;
pub(crate) mod substitute;

use crate::expression::bind::parse_lambda;
use crate::expression::node::Lambda;
use crate::model::registry::TypeModel;
use std::sync::LazyLock;

static PEOPLE: LazyLock<TypeModel> = LazyLock::new(|| {
    TypeModel::from_json_str(include_str!("../data/people.json")).expect("people.json fixture")
});

pub(crate) fn people() -> &'static TypeModel {
    &PEOPLE
}

pub(crate) fn lambda(src: &str) -> Lambda {
    parse_lambda(src, people()).unwrap_or_else(|e| panic!("{src}: {e}"))
}

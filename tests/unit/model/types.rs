use super::*;

#[test]
fn nullability_follows_kind() {
    let person = TypeDesc::reference("Person");
    let int = Primitive::Int.ty();
    let int_opt = TypeDesc::nullable(&int);

    assert!(person.is_nullable());
    assert!(!int.is_nullable());
    assert!(int_opt.is_nullable());
    assert!(int_opt.is_value_type());
    assert_eq!(int_opt.name, "int?");
    assert_eq!(int_opt.underlying(), Some(&int));
}

#[test]
fn nullable_of_reference_is_identity() {
    let s = Primitive::String.ty();
    assert!(Arc::ptr_eq(&TypeDesc::nullable(&s), &s));
}

#[test]
fn primitives_are_shared() {
    assert!(Arc::ptr_eq(&Primitive::Bool.ty(), &Primitive::Bool.ty()));
    assert_eq!(Primitive::Double.ty().name, "double");
    assert_eq!(Primitive::ALL.len(), 5);
}

#[test]
fn function_type_lists_params_then_result() {
    let person = TypeDesc::reference("Person");
    let f = TypeDesc::function(&[person], &Primitive::String.ty());
    assert_eq!(f.name, "Func<Person, string>");
    assert!(f.is_nullable());
}

#[test]
fn receiver_call_needs_static_marker_and_a_parameter() {
    let text = TypeDesc::reference("Text");
    let s = Primitive::String.ty();

    let upper = MethodInfo::receiver_fn(&text, "Upper", vec![ParamInfo::new("s", &s)], &s);
    assert!(upper.is_receiver_call());

    let no_params = MethodInfo::receiver_fn(&text, "Now", vec![], &s);
    assert!(!no_params.is_receiver_call());

    let plain_static = MethodInfo::static_fn(&text, "Trim", vec![ParamInfo::new("s", &s)], &s);
    assert!(!plain_static.is_receiver_call());

    let instance = MethodInfo::instance(&s, "Trim", vec![], &s);
    assert!(!instance.is_receiver_call());
}

#[test]
fn member_info_projects_descriptor_fields() {
    let person = TypeDesc::reference("Person");
    let address = TypeDesc::reference("Address");
    let field: MemberInfo = FieldInfo::new(&person, "Address", &address).into();

    assert_eq!(field.name(), "Address");
    assert_eq!(field.declaring_type(), &person);
    assert_eq!(field.result_type(), &address);
    assert!(!field.is_static());
    assert!(field.as_method().is_none());
    assert_eq!(field.to_string(), "Person.Address");

    let m: MemberInfo = MethodInfo::instance(&person, "FullName", vec![], &Primitive::String.ty()).into();
    assert_eq!(m.to_string(), "Person.FullName()");
    assert!(m.as_field().is_none());
}

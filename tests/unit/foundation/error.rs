use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ExprError::invalid_argument("sourceMember", "x")
            .to_string()
            .contains("invalid argument 'sourceMember':")
    );
    assert!(
        ExprError::parse(3, "x")
            .to_string()
            .contains("parse error at byte 3:")
    );
    assert!(ExprError::bind("x").to_string().contains("bind error:"));
    assert!(ExprError::model("x").to_string().contains("model error:"));
    assert!(
        ExprError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn invalid_argument_keeps_name_and_message() {
    let err = ExprError::invalid_argument("member", "Only member accesses are allowed. x => 1");
    match err {
        ExprError::InvalidArgument { name, message } => {
            assert_eq!(name, "member");
            assert!(message.ends_with("x => 1"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ExprError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

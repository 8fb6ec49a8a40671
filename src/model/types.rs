use std::fmt;
use std::sync::{Arc, LazyLock};

/// Shared handle to a type descriptor.
pub type TypeRef = Arc<TypeDesc>;

/// Static type of an expression node or member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    /// Display name, `T?` for nullable wrappers.
    pub name: String,
    /// Nullability class of the type.
    pub kind: TypeKind,
}

/// Nullability class of a [`TypeDesc`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Reference type; values may be null.
    Reference,
    /// Value type; values are never null.
    Value,
    /// Nullable wrapper around a value type.
    Nullable(TypeRef),
}

impl TypeDesc {
    /// Create a reference type descriptor.
    pub fn reference(name: impl Into<String>) -> TypeRef {
        Arc::new(Self {
            name: name.into(),
            kind: TypeKind::Reference,
        })
    }

    /// Create a value type descriptor.
    pub fn value(name: impl Into<String>) -> TypeRef {
        Arc::new(Self {
            name: name.into(),
            kind: TypeKind::Value,
        })
    }

    /// Wrap a value type into its nullable form. Reference and nullable types are returned as-is.
    pub fn nullable(of: &TypeRef) -> TypeRef {
        match of.kind {
            TypeKind::Value => Arc::new(Self {
                name: format!("{}?", of.name),
                kind: TypeKind::Nullable(of.clone()),
            }),
            TypeKind::Reference | TypeKind::Nullable(_) => of.clone(),
        }
    }

    /// Function type `Func<P.., R>` used as the static type of lambda nodes.
    pub fn function(params: &[TypeRef], ret: &TypeRef) -> TypeRef {
        let mut name = String::from("Func<");
        for p in params {
            name.push_str(&p.name);
            name.push_str(", ");
        }
        name.push_str(&ret.name);
        name.push('>');
        Self::reference(name)
    }

    /// Return `true` when values of this type can be null.
    pub fn is_nullable(&self) -> bool {
        matches!(self.kind, TypeKind::Reference | TypeKind::Nullable(_))
    }

    /// Return `true` for value types and their nullable wrappers.
    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Value | TypeKind::Nullable(_))
    }

    /// Underlying value type of a nullable wrapper.
    pub fn underlying(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Nullable(inner) => Some(inner),
            TypeKind::Reference | TypeKind::Value => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Built-in types every model knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Int,
    Double,
    String,
    Object,
}

static PRIMITIVES: LazyLock<[TypeRef; 5]> = LazyLock::new(|| {
    [
        TypeDesc::value("bool"),
        TypeDesc::value("int"),
        TypeDesc::value("double"),
        TypeDesc::reference("string"),
        TypeDesc::reference("object"),
    ]
});

impl Primitive {
    /// All primitives, in declaration order.
    pub const ALL: [Primitive; 5] = [
        Primitive::Bool,
        Primitive::Int,
        Primitive::Double,
        Primitive::String,
        Primitive::Object,
    ];

    /// Shared descriptor for this primitive.
    pub fn ty(self) -> TypeRef {
        PRIMITIVES[self as usize].clone()
    }
}

/// A field or property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub name: String,
    pub declaring_type: TypeRef,
    pub ty: TypeRef,
    pub is_static: bool,
}

impl FieldInfo {
    /// Instance field `declaring.name: ty`.
    pub fn new(declaring_type: &TypeRef, name: impl Into<String>, ty: &TypeRef) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            declaring_type: declaring_type.clone(),
            ty: ty.clone(),
            is_static: false,
        })
    }

    /// Static field `declaring.name: ty`.
    pub fn new_static(
        declaring_type: &TypeRef,
        name: impl Into<String>,
        ty: &TypeRef,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            declaring_type: declaring_type.clone(),
            ty: ty.clone(),
            is_static: true,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: String,
    pub ty: TypeRef,
}

impl ParamInfo {
    pub fn new(name: impl Into<String>, ty: &TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: ty.clone(),
        }
    }
}

/// A method descriptor.
///
/// Static methods flagged with `receiver` behave like extension methods: their first
/// parameter stands in for the receiver when the call is part of an access chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    pub name: String,
    pub declaring_type: TypeRef,
    pub return_type: TypeRef,
    pub params: Vec<ParamInfo>,
    pub is_static: bool,
    pub receiver: bool,
}

impl MethodInfo {
    /// Instance method on `declaring`.
    pub fn instance(
        declaring_type: &TypeRef,
        name: impl Into<String>,
        params: Vec<ParamInfo>,
        return_type: &TypeRef,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            declaring_type: declaring_type.clone(),
            return_type: return_type.clone(),
            params,
            is_static: false,
            receiver: false,
        })
    }

    /// Plain static method on `declaring`.
    pub fn static_fn(
        declaring_type: &TypeRef,
        name: impl Into<String>,
        params: Vec<ParamInfo>,
        return_type: &TypeRef,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            declaring_type: declaring_type.clone(),
            return_type: return_type.clone(),
            params,
            is_static: true,
            receiver: false,
        })
    }

    /// Static method whose first parameter is the receiver.
    pub fn receiver_fn(
        declaring_type: &TypeRef,
        name: impl Into<String>,
        params: Vec<ParamInfo>,
        return_type: &TypeRef,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            declaring_type: declaring_type.clone(),
            return_type: return_type.clone(),
            params,
            is_static: true,
            receiver: true,
        })
    }

    /// `true` when a call to this method continues an access chain through its first argument.
    pub fn is_receiver_call(&self) -> bool {
        self.is_static && self.receiver && !self.params.is_empty()
    }
}

/// A chain link descriptor: either a field/property or a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberInfo {
    Field(Arc<FieldInfo>),
    Method(Arc<MethodInfo>),
}

impl MemberInfo {
    pub fn name(&self) -> &str {
        match self {
            Self::Field(f) => &f.name,
            Self::Method(m) => &m.name,
        }
    }

    pub fn declaring_type(&self) -> &TypeRef {
        match self {
            Self::Field(f) => &f.declaring_type,
            Self::Method(m) => &m.declaring_type,
        }
    }

    /// Type produced by accessing the member.
    pub fn result_type(&self) -> &TypeRef {
        match self {
            Self::Field(f) => &f.ty,
            Self::Method(m) => &m.return_type,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Self::Field(f) => f.is_static,
            Self::Method(m) => m.is_static,
        }
    }

    pub fn as_field(&self) -> Option<&Arc<FieldInfo>> {
        match self {
            Self::Field(f) => Some(f),
            Self::Method(_) => None,
        }
    }

    pub fn as_method(&self) -> Option<&Arc<MethodInfo>> {
        match self {
            Self::Field(_) => None,
            Self::Method(m) => Some(m),
        }
    }
}

impl From<Arc<FieldInfo>> for MemberInfo {
    fn from(f: Arc<FieldInfo>) -> Self {
        Self::Field(f)
    }
}

impl From<Arc<MethodInfo>> for MemberInfo {
    fn from(m: Arc<MethodInfo>) -> Self {
        Self::Method(m)
    }
}

impl fmt::Display for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{}.{}", field.declaring_type, field.name),
            Self::Method(m) => write!(f, "{}.{}()", m.declaring_type, m.name),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/types.rs"]
mod tests;

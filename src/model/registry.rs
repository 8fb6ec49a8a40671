use crate::foundation::error::{ExprError, ExprResult};
use crate::model::types::{FieldInfo, MethodInfo, ParamInfo, Primitive, TypeDesc, TypeKind, TypeRef};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, LazyLock};

/// JSON-facing description of a type model.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDef {
    pub types: Vec<TypeDef>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub kind: KindDef,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindDef {
    #[default]
    Reference,
    Value,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDef {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDef>,
    pub returns: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Static method whose first parameter acts as the receiver.
    #[serde(default)]
    pub receiver: bool,
}

/// Registry of type, field and method descriptors.
///
/// Models are built explicitly and handed to whoever binds lambda text against them. The
/// read-only [`TypeModel::shared`] instance only knows the primitives.
#[derive(Debug, Clone)]
pub struct TypeModel {
    types: BTreeMap<String, TypeRef>,
    fields: HashMap<(String, String), Arc<FieldInfo>>,
    methods: HashMap<(String, String), Arc<MethodInfo>>,
    receiver_methods: Vec<Arc<MethodInfo>>,
}

static SHARED: LazyLock<TypeModel> = LazyLock::new(TypeModel::builtin);

impl Default for TypeModel {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TypeModel {
    /// Model containing only the primitive types.
    pub fn builtin() -> Self {
        let types = Primitive::ALL
            .iter()
            .map(|p| {
                let ty = p.ty();
                (ty.name.clone(), ty)
            })
            .collect();
        Self {
            types,
            fields: HashMap::new(),
            methods: HashMap::new(),
            receiver_methods: Vec::new(),
        }
    }

    /// Process-wide default model, built once on first use.
    pub fn shared() -> &'static TypeModel {
        &SHARED
    }

    /// Parse a model from a JSON string.
    pub fn from_json_str(s: &str) -> ExprResult<Self> {
        let def: ModelDef = serde_json::from_str(s)
            .map_err(|e| ExprError::serde(format!("parse type model JSON: {e}")))?;
        Self::from_def(&def)
    }

    /// Parse a model from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ExprResult<Self> {
        let def: ModelDef = serde_json::from_reader(r)
            .map_err(|e| ExprError::serde(format!("parse type model JSON: {e}")))?;
        Self::from_def(&def)
    }

    /// Parse a model from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ExprResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ExprError::Other(
                anyhow::Error::new(e).context(format!("open type model '{}'", path.display())),
            )
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build a model from its JSON-facing definition.
    #[tracing::instrument(skip(def), fields(types = def.types.len()))]
    pub fn from_def(def: &ModelDef) -> ExprResult<Self> {
        let mut model = Self::builtin();

        // Declare every type first so members can reference types declared later.
        for td in &def.types {
            if td.name.ends_with('?') || td.name.is_empty() {
                return Err(ExprError::model(format!(
                    "invalid type name \"{}\"",
                    td.name
                )));
            }
            if model.types.contains_key(&td.name) {
                return Err(ExprError::model(format!("duplicate type \"{}\"", td.name)));
            }
            let ty = match td.kind {
                KindDef::Reference => TypeDesc::reference(td.name.clone()),
                KindDef::Value => TypeDesc::value(td.name.clone()),
            };
            model.types.insert(td.name.clone(), ty);
        }

        for td in &def.types {
            let declaring = model.resolve_type(&td.name)?;
            for fd in &td.fields {
                let ty = model.resolve_type(&fd.ty)?;
                let field = if fd.is_static {
                    FieldInfo::new_static(&declaring, fd.name.clone(), &ty)
                } else {
                    FieldInfo::new(&declaring, fd.name.clone(), &ty)
                };
                let key = (td.name.clone(), fd.name.clone());
                if model.fields.contains_key(&key) || model.methods.contains_key(&key) {
                    return Err(ExprError::model(format!(
                        "duplicate member \"{}.{}\"",
                        td.name, fd.name
                    )));
                }
                model.fields.insert(key, field);
            }
            for md in &td.methods {
                let method = model.method_from_def(&declaring, md)?;
                let key = (td.name.clone(), md.name.clone());
                if model.fields.contains_key(&key) || model.methods.contains_key(&key) {
                    return Err(ExprError::model(format!(
                        "duplicate member \"{}.{}\"",
                        td.name, md.name
                    )));
                }
                if method.receiver {
                    model.receiver_methods.push(method.clone());
                }
                model.methods.insert(key, method);
            }
        }

        tracing::debug!(
            types = model.types.len(),
            fields = model.fields.len(),
            methods = model.methods.len(),
            "type model loaded"
        );
        Ok(model)
    }

    fn method_from_def(&self, declaring: &TypeRef, md: &MethodDef) -> ExprResult<Arc<MethodInfo>> {
        let mut params = Vec::with_capacity(md.params.len());
        for p in &md.params {
            params.push(ParamInfo::new(p.name.clone(), &self.resolve_type(&p.ty)?));
        }
        let ret = self.resolve_type(&md.returns)?;
        if md.receiver {
            if !md.is_static || params.is_empty() {
                return Err(ExprError::model(format!(
                    "receiver method \"{}.{}\" must be static and take at least one parameter",
                    declaring.name, md.name
                )));
            }
            return Ok(MethodInfo::receiver_fn(declaring, md.name.clone(), params, &ret));
        }
        if md.is_static {
            Ok(MethodInfo::static_fn(declaring, md.name.clone(), params, &ret))
        } else {
            Ok(MethodInfo::instance(declaring, md.name.clone(), params, &ret))
        }
    }

    /// Resolve a type name; a trailing `?` wraps a value type into its nullable form.
    pub fn resolve_type(&self, name: &str) -> ExprResult<TypeRef> {
        let name = name.trim();
        if let Some(base) = name.strip_suffix('?') {
            let inner = self.resolve_type(base)?;
            return match inner.kind {
                TypeKind::Value => Ok(TypeDesc::nullable(&inner)),
                TypeKind::Reference | TypeKind::Nullable(_) => Err(ExprError::model(format!(
                    "\"{name}\": only value types can be made nullable"
                ))),
            };
        }
        self.type_named(name)
            .ok_or_else(|| ExprError::model(format!("unknown type \"{name}\"")))
    }

    /// Look up a declared (non-nullable) type by exact name.
    pub fn type_named(&self, name: &str) -> Option<TypeRef> {
        self.types.get(name).cloned()
    }

    /// All declared types, ordered by name.
    pub fn types(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.values()
    }

    /// Field or property `name` declared on `ty` (or on the value type a nullable wraps).
    pub fn field(&self, ty: &TypeDesc, name: &str) -> Option<Arc<FieldInfo>> {
        if let Some(f) = self.fields.get(&(ty.name.clone(), name.to_owned())) {
            return Some(f.clone());
        }
        ty.underlying().and_then(|inner| self.field(inner, name))
    }

    /// Method `name` declared on `ty`, static or instance.
    pub fn method(&self, ty: &TypeDesc, name: &str) -> Option<Arc<MethodInfo>> {
        if let Some(m) = self.methods.get(&(ty.name.clone(), name.to_owned())) {
            return Some(m.clone());
        }
        ty.underlying().and_then(|inner| self.method(inner, name))
    }

    /// Receiver-style static method `name` whose first parameter accepts `receiver_ty`.
    pub fn receiver_method(&self, receiver_ty: &TypeDesc, name: &str) -> Option<Arc<MethodInfo>> {
        self.receiver_methods
            .iter()
            .find(|m| {
                m.name == name
                    && m.params.first().is_some_and(|p| {
                        *p.ty == *receiver_ty || p.ty.name == "object"
                    })
            })
            .cloned()
    }

    /// Every static method called `name`, regardless of declaring type.
    pub fn static_methods_named(&self, name: &str) -> Vec<Arc<MethodInfo>> {
        let mut out: Vec<Arc<MethodInfo>> = self
            .methods
            .values()
            .filter(|m| m.is_static && m.name == name)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.declaring_type.name.cmp(&b.declaring_type.name));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/registry.rs"]
mod tests;

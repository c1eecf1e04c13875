//! Pipeline steps over raw type graphs

use tracing::debug;

use crate::annotations;
use crate::bundle::Bundle;
use crate::data::TypeData;
use crate::error::Result;
use crate::generate::SchemaGenerationStep;
use crate::node::{SchemaBuilder, SchemaEntry};

/// A pure transformation from `Bundle<In>` to `Bundle<Out>`.
///
/// A step either returns a complete bundle or an error; it never drops
/// entries it could not handle.
pub trait Step<In, Out> {
    /// # Errors
    ///
    /// Implementations fail when a required entry cannot be resolved.
    fn process(&self, bundle: Bundle<In>) -> Result<Bundle<Out>>;
}

/// Renames every property with the given naming strategy
pub struct RenamePropertiesStep<F> {
    strategy: F,
}

impl<F> RenamePropertiesStep<F>
where
    F: Fn(&str) -> String,
{
    pub const fn new(strategy: F) -> Self {
        Self { strategy }
    }
}

impl<F> Step<TypeData, TypeData> for RenamePropertiesStep<F>
where
    F: Fn(&str) -> String,
{
    fn process(&self, bundle: Bundle<TypeData>) -> Result<Bundle<TypeData>> {
        debug!(entries = bundle.len(), "renaming properties");
        Ok(bundle.map(|_, mut data| {
            for member in &mut data.members {
                member.name = (self.strategy)(&member.name);
            }
            data
        }))
    }
}

/// Marks properties annotated with [`annotations::OPTIONAL`] as optional
#[derive(Debug, Default, Clone, Copy)]
pub struct OptionalAnnotationStep;

impl Step<TypeData, TypeData> for OptionalAnnotationStep {
    fn process(&self, bundle: Bundle<TypeData>) -> Result<Bundle<TypeData>> {
        Ok(bundle.map(|_, mut data| {
            for member in &mut data.members {
                if member
                    .annotations
                    .iter()
                    .any(|a| a.name == annotations::OPTIONAL)
                {
                    member.optional = true;
                }
            }
            data
        }))
    }
}

/// Convenience chaining over raw type graphs
pub trait TypeBundleExt: Sized {
    /// See [`RenamePropertiesStep`]
    ///
    /// # Errors
    ///
    /// Never fails today; kept fallible so it chains like every other step.
    fn rename_properties(self, strategy: impl Fn(&str) -> String) -> Result<Bundle<TypeData>>;

    /// See [`OptionalAnnotationStep`]
    ///
    /// # Errors
    ///
    /// Never fails today; kept fallible so it chains like every other step.
    fn handle_optional_annotation(self) -> Result<Bundle<TypeData>>;

    /// See [`SchemaGenerationStep`]
    ///
    /// # Errors
    ///
    /// Fails when the bundle violates the closure invariant.
    fn generate_schemas<S: SchemaBuilder>(self) -> Result<Bundle<SchemaEntry<S>>>;
}

impl TypeBundleExt for Bundle<TypeData> {
    fn rename_properties(self, strategy: impl Fn(&str) -> String) -> Result<Bundle<TypeData>> {
        RenamePropertiesStep::new(strategy).process(self)
    }

    fn handle_optional_annotation(self) -> Result<Bundle<TypeData>> {
        OptionalAnnotationStep.process(self)
    }

    fn generate_schemas<S: SchemaBuilder>(self) -> Result<Bundle<SchemaEntry<S>>> {
        SchemaGenerationStep::new().process(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AnnotationData, PropertyData};
    use crate::type_id::TypeId;

    fn bundle() -> Bundle<TypeData> {
        let id = TypeId::build("Account");
        let mut bundle = Bundle::new(vec![id.clone()]);
        bundle.insert(
            id.clone(),
            TypeData::object(id)
                .member(PropertyData::new("user_name", TypeId::build("String")))
                .member(
                    PropertyData::new("nick_name", TypeId::build("String"))
                        .annotated(AnnotationData::new(annotations::OPTIONAL)),
                ),
        );
        bundle
    }

    fn camel_case(name: &str) -> String {
        let mut out = String::new();
        let mut upper = false;
        for c in name.chars() {
            if c == '_' {
                upper = true;
            } else if upper {
                out.extend(c.to_uppercase());
                upper = false;
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn renames_every_member() {
        let renamed = bundle().rename_properties(camel_case).unwrap();
        let account = renamed.get(&TypeId::build("Account")).unwrap();
        let names: Vec<&str> = account.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["userName", "nickName"]);
    }

    #[test]
    fn optional_annotation_marks_member() {
        let processed = bundle().handle_optional_annotation().unwrap();
        let account = processed.get(&TypeId::build("Account")).unwrap();
        assert!(!account.find_member("user_name").unwrap().optional);
        assert!(account.find_member("nick_name").unwrap().optional);
    }
}

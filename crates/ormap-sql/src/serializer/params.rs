use super::{Formatter, ToSql};

use crate::Param;

/// Collects the parameters referenced while serializing.
pub trait Params {
    /// Registers a parameter and returns the placeholder to render. A
    /// parameter already registered under the same name is reused.
    fn push(&mut self, param: Param) -> Placeholder;

    /// Number of parameters registered so far.
    fn count(&self) -> usize;
}

/// A parameter reference, `@name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder(pub String);

/// A batch-local variable, `@name`. Variables are declared by the batch and
/// bind no value.
pub(crate) struct Variable<S>(pub(crate) S);

impl Params for Vec<Param> {
    fn push(&mut self, param: Param) -> Placeholder {
        let placeholder = Placeholder(param.name.clone());

        if !self.iter().any(|existing| existing.name == param.name) {
            Vec::push(self, param);
        }

        placeholder
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('@');
        f.dst.push_str(&self.0);
    }
}

impl<S: AsRef<str>> ToSql for Variable<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('@');
        f.dst.push_str(self.0.as_ref());
    }
}

/// Registers `param` and renders its placeholder.
impl ToSql for Param {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        placeholder.to_sql(f);
    }
}

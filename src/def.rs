use std::sync::Arc;

use smallvec::SmallVec;
use tracing::trace;

use crate::errors::SignatureError;
use crate::library::Library;
use crate::types::SequenceType;
use crate::xdm::QName;

/// One declared parameter of an extension function.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: SequenceType,
    pub name: String,
    pub optional: bool,
}

impl Param {
    pub fn new(ty: SequenceType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            optional: false,
        }
    }

    pub fn optional(ty: SequenceType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            optional: true,
        }
    }
}

pub(crate) type ParamList = SmallVec<[Param; 4]>;

/// Immutable signature of one extension function.
///
/// Invariants, enforced at construction: the non-optional parameters form a
/// contiguous prefix of the declaration order, `min_arity` equals their
/// count, `max_arity` equals the total parameter count.
#[derive(Debug, Clone)]
pub struct Definition {
    name: QName,
    params: ParamList,
    result: SequenceType,
    min_arity: usize,
    max_arity: usize,
}

impl Definition {
    pub fn new(
        name: QName,
        params: impl IntoIterator<Item = Param>,
        result: SequenceType,
    ) -> Result<Self, SignatureError> {
        let params: ParamList = params.into_iter().collect();
        let mut optional = 0usize;
        for p in &params {
            if !p.optional && optional > 0 {
                return Err(SignatureError::MandatoryAfterOptional(p.name.clone()));
            }
            if p.optional {
                optional += 1;
            }
        }
        let max_arity = params.len();
        let min_arity = max_arity - optional;
        Ok(Self {
            name,
            params,
            result,
            min_arity,
            max_arity,
        })
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param(&self, pos: usize) -> Option<&Param> {
        self.params.get(pos)
    }

    /// Declared types per position, in order, for the host's static checker.
    pub fn param_types(&self) -> impl Iterator<Item = SequenceType> + '_ {
        self.params.iter().map(|p| p.ty)
    }

    pub fn result(&self) -> SequenceType {
        self.result
    }

    pub fn min_arity(&self) -> usize {
        self.min_arity
    }

    pub fn max_arity(&self) -> usize {
        self.max_arity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Mandatory,
    Optional,
}

/// Fluent, single-use builder for one [`Definition`].
///
/// The builder is a monotonic state machine: it starts collecting mandatory
/// parameters, [`DefBuilder::optional`] switches it to collecting optional
/// ones, and there is no way back. [`DefBuilder::finish`] consumes the
/// builder, commits the definition into the owning library and returns it.
#[derive(Debug)]
pub struct DefBuilder<'a> {
    lib: &'a Library,
    name: QName,
    result: Option<SequenceType>,
    params: ParamList,
    stage: Stage,
}

impl<'a> DefBuilder<'a> {
    pub(crate) fn new(lib: &'a Library, name: QName) -> Self {
        Self {
            lib,
            name,
            result: None,
            params: ParamList::new(),
            stage: Stage::Mandatory,
        }
    }

    /// Set the declared result type. Required before [`DefBuilder::finish`].
    #[must_use]
    pub fn result(mut self, ty: SequenceType) -> Self {
        self.result = Some(ty);
        self
    }

    /// All parameters added after this call are optional. Calling it a
    /// second time on the same builder is a configuration fault.
    pub fn optional(mut self) -> Result<Self, SignatureError> {
        if self.stage == Stage::Optional {
            return Err(SignatureError::OptionalTwice);
        }
        self.stage = Stage::Optional;
        Ok(self)
    }

    /// Append a parameter; call order is declaration order.
    #[must_use]
    pub fn param(mut self, ty: SequenceType, name: &str) -> Self {
        let param = match self.stage {
            Stage::Mandatory => Param::new(ty, name),
            Stage::Optional => Param::optional(ty, name),
        };
        self.params.push(param);
        self
    }

    /// Validate, build the immutable [`Definition`] and commit it into the
    /// owning library under its qualified name.
    pub fn finish(self) -> Result<Arc<Definition>, SignatureError> {
        let result = self.result.ok_or(SignatureError::MissingResultType)?;
        let def = Arc::new(Definition::new(self.name, self.params, result)?);
        trace!(name = %def.name(), min = def.min_arity(), max = def.max_arity(),
            "built function definition");
        self.lib.commit(def.clone())?;
        Ok(def)
    }
}

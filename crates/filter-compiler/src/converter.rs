use crate::{
    auth::Policy,
    config::Config,
    convert::PredicateCompiler,
    error::{ConversionError, ConvertError, ErrorCode, SetupError},
    limits::{self, Limits},
    observer::{SecurityObserver, TracingObserver},
    schema::Schema,
};
use filter_syntax::{Diagnostics, Environment};
use model::{
    checked::expr::CheckedExpr,
    core::{value::Value, value_type::ValueType},
};
use planner::{Dialect, Predicate};
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, warn};

/// Turns source text into a typed tree.
pub trait ExpressionCompiler: Send + Sync {
    fn compile(&self, source: &str) -> Result<CheckedExpr, Diagnostics>;
}

impl ExpressionCompiler for Environment {
    fn compile(&self, source: &str) -> Result<CheckedExpr, Diagnostics> {
        Environment::compile(self, source)
    }
}

/// A successfully converted expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub predicate: Predicate,
    pub depth: usize,
}

impl Conversion {
    pub fn render(&self, dialect: &dyn Dialect) -> (String, Vec<Value>) {
        self.predicate.to_sql(dialect)
    }

    pub fn columns(&self) -> Vec<String> {
        self.predicate.columns()
    }
}

/// Converts filter expressions against a fixed schema, policy and set of
/// limits. Immutable after construction and safe to share across threads.
pub struct Converter {
    compiler: Box<dyn ExpressionCompiler>,
    schema: Schema,
    policy: Policy,
    limits: Limits,
    observer: Arc<dyn SecurityObserver>,
}

impl Converter {
    /// Build a converter whose expression environment declares every
    /// configured field.
    pub fn new(config: Config) -> Result<Self, SetupError> {
        let schema = config.schema();
        let env = Environment::new(
            config
                .fields
                .iter()
                .map(|field| (field.name.clone(), field.ty.clone())),
        )?;
        debug!(fields = schema.len(), "filter converter initialised");
        Ok(Self::assemble(config, schema, Box::new(env)))
    }

    /// Build a converter that compiles expressions with `compiler` instead
    /// of a generated environment.
    pub fn with_compiler(config: Config, compiler: impl ExpressionCompiler + 'static) -> Self {
        let schema = config.schema();
        Self::assemble(config, schema, Box::new(compiler))
    }

    fn assemble(config: Config, schema: Schema, compiler: Box<dyn ExpressionCompiler>) -> Self {
        Converter {
            compiler,
            schema,
            policy: config.policy(),
            limits: config.limits(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SecurityObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Convert without field authorization.
    pub fn convert(&self, source: &str) -> Result<Conversion, ConvertError> {
        self.observed(source, None)
    }

    /// Convert, rejecting any referenced field the roles may not use. Behaves
    /// like [`Converter::convert`] when the policy is empty.
    pub fn convert_with_auth(
        &self,
        source: &str,
        roles: &[String],
    ) -> Result<Conversion, ConvertError> {
        self.observed(source, Some(roles))
    }

    fn observed(&self, source: &str, roles: Option<&[String]>) -> Result<Conversion, ConvertError> {
        let started = Instant::now();
        let result = self.run(source, roles);
        self.observer.conversion_attempt(
            source,
            result.as_ref().map(|_| ()),
            started.elapsed(),
        );

        match &result {
            Ok(conversion) => debug!(depth = conversion.depth, "filter expression converted"),
            Err(ConvertError::Rejected(err)) => warn!(
                code = %err.code(),
                detail = err.internal(),
                "filter expression rejected"
            ),
            Err(ConvertError::Contract(violation)) => error!(
                violation = %violation,
                expression = source,
                "expression compiler contract violated"
            ),
        }
        result
    }

    fn run(&self, source: &str, roles: Option<&[String]>) -> Result<Conversion, ConvertError> {
        let length = self.limits.check_length(source)?;

        let checked = self.compiler.compile(source).map_err(|diagnostics| {
            ConversionError::new(
                ErrorCode::InvalidSyntax,
                format!("expression compilation failed: {}", diagnostics),
            )
        })?;

        if checked.ty != ValueType::Bool {
            return Err(ConversionError::new(
                ErrorCode::InvalidType,
                format!("expected bool, got {}", checked.ty),
            )
            .into());
        }

        let depth = limits::depth(&checked);
        self.limits.check_depth(depth)?;
        if self.limits.is_complex(depth, length) {
            self.observer.complex_expression(source, depth, length);
        }

        if let Some(roles) = roles {
            self.authorize(source, &checked, roles)?;
        }

        let predicate =
            PredicateCompiler::new(&self.schema, &self.limits, self.observer.as_ref(), source)
                .compile(&checked)?;

        Ok(Conversion { predicate, depth })
    }

    fn authorize(
        &self,
        source: &str,
        checked: &CheckedExpr,
        roles: &[String],
    ) -> Result<(), ConversionError> {
        if !self.policy.is_enabled() {
            return Ok(());
        }
        match self.policy.first_unauthorized(checked, roles) {
            None => Ok(()),
            Some(field) => {
                self.observer.unauthorized_field(source, &field, roles);
                Err(ConversionError::new(
                    ErrorCode::UnauthorizedField,
                    format!(
                        "roles {:?} attempted to filter by restricted field: {}",
                        roles, field
                    ),
                ))
            }
        }
    }
}

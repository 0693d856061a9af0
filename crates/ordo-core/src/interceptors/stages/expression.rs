//! Expression expansion.

use tracing::warn;

use crate::expressions::{self, evaluate, parse};
use crate::interceptors::{Context, Interceptor, MAX_DEPTH, ResolveError};
use crate::secrets::SecretHandlers;
use crate::value::ConfigValue;

/// Expands `${...}` references in resolved values.
///
/// References resolve from the top of the chain. A key of the form
/// `handler::input` is decoded by the named secret handler instead. The
/// value's [`raw_value`](ConfigValue::raw_value) keeps the text as read.
#[derive(Debug, Clone, Default)]
pub struct ExpressionStage {
    handlers: SecretHandlers,
}

impl ExpressionStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handlers(handlers: SecretHandlers) -> Self {
        Self { handlers }
    }

    fn expand(&self, context: &Context<'_>, value: ConfigValue) -> Result<ConfigValue, ResolveError> {
        let Some(text) = value.value() else {
            return Ok(value);
        };
        if !text.contains('$') {
            return Ok(value);
        }

        let nested = context.reenter();
        let property = value.name();
        let expanded = evaluate(&parse(text), &mut |reference: &str, has_default: bool| {
            if let Some((handler, secret)) = reference.split_once("::") {
                return self.handlers.decode(handler, secret, property).map(Some);
            }
            match nested.proceed(reference)? {
                Some(found) if found.value().is_some() => Ok(found.value().map(str::to_string)),
                _ if has_default => Ok(None),
                _ => Err(ResolveError::MissingReference {
                    reference: reference.to_string(),
                    property: property.to_string(),
                }),
            }
        })?;
        Ok(value.with_value(expanded))
    }
}

impl Interceptor for ExpressionStage {
    fn name(&self) -> &str {
        "expression"
    }

    fn get_value(&self, context: &Context<'_>, name: &str) -> Result<Option<ConfigValue>, ResolveError> {
        if context.depth() >= MAX_DEPTH {
            warn!(event = "core.expression.depth_exceeded", name = name, depth = context.depth());
            return Err(ResolveError::ExpansionTooDeep {
                name: name.to_string(),
            });
        }
        let value = context.proceed(name)?;
        if !expressions::is_enabled() {
            return Ok(value);
        }
        value.map(|value| self.expand(context, value)).transpose()
    }

    fn iterate_values(&self, context: &Context<'_>) -> Result<Vec<ConfigValue>, ResolveError> {
        let values = context.iterate_values()?;
        if !expressions::is_enabled() {
            return Ok(values);
        }
        values.into_iter().map(|value| self.expand(context, value)).collect()
    }
}

use tracing::trace;

use crate::conversions::{Conversion, ConversionClassifier};
use crate::expr::{ExprIndex, ExprKind};
use crate::type_queries::{delegate_param_count, is_codeblock_like, is_object, is_usual};
use crate::types::TypeId;

impl ConversionClassifier<'_> {
    /// Conversion of a lambda expression to `target`.
    ///
    /// Delegates need a matching parameter count; the legacy dialects also
    /// take an untyped lambda with fewer parameters, and let lambdas flow
    /// into codeblocks, `USUAL` and `OBJECT`.
    pub fn classify_anonymous_function(&self, lambda: ExprIndex, target: TypeId) -> Conversion {
        let Some(&ExprKind::Lambda { params, typed }) = self.exprs.kind(lambda) else {
            return Conversion::NoConversion;
        };
        let types = self.types;
        let vo = self.options.vo_rules();

        let conversion = if let Some(expected) = delegate_param_count(types, target) {
            if params == expected || (vo && !typed && params < expected) {
                Conversion::ImplicitReference
            } else {
                Conversion::NoConversion
            }
        } else if vo && is_usual(types, target) {
            Conversion::Boxing
        } else if vo && (is_object(types, target) || is_codeblock_like(types, target)) {
            Conversion::ImplicitReference
        } else {
            Conversion::NoConversion
        };
        trace!(params, typed, target = %types.name(target), ?conversion, "classify_anonymous_function");
        conversion
    }
}

//! Assignment conversion binding.

use xbase_solver::{Conversion, ConversionMode, ConversionQuery, ExprIndex, TypeId};

use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// Classify and commit the conversion of `expr` to `target_type`.
    ///
    /// A missing conversion is an error unless either side is already the
    /// error type.
    pub fn bind_assignment(&mut self, expr: ExprIndex, target_type: TypeId) -> Conversion {
        let query = ConversionQuery::expr(self.ctx.exprs, expr, target_type);
        let conversion = self
            .ctx
            .classifier()
            .classify_implicit(query, ConversionMode::Commit);
        let span = self.expr_span(expr);
        if !conversion.exists() {
            if query.source != TypeId::ERROR && target_type != TypeId::ERROR {
                self.report_cannot_convert(query.source, target_type, span);
            }
            return conversion;
        }
        self.report_conversion_warnings(expr, query.source, target_type, span);
        conversion
    }
}

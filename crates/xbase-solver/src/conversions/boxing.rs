use crate::conversions::ConversionClassifier;
use crate::type_queries::{
    is_array, is_codeblock_like, is_currency, is_interface, is_legacy_array_like, is_legacy_date,
    is_legacy_float, is_legacy_symbol, is_pointer_like, is_psz, is_reference_type, is_string,
    is_usual,
};
use crate::types::{TypeId, TypeTable};

impl ConversionClassifier<'_> {
    /// Whether `source` boxes into `target`.
    ///
    /// Interfaces always box into `USUAL`. With the legacy runtime, pointer
    /// and `DATE` targets always box, while strings, arrays, codeblocks and
    /// the format provider never do.
    pub fn has_boxing_conversion(&self, source: TypeId, target: TypeId) -> bool {
        let types = self.types;
        if is_interface(types, source) && is_usual(types, target) {
            return true;
        }
        if !self.options.vo_rules() {
            return self.standard.has_boxing_conversion(types, source, target);
        }
        if is_pointer_like(types, target) || is_legacy_date(types, target) {
            return true;
        }
        if is_string(types, target)
            || is_array(types, target)
            || is_legacy_array_like(types, target)
            || is_codeblock_like(types, target)
            || target == TypeId::FORMAT_PROVIDER
        {
            return false;
        }
        if is_reference_type(types, target) {
            return !is_legacy_scalar(types, source)
                && self.standard.has_boxing_conversion(types, source, target);
        }
        self.standard.has_boxing_conversion(types, source, target)
    }
}

/// Legacy value types that reach reference targets only through their
/// operators.
fn is_legacy_scalar(types: &TypeTable, id: TypeId) -> bool {
    is_legacy_symbol(types, id)
        || is_psz(types, id)
        || is_legacy_float(types, id)
        || is_currency(types, id)
        || is_legacy_date(types, id)
}

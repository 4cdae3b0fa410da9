//! Dialect configuration.
//!
//! A [`DialectOptions`] value is built once per compilation unit and threaded
//! explicitly through every lookup, classification and tie-break query. Source
//! level pragmas never mutate it; they derive a new value via
//! [`DialectOptions::with_pragma`].

use serde::Deserialize;
use std::fmt;

/// Legacy-language compatibility mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Core language rules only.
    #[default]
    Core,
    Vo,
    Vulcan,
    Harbour,
    #[serde(rename = "xpp")]
    XBasePP,
    FoxPro,
}

impl Dialect {
    /// Whether the VO-style conversion ruleset and the USUAL runtime are active.
    pub const fn has_legacy_runtime(self) -> bool {
        !matches!(self, Dialect::Core)
    }

    /// Whether a free function beats a same-named static method during lookup.
    pub const fn prefers_free_functions(self) -> bool {
        !matches!(self, Dialect::Core)
    }

    pub fn parse(name: &str) -> Option<Dialect> {
        match name.to_ascii_lowercase().as_str() {
            "core" => Some(Dialect::Core),
            "vo" => Some(Dialect::Vo),
            "vulcan" => Some(Dialect::Vulcan),
            "harbour" => Some(Dialect::Harbour),
            "xpp" | "xbasepp" => Some(Dialect::XBasePP),
            "foxpro" => Some(Dialect::FoxPro),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Core => "Core",
            Dialect::Vo => "VO",
            Dialect::Vulcan => "Vulcan",
            Dialect::Harbour => "Harbour",
            Dialect::XBasePP => "Xbase++",
            Dialect::FoxPro => "FoxPro",
        };
        f.write_str(name)
    }
}

/// Compatibility switches that can be toggled per source location.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pragma {
    PreferFunctions,
    SignedUnsignedConversion,
    ArithmeticConversions,
    PointerMagic,
    ImplicitCastAndConversion,
    LateBinding,
}

impl Pragma {
    /// Parse a pragma option name. Accepts both the short option codes
    /// (`vo4`, `vo7`, `vo11`, `lb`) and the descriptive names.
    pub fn parse(name: &str) -> Option<Pragma> {
        match name.to_ascii_lowercase().as_str() {
            "preferfunctions" | "prefer-functions" => Some(Pragma::PreferFunctions),
            "vo4" | "signedunsignedconversion" => Some(Pragma::SignedUnsignedConversion),
            "vo11" | "arithmeticconversions" => Some(Pragma::ArithmeticConversions),
            "vo6" | "pointermagic" => Some(Pragma::PointerMagic),
            "vo7" | "implicitcastandconversion" => Some(Pragma::ImplicitCastAndConversion),
            "lb" | "latebinding" => Some(Pragma::LateBinding),
            _ => None,
        }
    }
}

/// Read-only bundle of dialect compatibility flags.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialectOptions {
    pub dialect: Dialect,
    /// Look for free functions at namespace level before walking the
    /// regular scope chain.
    pub prefer_functions_outside_class_scope: bool,
    /// Same-width signed/unsigned integral types convert implicitly.
    pub signed_unsigned_conversion: bool,
    /// Numeric types of different widths convert implicitly.
    pub arithmetic_conversions: bool,
    /// Pointer/integer reinterpretation and pointer boxing.
    pub pointer_magic: bool,
    /// Implicit downcasts and object/pointer bridging.
    pub implicit_cast_and_conversion: bool,
    pub late_binding: bool,
    pub case_sensitive: bool,
    /// Platform pointer width in bytes.
    pub pointer_size: u8,
}

impl Default for DialectOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Core,
            prefer_functions_outside_class_scope: false,
            signed_unsigned_conversion: false,
            arithmetic_conversions: false,
            pointer_magic: false,
            implicit_cast_and_conversion: false,
            late_binding: false,
            case_sensitive: false,
            pointer_size: 8,
        }
    }
}

impl DialectOptions {
    /// Preset for a dialect with every optional compatibility flag off.
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            prefer_functions_outside_class_scope: dialect.prefers_free_functions(),
            case_sensitive: matches!(dialect, Dialect::Core),
            ..Self::default()
        }
    }

    /// Load options from a JSON object. Absent keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let options: DialectOptions = serde_json::from_str(text)?;
        tracing::debug!(dialect = %options.dialect, "loaded dialect options");
        Ok(options)
    }

    /// Derive the options in effect under a source-level pragma override.
    #[must_use]
    pub fn with_pragma(&self, pragma: Pragma, enabled: bool) -> Self {
        let mut options = self.clone();
        match pragma {
            Pragma::PreferFunctions => options.prefer_functions_outside_class_scope = enabled,
            Pragma::SignedUnsignedConversion => options.signed_unsigned_conversion = enabled,
            Pragma::ArithmeticConversions => options.arithmetic_conversions = enabled,
            Pragma::PointerMagic => options.pointer_magic = enabled,
            Pragma::ImplicitCastAndConversion => options.implicit_cast_and_conversion = enabled,
            Pragma::LateBinding => options.late_binding = enabled,
        }
        options
    }

    #[must_use]
    pub fn with_flags(mut self, pragmas: &[Pragma]) -> Self {
        for &pragma in pragmas {
            self = self.with_pragma(pragma, true);
        }
        self
    }

    #[inline]
    pub const fn vo_rules(&self) -> bool {
        self.dialect.has_legacy_runtime()
    }

    /// Either numeric compatibility flag is on.
    #[inline]
    pub const fn any_numeric_compat(&self) -> bool {
        self.signed_unsigned_conversion || self.arithmetic_conversions
    }

    /// Compare two identifiers under the configured case sensitivity.
    pub fn names_equal(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }
}

#[cfg(test)]
#[path = "tests/dialect_tests.rs"]
mod tests;

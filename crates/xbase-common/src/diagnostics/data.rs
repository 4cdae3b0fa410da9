use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_messages {
    pub const CANNOT_CONVERT_TYPE: &str = "Cannot implicitly convert type '{0}' to '{1}'.";
    pub const AMBIGUOUS_REFERENCE: &str = "'{0}' is an ambiguous reference between '{1}' and '{2}'.";
    pub const AMBIGUOUS_CALL: &str =
        "The call is ambiguous between the following methods or properties: '{0}' and '{1}'.";
    pub const INACCESSIBLE_SYMBOL: &str = "'{0}' is inaccessible due to its protection level ({1}).";
    pub const NO_APPLICABLE_OVERLOAD: &str = "No overload for method '{0}' takes these arguments.";
    pub const SIGNED_UNSIGNED_CONVERSION: &str =
        "Conversion from '{0}' to '{1}' may change the sign of the result.";
    pub const NARROWING_CONVERSION: &str =
        "Conversion from '{0}' to '{1}' may lead to loss of data or overflow errors.";
    pub const AMBIGUOUS_FUNCTION_AND_METHOD: &str =
        "Ambiguous call: '{0}' could be the function '{1}' or the method '{2}'. The method was chosen.";
    pub const FUNCTION_CHOSEN_FROM_ASSEMBLY: &str =
        "Function '{0}' exists in several assemblies; the one in '{1}' was chosen.";
}

pub mod diagnostic_codes {
    pub const CANNOT_CONVERT_TYPE: u32 = 29;
    pub const AMBIGUOUS_REFERENCE: u32 = 104;
    pub const AMBIGUOUS_CALL: u32 = 121;
    pub const INACCESSIBLE_SYMBOL: u32 = 122;
    pub const NO_APPLICABLE_OVERLOAD: u32 = 1501;
    pub const SIGNED_UNSIGNED_CONVERSION: u32 = 9020;
    pub const NARROWING_CONVERSION: u32 = 9021;
    pub const AMBIGUOUS_FUNCTION_AND_METHOD: u32 = 9043;
    pub const FUNCTION_CHOSEN_FROM_ASSEMBLY: u32 = 9044;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_CONVERT_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_CONVERT_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_REFERENCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AMBIGUOUS_REFERENCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_CALL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AMBIGUOUS_CALL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INACCESSIBLE_SYMBOL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INACCESSIBLE_SYMBOL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_APPLICABLE_OVERLOAD,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_APPLICABLE_OVERLOAD,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SIGNED_UNSIGNED_CONVERSION,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::SIGNED_UNSIGNED_CONVERSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NARROWING_CONVERSION,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::NARROWING_CONVERSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_FUNCTION_AND_METHOD,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::AMBIGUOUS_FUNCTION_AND_METHOD,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FUNCTION_CHOSEN_FROM_ASSEMBLY,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::FUNCTION_CHOSEN_FROM_ASSEMBLY,
    },
];

//! Enumerated simple types of the operator model schema
//!
//! Every enumeration serializes as its XSD literal token (`NonWindowed`,
//! `Expecting`, ...) and defaults to its first literal, which is the value an
//! unset attribute of that type reads as.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error for a token outside an enumeration's literal set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{literal}' is not a valid {enumeration} literal")]
pub struct LiteralError {
    /// Schema name of the enumeration
    pub enumeration: &'static str,
    /// The rejected token
    pub literal: String,
}

macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($xml_name:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $literal:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Schema (XSD) name of this enumeration
            pub const XML_NAME: &'static str = $xml_name;

            /// All literals, in schema order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The literal token written to XML
            pub fn literal(&self) -> &'static str {
                match self {
                    $($name::$variant => $literal),+
                }
            }

            /// Ordinal value of the literal
            pub fn value(&self) -> u32 {
                *self as u32
            }

            pub fn from_value(value: u32) -> Option<Self> {
                Self::ALL.get(value as usize).copied()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.literal())
            }
        }

        impl FromStr for $name {
            type Err = LiteralError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let token = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.literal() == token)
                    .ok_or_else(|| LiteralError {
                        enumeration: $xml_name,
                        literal: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.literal())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = String::deserialize(deserializer)?;
                token.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

literal_enum! {
    /// How a parameter or output assignment value may be written in SPL
    ExpressionMode("expressionModeType") {
        Attribute => "Attribute",
        AttributeFree => "AttributeFree",
        Constant => "Constant",
        CustomLiteral => "CustomLiteral",
        Expression => "Expression",
        Nonexistent => "Nonexistent",
    }
}

literal_enum! {
    /// When the compiler must regenerate operator code
    IncrementalCompilationStrategy("incrementalCompilationStrategyType") {
        SourceDependent => "SourceDependent",
        ResultDependent => "ResultDependent",
    }
}

literal_enum! {
    /// Expression modes available to Java operator parameters
    JavaOpExpressionMode("javaOpExpressionModeType") {
        Attribute => "Attribute",
        AttributeFree => "AttributeFree",
        CustomLiteral => "CustomLiteral",
    }
}

literal_enum! {
    MetricKind("metricKindType") {
        Gauge => "Gauge",
        Counter => "Counter",
        Time => "Time",
    }
}

literal_enum! {
    /// Whether the operator provides a single-threaded context
    SingleThreadedContext("singleThreadedContextType") {
        Never => "Never",
        Always => "Always",
        WindowBound => "WindowBound",
        WindowTriggerBound => "WindowTriggerBound",
        WindowEvictionBound => "WindowEvictionBound",
        WindowPartitionEvictionBound => "WindowPartitionEvictionBound",
    }
}

literal_enum! {
    WindowExpressionMode("windowExpressionModeType") {
        Constant => "Constant",
        AttributeFree => "AttributeFree",
    }
}

literal_enum! {
    /// Windowing support of an input port set
    WindowingMode("windowingModeType") {
        NonWindowed => "NonWindowed",
        Windowed => "Windowed",
        OptionallyWindowed => "OptionallyWindowed",
    }
}

literal_enum! {
    /// Punctuation expectations of an input port set
    WindowPunctuationInputMode("windowPunctuationInputModeType") {
        Expecting => "Expecting",
        Oblivious => "Oblivious",
        WindowBound => "WindowBound",
    }
}

literal_enum! {
    /// Punctuation behaviour of an output port set
    WindowPunctuationOutputMode("windowPunctuationOutputModeType") {
        Generating => "Generating",
        Free => "Free",
        Preserving => "Preserving",
    }
}

impl SingleThreadedContext {
    /// True for the literals whose guarantee depends on the window configuration
    pub fn is_window_dependent(&self) -> bool {
        !matches!(
            self,
            SingleThreadedContext::Never | SingleThreadedContext::Always
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_parse_back() {
        for mode in WindowingMode::ALL {
            assert_eq!(mode.literal().parse::<WindowingMode>().unwrap(), *mode);
        }
        for ctx in SingleThreadedContext::ALL {
            assert_eq!(
                ctx.to_string().parse::<SingleThreadedContext>().unwrap(),
                *ctx
            );
        }
    }

    #[test]
    fn test_unknown_literal_rejected() {
        let err = "nonWindowed".parse::<WindowingMode>().unwrap_err();
        assert_eq!(err.enumeration, "windowingModeType");
        assert_eq!(err.literal, "nonWindowed");
        assert!("".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_defaults_are_first_literal() {
        assert_eq!(WindowingMode::default(), WindowingMode::NonWindowed);
        assert_eq!(ExpressionMode::default(), ExpressionMode::Attribute);
        assert_eq!(
            WindowPunctuationOutputMode::default(),
            WindowPunctuationOutputMode::Generating
        );
    }

    #[test]
    fn test_token_whitespace_is_collapsed() {
        assert_eq!(
            " Counter\n".parse::<MetricKind>().unwrap(),
            MetricKind::Counter
        );
    }

    #[test]
    fn test_values_follow_schema_order() {
        assert_eq!(MetricKind::Time.value(), 2);
        assert_eq!(MetricKind::from_value(1), Some(MetricKind::Counter));
        assert_eq!(MetricKind::from_value(3), None);
    }

    #[test]
    fn test_serde_uses_literal() {
        let json = serde_json::to_string(&WindowPunctuationInputMode::WindowBound).unwrap();
        assert_eq!(json, "\"WindowBound\"");
        let back: WindowPunctuationInputMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, WindowPunctuationInputMode::WindowBound);
        assert!(serde_json::from_str::<WindowPunctuationInputMode>("\"Sometimes\"").is_err());
    }
}

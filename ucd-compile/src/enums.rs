//! The small closed enumerations that appear in a `CodepointRecord`.
//!
//! Each enum's `Display` implementation prints the exact C identifier the
//! runtime normalization header expects (see the emitter in `writer.rs`),
//! and each `FromStr` implementation accepts the short code used in the
//! corresponding Unicode character database column.

use std::fmt;
use std::str::FromStr;

use error::Error;
use ucd_parse::UnicodeDataDecompositionTag;

macro_rules! c_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { default = $default:ident; $($variant:ident => $short:expr),+ $(,)* }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        pub enum $name {
            $($variant),+
        }

        impl Default for $name {
            fn default() -> $name {
                $name::$default
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<$name, Error> {
                Ok(match s {
                    $($short => $name::$variant,)+
                    _ => return err!(
                        "unrecognized {} value: '{}'", stringify!($name), s),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let name = match *self {
                    $($name::$variant => concat!(stringify!($name), "_", stringify!($variant))),+
                };
                write!(f, "{}", name)
            }
        }
    }
}

c_enum! {
    /// The `General_Category` property, one of 30 values.
    pub enum GeneralCategory {
        default = Unassigned;
        UppercaseLetter => "Lu",
        LowercaseLetter => "Ll",
        TitlecaseLetter => "Lt",
        ModifierLetter => "Lm",
        OtherLetter => "Lo",
        NonspacingMark => "Mn",
        SpacingMark => "Mc",
        EnclosingMark => "Me",
        DecimalNumber => "Nd",
        LetterNumber => "Nl",
        OtherNumber => "No",
        ConnectorPunctuation => "Pc",
        DashPunctuation => "Pd",
        OpenPunctuation => "Ps",
        ClosePunctuation => "Pe",
        InitialPunctuation => "Pi",
        FinalPunctuation => "Pf",
        OtherPunctuation => "Po",
        MathSymbol => "Sm",
        CurrencySymbol => "Sc",
        ModifierSymbol => "Sk",
        OtherSymbol => "So",
        SpaceSeparator => "Zs",
        LineSeparator => "Zl",
        ParagraphSeparator => "Zp",
        Control => "Cc",
        Format => "Cf",
        Surrogate => "Cs",
        PrivateUse => "Co",
        Unassigned => "Cn",
    }
}

c_enum! {
    /// The `Bidi_Class` property, one of 23 values.
    pub enum BidiClass {
        default = LeftToRight;
        LeftToRight => "L",
        LeftToRightEmbedding => "LRE",
        LeftToRightOverride => "LRO",
        RightToLeft => "R",
        ArabicLetter => "AL",
        RightToLeftEmbedding => "RLE",
        RightToLeftOverride => "RLO",
        PopDirectionalFormat => "PDF",
        EuropeanNumber => "EN",
        EuropeanSeparator => "ES",
        EuropeanTerminator => "ET",
        ArabicNumber => "AN",
        CommonSeparator => "CS",
        NonspacingMark => "NSM",
        BoundaryNeutral => "BN",
        ParagraphSeparator => "B",
        SegmentSeparator => "S",
        WhiteSpace => "WS",
        OtherNeutral => "ON",
        LeftToRightIsolate => "LRI",
        RightToLeftIsolate => "RLI",
        FirstStrongIsolate => "FSI",
        PopDirectionalIsolate => "PDI",
    }
}

/// The `Decomposition_Type` property.
///
/// Unlike `GeneralCategory` and `BidiClass`, this isn't parsed directly
/// from a short code column; it's derived from the optional formatting tag
/// on a `UnicodeData.txt` decomposition field (see `From<Option<&..Tag>>`
/// below), so it doesn't need a `FromStr` impl of its own.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecompositionType {
    /// No tag: an equivalence-preserving decomposition.
    Canonical,
    /// `<font>`
    Font,
    /// `<noBreak>`
    NoBreak,
    /// `<initial>`
    InitialArabic,
    /// `<medial>`
    MedialArabic,
    /// `<final>`
    FinalArabic,
    /// `<isolated>`
    IsolatedArabic,
    /// `<circle>`
    Circle,
    /// `<super>`
    Superscript,
    /// `<sub>`
    Subscript,
    /// `<vertical>`
    Vertical,
    /// `<wide>`
    Wide,
    /// `<narrow>`
    Narrow,
    /// `<small>`
    Small,
    /// `<square>`
    SquaredCJK,
    /// `<fraction>`
    Fraction,
    /// `<compat>`
    Unspecified,
}

impl Default for DecompositionType {
    fn default() -> DecompositionType {
        DecompositionType::Canonical
    }
}

impl DecompositionType {
    /// Returns true for the canonical (tagless) decomposition type.
    ///
    /// Only canonical decompositions feed NFD and the composition pass;
    /// every other tag is compatibility-only (see `Database::resolve`).
    pub fn is_canonical(&self) -> bool {
        *self == DecompositionType::Canonical
    }
}

impl<'a> From<Option<&'a UnicodeDataDecompositionTag>> for DecompositionType {
    fn from(tag: Option<&'a UnicodeDataDecompositionTag>) -> DecompositionType {
        use self::DecompositionType::*;
        use ucd_parse::UnicodeDataDecompositionTag as Tag;

        match tag {
            None => Canonical,
            Some(&Tag::Font) => Font,
            Some(&Tag::NoBreak) => NoBreak,
            Some(&Tag::Initial) => InitialArabic,
            Some(&Tag::Medial) => MedialArabic,
            Some(&Tag::Final) => FinalArabic,
            Some(&Tag::Isolated) => IsolatedArabic,
            Some(&Tag::Circle) => Circle,
            Some(&Tag::Super) => Superscript,
            Some(&Tag::Sub) => Subscript,
            Some(&Tag::Vertical) => Vertical,
            Some(&Tag::Wide) => Wide,
            Some(&Tag::Narrow) => Narrow,
            Some(&Tag::Small) => Small,
            Some(&Tag::Square) => SquaredCJK,
            Some(&Tag::Fraction) => Fraction,
            Some(&Tag::Compat) => Unspecified,
        }
    }
}

impl fmt::Display for DecompositionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::DecompositionType::*;
        let name = match *self {
            Canonical => "DecompositionType_Canonical",
            Font => "DecompositionType_Font",
            NoBreak => "DecompositionType_NoBreak",
            InitialArabic => "DecompositionType_InitialArabic",
            MedialArabic => "DecompositionType_MedialArabic",
            FinalArabic => "DecompositionType_FinalArabic",
            IsolatedArabic => "DecompositionType_IsolatedArabic",
            Circle => "DecompositionType_Circle",
            Superscript => "DecompositionType_Superscript",
            Subscript => "DecompositionType_Subscript",
            Vertical => "DecompositionType_Vertical",
            Wide => "DecompositionType_Wide",
            Narrow => "DecompositionType_Narrow",
            Small => "DecompositionType_Small",
            SquaredCJK => "DecompositionType_SquaredCJK",
            Fraction => "DecompositionType_Fraction",
            Unspecified => "DecompositionType_Unspecified",
        };
        write!(f, "{}", name)
    }
}

/// The `Numeric_Type` property.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NumericType {
    /// No numeric value.
    None,
    /// `Numeric_Type=Decimal`.
    Decimal,
    /// `Numeric_Type=Digit`.
    Digit,
    /// `Numeric_Type=Numeric`.
    Numeric,
}

impl Default for NumericType {
    fn default() -> NumericType {
        NumericType::None
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            NumericType::None => "NumericType_None",
            NumericType::Decimal => "NumericType_Decimal",
            NumericType::Digit => "NumericType_Digit",
            NumericType::Numeric => "NumericType_Numeric",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::{BidiClass, GeneralCategory};

    #[test]
    fn general_category_round_trips_known_codes() {
        let gc: GeneralCategory = "Ll".parse().unwrap();
        assert_eq!(gc, GeneralCategory::LowercaseLetter);
        assert_eq!(gc.to_string(), "GeneralCategory_LowercaseLetter");
    }

    #[test]
    fn general_category_defaults_to_unassigned() {
        assert_eq!(GeneralCategory::default(), GeneralCategory::Unassigned);
    }

    #[test]
    fn general_category_rejects_unknown_code() {
        assert!("Zz".parse::<GeneralCategory>().is_err());
    }

    #[test]
    fn bidi_class_round_trips_known_codes() {
        let bc: BidiClass = "AL".parse().unwrap();
        assert_eq!(bc, BidiClass::ArabicLetter);
        assert_eq!(bc.to_string(), "BidiClass_ArabicLetter");
    }
}

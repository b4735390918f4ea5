//! Numbering format names and the marker text they produce.

use std::fmt;

/// Marker used for bulleted paragraphs.
pub const BULLET_MARKER: &str = "--";

/// A `w:numFmt` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumFmt {
    Decimal,
    LowerLetter,
    UpperLetter,
    LowerRoman,
    UpperRoman,
    Bullet,
    /// `none`: the level shows no marker
    None,
    /// Any other format (e.g. `decimalZero`, `ordinal`), kept verbatim
    Other(String),
}

impl NumFmt {
    pub fn parse(name: &str) -> Self {
        match name {
            "decimal" => NumFmt::Decimal,
            "lowerLetter" => NumFmt::LowerLetter,
            "upperLetter" => NumFmt::UpperLetter,
            "lowerRoman" => NumFmt::LowerRoman,
            "upperRoman" => NumFmt::UpperRoman,
            "bullet" => NumFmt::Bullet,
            "none" => NumFmt::None,
            other => NumFmt::Other(other.to_string()),
        }
    }

    /// Marker for the `count`-th paragraph (1-based) of a list level.
    ///
    /// Unrecognized formats are rendered as decimal.
    pub fn marker(&self, count: u32) -> String {
        match self {
            NumFmt::Decimal | NumFmt::Other(_) => format!("{})", count),
            NumFmt::LowerLetter => format!("{})", letters(count)),
            NumFmt::UpperLetter => format!("{})", letters(count).to_uppercase()),
            NumFmt::LowerRoman => format!("{})", roman(count)),
            NumFmt::UpperRoman => format!("{})", roman(count).to_uppercase()),
            NumFmt::Bullet => BULLET_MARKER.to_string(),
            NumFmt::None => String::new(),
        }
    }
}

impl fmt::Display for NumFmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumFmt::Decimal => "decimal",
            NumFmt::LowerLetter => "lowerLetter",
            NumFmt::UpperLetter => "upperLetter",
            NumFmt::LowerRoman => "lowerRoman",
            NumFmt::UpperRoman => "upperRoman",
            NumFmt::Bullet => "bullet",
            NumFmt::None => "none",
            NumFmt::Other(name) => name.as_str(),
        };
        f.write_str(name)
    }
}

/// Word-style letter numbering: a..z, then aa..zz, aaa..
fn letters(count: u32) -> String {
    if count == 0 {
        return "0".to_string();
    }
    let letter = (b'a' + ((count - 1) % 26) as u8) as char;
    let repeat = ((count - 1) / 26 + 1) as usize;
    std::iter::repeat(letter).take(repeat).collect()
}

fn roman(mut count: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    if count == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while count >= value {
            out.push_str(numeral);
            count -= value;
        }
    }
    out
}

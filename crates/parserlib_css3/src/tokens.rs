use lazy_static::lazy_static;
use parserlib_shared::location::Location;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// The kinds of tokens the tokenizer produces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Eof,
    /// `&`
    Amp,
    /// `@name`
    At,
    /// `|=`, `~=`, `^=`, `*=` or `$=`
    AttrEq,
    /// `<!--` or `-->`
    Cdco,
    /// Any character that has no token of its own
    Char,
    Colon,
    /// `~` or `||` (`+` and `>` have their own kinds as they can also be math operators)
    Combinator,
    Comma,
    Comment,
    /// `!`
    Delim,
    Dot,
    Equals,
    /// `>=` or `<=`
    EqCmp,
    Function,
    Gt,
    Hash,
    Ident,
    /// Unterminated string or broken unicode range
    Invalid,
    LBrace,
    LBracket,
    LParen,
    Minus,
    Pipe,
    Plus,
    RBrace,
    RBracket,
    RParen,
    Semicolon,
    Star,
    String,
    URange,
    Uri,
    /// A `/*[[name]]*/` variable placeholder comment
    Uvar,
    Whitespace,
    // numbers
    Angle,
    Dimension,
    Flex,
    Frequency,
    Length,
    Number,
    Percentage,
    Resolution,
    Time,
}

impl TokenKind {
    /// Upper case name of the kind as used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Amp => "AMP",
            TokenKind::At => "AT",
            TokenKind::AttrEq => "ATTR_EQ",
            TokenKind::Cdco => "CDCO",
            TokenKind::Char => "CHAR",
            TokenKind::Colon => "COLON",
            TokenKind::Combinator => "COMBINATOR",
            TokenKind::Comma => "COMMA",
            TokenKind::Comment => "COMMENT",
            TokenKind::Delim => "DELIM",
            TokenKind::Dot => "DOT",
            TokenKind::Equals => "EQUALS",
            TokenKind::EqCmp => "EQ_CMP",
            TokenKind::Function => "FUNCTION",
            TokenKind::Gt => "GT",
            TokenKind::Hash => "HASH",
            TokenKind::Ident => "IDENT",
            TokenKind::Invalid => "INVALID",
            TokenKind::LBrace => "LBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::LParen => "LPAREN",
            TokenKind::Minus => "MINUS",
            TokenKind::Pipe => "PIPE",
            TokenKind::Plus => "PLUS",
            TokenKind::RBrace => "RBRACE",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::RParen => "RPAREN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Star => "STAR",
            TokenKind::String => "STRING",
            TokenKind::URange => "URANGE",
            TokenKind::Uri => "URI",
            TokenKind::Uvar => "UVAR",
            TokenKind::Whitespace => "WS",
            TokenKind::Angle => "ANGLE",
            TokenKind::Dimension => "DIMENSION",
            TokenKind::Flex => "FLEX",
            TokenKind::Frequency => "FREQUENCY",
            TokenKind::Length => "LENGTH",
            TokenKind::Number => "NUMBER",
            TokenKind::Percentage => "PCT",
            TokenKind::Resolution => "RESOLUTION",
            TokenKind::Time => "TIME",
        }
    }

    /// Literal texts of kinds that always look the same
    pub fn texts(&self) -> &'static [&'static str] {
        match self {
            TokenKind::Amp => &["&"],
            TokenKind::AttrEq => &["|=", "~=", "^=", "*=", "$="],
            TokenKind::Colon => &[":"],
            TokenKind::Combinator => &["~", "||"],
            TokenKind::Comma => &[","],
            TokenKind::Delim => &["!"],
            TokenKind::Dot => &["."],
            TokenKind::Equals => &["="],
            TokenKind::EqCmp => &[">=", "<="],
            TokenKind::Gt => &[">"],
            TokenKind::Hash => &["#"],
            TokenKind::LBrace => &["{"],
            TokenKind::LBracket => &["["],
            TokenKind::LParen => &["("],
            TokenKind::Minus => &["-"],
            TokenKind::Pipe => &["|"],
            TokenKind::Plus => &["+"],
            TokenKind::RBrace => &["}"],
            TokenKind::RBracket => &["]"],
            TokenKind::RParen => &[")"],
            TokenKind::Semicolon => &[";"],
            TokenKind::Star => &["*"],
            _ => &[],
        }
    }

    /// Describes the kind for "Expected ..." messages: the quoted literal when there is one,
    /// otherwise the kind name.
    pub fn describe(&self) -> String {
        let texts = self.texts();
        if texts.is_empty() {
            self.name().to_string()
        } else {
            format!("\"{}\"", texts.join(","))
        }
    }

    /// Kind of the single character tokens
    pub fn from_char(c: char) -> Option<TokenKind> {
        let kind = match c {
            '&' => TokenKind::Amp,
            ':' => TokenKind::Colon,
            '~' => TokenKind::Combinator,
            ',' => TokenKind::Comma,
            '!' => TokenKind::Delim,
            '.' => TokenKind::Dot,
            '=' => TokenKind::Equals,
            '>' => TokenKind::Gt,
            '{' => TokenKind::LBrace,
            '[' => TokenKind::LBracket,
            '(' => TokenKind::LParen,
            '-' => TokenKind::Minus,
            '|' => TokenKind::Pipe,
            '+' => TokenKind::Plus,
            '}' => TokenKind::RBrace,
            ']' => TokenKind::RBracket,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TokenKind::Angle
                | TokenKind::Dimension
                | TokenKind::Flex
                | TokenKind::Frequency
                | TokenKind::Length
                | TokenKind::Number
                | TokenKind::Percentage
                | TokenKind::Resolution
                | TokenKind::Time
        )
    }

    /// Tokens the parser never sees unless it explicitly asks for them
    pub fn is_hidden(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::Whitespace | TokenKind::Uvar)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Category of a known unit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitCategory {
    Angle,
    Flex,
    Frequency,
    Length,
    Resolution,
    Time,
}

impl UnitCategory {
    pub fn token_kind(&self) -> TokenKind {
        match self {
            UnitCategory::Angle => TokenKind::Angle,
            UnitCategory::Flex => TokenKind::Flex,
            UnitCategory::Frequency => TokenKind::Frequency,
            UnitCategory::Length => TokenKind::Length,
            UnitCategory::Resolution => TokenKind::Resolution,
            UnitCategory::Time => TokenKind::Time,
        }
    }
}

const LENGTH_UNITS: &[&str] = &[
    "cap", "ch", "em", "ex", "ic", "lh", "rcap", "rch", "rem", "rex", "ric", "rlh", "cm", "mm",
    "in", "pc", "pt", "px", "q", "cqw", "cqh", "cqi", "cqb", "cqmin", "cqmax", "vb", "vi", "vh",
    "vw", "vmin", "vmax", "dvb", "dvi", "dvh", "dvw", "dvmin", "dvmax", "lvb", "lvi", "lvh", "lvw",
    "lvmin", "lvmax", "svb", "svi", "svh", "svw", "svmin", "svmax",
];

lazy_static! {
    /// Lowercase unit name to its category
    pub static ref UNITS: HashMap<&'static str, UnitCategory> = {
        let mut units = HashMap::new();
        for u in LENGTH_UNITS {
            units.insert(*u, UnitCategory::Length);
        }
        for u in ["deg", "grad", "rad", "turn"] {
            units.insert(u, UnitCategory::Angle);
        }
        units.insert("fr", UnitCategory::Flex);
        for u in ["hz", "khz"] {
            units.insert(u, UnitCategory::Frequency);
        }
        for u in ["dpcm", "dpi", "dppx", "x"] {
            units.insert(u, UnitCategory::Resolution);
        }
        for u in ["ms", "s"] {
            units.insert(u, UnitCategory::Time);
        }
        units
    };
}

/// A small case-insensitive keyword set
#[derive(Clone, Copy, Debug)]
pub struct Keywords(pub &'static [&'static str]);

impl Keywords {
    pub fn has(&self, text: &str) -> bool {
        self.0.iter().any(|k| k.eq_ignore_ascii_case(text))
    }

    /// `"a", "b"` as used in diagnostics
    pub fn describe(&self) -> String {
        format!("\"{}\"", self.0.join("\", \""))
    }
}

pub const AND: Keywords = Keywords(&["and"]);
pub const AND_OR: Keywords = Keywords(&["and", "or"]);
pub const ATTR_FLAGS: Keywords = Keywords(&["i", "s", "]"]);
pub const AUTO: Keywords = Keywords(&["auto"]);
pub const EVEN_ODD: Keywords = Keywords(&["even", "odd"]);
pub const FROM_TO: Keywords = Keywords(&["from", "to"]);
pub const IMPORTANT: Keywords = Keywords(&["important"]);
pub const LAYER: Keywords = Keywords(&["layer"]);
pub const NONE: Keywords = Keywords(&["none"]);
pub const NOT: Keywords = Keywords(&["not"]);
pub const NOT_ONLY: Keywords = Keywords(&["not", "only"]);
pub const OF: Keywords = Keywords(&["of"]);
pub const OR: Keywords = Keywords(&["or"]);
pub const TO: Keywords = Keywords(&["to"]);
pub const GLOBAL_KEYWORDS: Keywords = Keywords(&["initial", "inherit", "revert", "unset"]);
pub const MARGIN_SYMS: Keywords = Keywords(&[
    "bottom-center",
    "bottom-left-corner",
    "bottom-left",
    "bottom-right-corner",
    "bottom-right",
    "left-bottom",
    "left-middle",
    "left-top",
    "right-bottom",
    "right-middle",
    "right-top",
    "top-center",
    "top-left-corner",
    "top-left",
    "top-right-corner",
    "top-right",
]);

/// Named colors, `currentcolor`, `transparent` and the CSS2 system colors
pub const NAMED_COLORS: Keywords = Keywords(&[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgrey", "darkgreen", "darkkhaki", "darkmagenta",
    "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
    "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "grey", "green",
    "greenyellow", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgreen", "lightgray", "lightgrey", "lightpink", "lightsalmon",
    "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
    "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
    "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell",
    "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen",
    "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen", "currentcolor", "transparent", "activeborder",
    "activecaption", "appworkspace", "background", "buttonface", "buttonhighlight", "buttonshadow",
    "buttontext", "captiontext", "graytext", "greytext", "highlight", "highlighttext",
    "inactiveborder", "inactivecaption", "inactivecaptiontext", "infobackground", "infotext",
    "menu", "menutext", "scrollbar", "threeddarkshadow", "threedface", "threedhighlight",
    "threedlightshadow", "threedshadow", "window", "windowframe", "windowtext",
]);

/// Kind-specific data of a token
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TokenValue {
    None,
    Ident {
        /// Unescaped name
        name: String,
        /// Position of the name after a `-vendor-` prefix (0 when there is no prefix)
        vendor_pos: usize,
        /// `--custom-property`
        custom: bool,
    },
    Function {
        /// Lowercase name without vendor prefix
        name: String,
        /// Lowercase `-vendor-` prefix
        prefix: Option<String>,
        /// `progid:...(` filter function
        ie: bool,
    },
    Uri {
        uri: String,
        /// `url`, `url-prefix` or `domain`
        name: String,
    },
    At {
        /// Lowercase name without vendor prefix
        name: String,
        prefix: Option<String>,
    },
    Hash {
        name: String,
    },
    String {
        /// Unquoted, unescaped value
        value: String,
    },
    Number {
        value: f64,
        /// Lowercase unit, `%` for percentages, empty for plain numbers
        unit: String,
        is_int: bool,
    },
    Uvar {
        name: String,
    },
    Star {
        /// `*` directly followed by an identifier (the IE star hack)
        hack: bool,
    },
}

/// A token produced by the tokenizer. Tokens are never changed once produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    /// Raw source text of the token
    pub text: String,
    /// Start of the token
    pub location: Location,
    /// Position right after the token
    pub end: Location,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, text: &str, location: Location, end: Location) -> Self {
        Self {
            kind,
            value,
            text: text.to_string(),
            location,
            end,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Lowercase text of the token
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Case-insensitive check against a keyword set (identifiers only)
    pub fn is_keyword(&self, keywords: &Keywords) -> bool {
        self.kind == TokenKind::Ident && keywords.has(&self.text)
    }

    /// Name of an identifier, function, at-rule or hash
    pub fn name(&self) -> &str {
        match &self.value {
            TokenValue::Ident { name, .. }
            | TokenValue::Function { name, .. }
            | TokenValue::Uri { name, .. }
            | TokenValue::At { name, .. }
            | TokenValue::Hash { name }
            | TokenValue::Uvar { name } => name,
            TokenValue::String { value } => value,
            _ => &self.text,
        }
    }

    /// Vendor prefix of functions and at-rules
    pub fn prefix(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Function { prefix, .. } | TokenValue::At { prefix, .. } => prefix.as_deref(),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match &self.value {
            TokenValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn unit(&self) -> &str {
        match &self.value {
            TokenValue::Number { unit, .. } => unit,
            _ => "",
        }
    }

    /// A plain number without a fractional part or exponent
    pub fn is_int(&self) -> bool {
        matches!(&self.value, TokenValue::Number { is_int: true, .. })
    }

    /// A plain `0` without units
    pub fn is_zero(&self) -> bool {
        matches!(&self.value, TokenValue::Number { value, unit, .. } if unit.is_empty() && *value == 0.0)
    }

    pub fn is_custom_ident(&self) -> bool {
        matches!(&self.value, TokenValue::Ident { custom: true, .. })
    }

    pub fn vendor_pos(&self) -> usize {
        match &self.value {
            TokenValue::Ident { vendor_pos, .. } => *vendor_pos,
            _ => 0,
        }
    }

    pub fn is_ie_function(&self) -> bool {
        matches!(&self.value, TokenValue::Function { ie: true, .. })
    }

    pub fn has_star_hack(&self) -> bool {
        matches!(&self.value, TokenValue::Star { hack: true })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Cuts a text to `len` characters, adding `...` when something was cut off
pub fn clip_string(s: &str, len: usize) -> String {
    if s.chars().count() > len {
        format!("{}...", s.chars().take(len).collect::<String>())
    } else {
        s.to_string()
    }
}

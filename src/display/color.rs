use serde::{Deserialize, Deserializer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const WHITE: Self = Self(0xff, 0xff, 0xff);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_color(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized color `{}`", raw)))
    }
}

/// Parse the color strings the editor core sends: `#rrggbb`, `#rgb`, or a
/// CSS color name.
pub fn parse_color(value: &str) -> Option<Rgb> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        return match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Rgb(r, g, b))
            }
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Rgb(r * 17, g * 17, b * 17))
            }
            _ => None,
        };
    }

    // X11 spellings such as "Light Sky Blue" name the same colors.
    let key: String = v
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    NAMED
        .binary_search_by(|(name, _)| (*name).cmp(key.as_str()))
        .ok()
        .map(|i| NAMED[i].1)
}

/// CSS named colors, sorted for binary search.
const NAMED: &[(&str, Rgb)] = &[
    ("aliceblue", Rgb(0xf0, 0xf8, 0xff)),
    ("antiquewhite", Rgb(0xfa, 0xeb, 0xd7)),
    ("aqua", Rgb(0x00, 0xff, 0xff)),
    ("aquamarine", Rgb(0x7f, 0xff, 0xd4)),
    ("azure", Rgb(0xf0, 0xff, 0xff)),
    ("beige", Rgb(0xf5, 0xf5, 0xdc)),
    ("bisque", Rgb(0xff, 0xe4, 0xc4)),
    ("black", Rgb(0x00, 0x00, 0x00)),
    ("blanchedalmond", Rgb(0xff, 0xeb, 0xcd)),
    ("blue", Rgb(0x00, 0x00, 0xff)),
    ("blueviolet", Rgb(0x8a, 0x2b, 0xe2)),
    ("brown", Rgb(0xa5, 0x2a, 0x2a)),
    ("burlywood", Rgb(0xde, 0xb8, 0x87)),
    ("cadetblue", Rgb(0x5f, 0x9e, 0xa0)),
    ("chartreuse", Rgb(0x7f, 0xff, 0x00)),
    ("chocolate", Rgb(0xd2, 0x69, 0x1e)),
    ("coral", Rgb(0xff, 0x7f, 0x50)),
    ("cornflowerblue", Rgb(0x64, 0x95, 0xed)),
    ("cornsilk", Rgb(0xff, 0xf8, 0xdc)),
    ("crimson", Rgb(0xdc, 0x14, 0x3c)),
    ("cyan", Rgb(0x00, 0xff, 0xff)),
    ("darkblue", Rgb(0x00, 0x00, 0x8b)),
    ("darkcyan", Rgb(0x00, 0x8b, 0x8b)),
    ("darkgoldenrod", Rgb(0xb8, 0x86, 0x0b)),
    ("darkgray", Rgb(0xa9, 0xa9, 0xa9)),
    ("darkgreen", Rgb(0x00, 0x64, 0x00)),
    ("darkgrey", Rgb(0xa9, 0xa9, 0xa9)),
    ("darkkhaki", Rgb(0xbd, 0xb7, 0x6b)),
    ("darkmagenta", Rgb(0x8b, 0x00, 0x8b)),
    ("darkolivegreen", Rgb(0x55, 0x6b, 0x2f)),
    ("darkorange", Rgb(0xff, 0x8c, 0x00)),
    ("darkorchid", Rgb(0x99, 0x32, 0xcc)),
    ("darkred", Rgb(0x8b, 0x00, 0x00)),
    ("darksalmon", Rgb(0xe9, 0x96, 0x7a)),
    ("darkseagreen", Rgb(0x8f, 0xbc, 0x8f)),
    ("darkslateblue", Rgb(0x48, 0x3d, 0x8b)),
    ("darkslategray", Rgb(0x2f, 0x4f, 0x4f)),
    ("darkslategrey", Rgb(0x2f, 0x4f, 0x4f)),
    ("darkturquoise", Rgb(0x00, 0xce, 0xd1)),
    ("darkviolet", Rgb(0x94, 0x00, 0xd3)),
    ("deeppink", Rgb(0xff, 0x14, 0x93)),
    ("deepskyblue", Rgb(0x00, 0xbf, 0xff)),
    ("dimgray", Rgb(0x69, 0x69, 0x69)),
    ("dimgrey", Rgb(0x69, 0x69, 0x69)),
    ("dodgerblue", Rgb(0x1e, 0x90, 0xff)),
    ("firebrick", Rgb(0xb2, 0x22, 0x22)),
    ("floralwhite", Rgb(0xff, 0xfa, 0xf0)),
    ("forestgreen", Rgb(0x22, 0x8b, 0x22)),
    ("fuchsia", Rgb(0xff, 0x00, 0xff)),
    ("gainsboro", Rgb(0xdc, 0xdc, 0xdc)),
    ("ghostwhite", Rgb(0xf8, 0xf8, 0xff)),
    ("gold", Rgb(0xff, 0xd7, 0x00)),
    ("goldenrod", Rgb(0xda, 0xa5, 0x20)),
    ("gray", Rgb(0x80, 0x80, 0x80)),
    ("green", Rgb(0x00, 0x80, 0x00)),
    ("greenyellow", Rgb(0xad, 0xff, 0x2f)),
    ("grey", Rgb(0x80, 0x80, 0x80)),
    ("honeydew", Rgb(0xf0, 0xff, 0xf0)),
    ("hotpink", Rgb(0xff, 0x69, 0xb4)),
    ("indianred", Rgb(0xcd, 0x5c, 0x5c)),
    ("indigo", Rgb(0x4b, 0x00, 0x82)),
    ("ivory", Rgb(0xff, 0xff, 0xf0)),
    ("khaki", Rgb(0xf0, 0xe6, 0x8c)),
    ("lavender", Rgb(0xe6, 0xe6, 0xfa)),
    ("lavenderblush", Rgb(0xff, 0xf0, 0xf5)),
    ("lawngreen", Rgb(0x7c, 0xfc, 0x00)),
    ("lemonchiffon", Rgb(0xff, 0xfa, 0xcd)),
    ("lightblue", Rgb(0xad, 0xd8, 0xe6)),
    ("lightcoral", Rgb(0xf0, 0x80, 0x80)),
    ("lightcyan", Rgb(0xe0, 0xff, 0xff)),
    ("lightgoldenrodyellow", Rgb(0xfa, 0xfa, 0xd2)),
    ("lightgray", Rgb(0xd3, 0xd3, 0xd3)),
    ("lightgreen", Rgb(0x90, 0xee, 0x90)),
    ("lightgrey", Rgb(0xd3, 0xd3, 0xd3)),
    ("lightpink", Rgb(0xff, 0xb6, 0xc1)),
    ("lightsalmon", Rgb(0xff, 0xa0, 0x7a)),
    ("lightseagreen", Rgb(0x20, 0xb2, 0xaa)),
    ("lightskyblue", Rgb(0x87, 0xce, 0xfa)),
    ("lightslategray", Rgb(0x77, 0x88, 0x99)),
    ("lightslategrey", Rgb(0x77, 0x88, 0x99)),
    ("lightsteelblue", Rgb(0xb0, 0xc4, 0xde)),
    ("lightyellow", Rgb(0xff, 0xff, 0xe0)),
    ("lime", Rgb(0x00, 0xff, 0x00)),
    ("limegreen", Rgb(0x32, 0xcd, 0x32)),
    ("linen", Rgb(0xfa, 0xf0, 0xe6)),
    ("magenta", Rgb(0xff, 0x00, 0xff)),
    ("maroon", Rgb(0x80, 0x00, 0x00)),
    ("mediumaquamarine", Rgb(0x66, 0xcd, 0xaa)),
    ("mediumblue", Rgb(0x00, 0x00, 0xcd)),
    ("mediumorchid", Rgb(0xba, 0x55, 0xd3)),
    ("mediumpurple", Rgb(0x93, 0x70, 0xdb)),
    ("mediumseagreen", Rgb(0x3c, 0xb3, 0x71)),
    ("mediumslateblue", Rgb(0x7b, 0x68, 0xee)),
    ("mediumspringgreen", Rgb(0x00, 0xfa, 0x9a)),
    ("mediumturquoise", Rgb(0x48, 0xd1, 0xcc)),
    ("mediumvioletred", Rgb(0xc7, 0x15, 0x85)),
    ("midnightblue", Rgb(0x19, 0x19, 0x70)),
    ("mintcream", Rgb(0xf5, 0xff, 0xfa)),
    ("mistyrose", Rgb(0xff, 0xe4, 0xe1)),
    ("moccasin", Rgb(0xff, 0xe4, 0xb5)),
    ("navajowhite", Rgb(0xff, 0xde, 0xad)),
    ("navy", Rgb(0x00, 0x00, 0x80)),
    ("oldlace", Rgb(0xfd, 0xf5, 0xe6)),
    ("olive", Rgb(0x80, 0x80, 0x00)),
    ("olivedrab", Rgb(0x6b, 0x8e, 0x23)),
    ("orange", Rgb(0xff, 0xa5, 0x00)),
    ("orangered", Rgb(0xff, 0x45, 0x00)),
    ("orchid", Rgb(0xda, 0x70, 0xd6)),
    ("palegoldenrod", Rgb(0xee, 0xe8, 0xaa)),
    ("palegreen", Rgb(0x98, 0xfb, 0x98)),
    ("paleturquoise", Rgb(0xaf, 0xee, 0xee)),
    ("palevioletred", Rgb(0xdb, 0x70, 0x93)),
    ("papayawhip", Rgb(0xff, 0xef, 0xd5)),
    ("peachpuff", Rgb(0xff, 0xda, 0xb9)),
    ("peru", Rgb(0xcd, 0x85, 0x3f)),
    ("pink", Rgb(0xff, 0xc0, 0xcb)),
    ("plum", Rgb(0xdd, 0xa0, 0xdd)),
    ("powderblue", Rgb(0xb0, 0xe0, 0xe6)),
    ("purple", Rgb(0x80, 0x00, 0x80)),
    ("rebeccapurple", Rgb(0x66, 0x33, 0x99)),
    ("red", Rgb(0xff, 0x00, 0x00)),
    ("rosybrown", Rgb(0xbc, 0x8f, 0x8f)),
    ("royalblue", Rgb(0x41, 0x69, 0xe1)),
    ("saddlebrown", Rgb(0x8b, 0x45, 0x13)),
    ("salmon", Rgb(0xfa, 0x80, 0x72)),
    ("sandybrown", Rgb(0xf4, 0xa4, 0x60)),
    ("seagreen", Rgb(0x2e, 0x8b, 0x57)),
    ("seashell", Rgb(0xff, 0xf5, 0xee)),
    ("sienna", Rgb(0xa0, 0x52, 0x2d)),
    ("silver", Rgb(0xc0, 0xc0, 0xc0)),
    ("skyblue", Rgb(0x87, 0xce, 0xeb)),
    ("slateblue", Rgb(0x6a, 0x5a, 0xcd)),
    ("slategray", Rgb(0x70, 0x80, 0x90)),
    ("slategrey", Rgb(0x70, 0x80, 0x90)),
    ("snow", Rgb(0xff, 0xfa, 0xfa)),
    ("springgreen", Rgb(0x00, 0xff, 0x7f)),
    ("steelblue", Rgb(0x46, 0x82, 0xb4)),
    ("tan", Rgb(0xd2, 0xb4, 0x8c)),
    ("teal", Rgb(0x00, 0x80, 0x80)),
    ("thistle", Rgb(0xd8, 0xbf, 0xd8)),
    ("tomato", Rgb(0xff, 0x63, 0x47)),
    ("turquoise", Rgb(0x40, 0xe0, 0xd0)),
    ("violet", Rgb(0xee, 0x82, 0xee)),
    ("wheat", Rgb(0xf5, 0xde, 0xb3)),
    ("white", Rgb(0xff, 0xff, 0xff)),
    ("whitesmoke", Rgb(0xf5, 0xf5, 0xf5)),
    ("yellow", Rgb(0xff, 0xff, 0x00)),
    ("yellowgreen", Rgb(0x9a, 0xcd, 0x32)),
];

/// The default foreground/background every uncolored draw falls back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgb(0xd0, 0xd0, 0xd0),
            background: Rgb(0x1c, 0x1c, 0x1c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/color.rs"]
mod tests;

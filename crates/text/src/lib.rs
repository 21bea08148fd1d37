use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// The character the server uses to introduce a legacy formatting code.
pub const FORMATTING_MARKER: char = '§';

static FORMATTING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?i)§[0-9a-fk-or]").expect("formatting pattern is valid"));

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorCode {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ColorCode {
    pub fn parse(code: char) -> Option<ColorCode> {
        Some(match code.to_ascii_lowercase() {
            '0' => ColorCode::Black,
            '1' => ColorCode::DarkBlue,
            '2' => ColorCode::DarkGreen,
            '3' => ColorCode::DarkAqua,
            '4' => ColorCode::DarkRed,
            '5' => ColorCode::DarkPurple,
            '6' => ColorCode::Gold,
            '7' => ColorCode::Gray,
            '8' => ColorCode::DarkGray,
            '9' => ColorCode::Blue,
            'a' => ColorCode::Green,
            'b' => ColorCode::Aqua,
            'c' => ColorCode::Red,
            'd' => ColorCode::LightPurple,
            'e' => ColorCode::Yellow,
            'f' => ColorCode::White,
            'k' => ColorCode::Obfuscated,
            'l' => ColorCode::Bold,
            'm' => ColorCode::Strikethrough,
            'n' => ColorCode::Underline,
            'o' => ColorCode::Italic,
            'r' => ColorCode::Reset,
            _ => return None,
        })
    }

    pub fn code(self) -> char {
        use ColorCode::*;
        match self {
            Black => '0',
            DarkBlue => '1',
            DarkGreen => '2',
            DarkAqua => '3',
            DarkRed => '4',
            DarkPurple => '5',
            Gold => '6',
            Gray => '7',
            DarkGray => '8',
            Blue => '9',
            Green => 'a',
            Aqua => 'b',
            Red => 'c',
            LightPurple => 'd',
            Yellow => 'e',
            White => 'f',
            Obfuscated => 'k',
            Bold => 'l',
            Strikethrough => 'm',
            Underline => 'n',
            Italic => 'o',
            Reset => 'r',
        }
    }

    fn is_formatting(self) -> bool {
        use ColorCode::*;
        matches!(
            self,
            Obfuscated | Bold | Strikethrough | Underline | Italic | Reset
        )
    }
}

impl std::fmt::Display for ColorCode {
    /// Writes the legacy form of the code, e.g. `§a`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", FORMATTING_MARKER, self.code())
    }
}

/// Returns true if `message` contains the legacy formatting marker anywhere.
pub fn contains_formatting(message: &str) -> bool {
    message.contains(FORMATTING_MARKER)
}

/// Removes every legacy formatting code from `message`.
pub fn strip_formatting(message: &str) -> String {
    FORMATTING_REGEX.replace_all(message, "").into_owned()
}

/// This is only used for `TextComponent` serialize
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(field: &bool) -> bool {
    !*field
}

pub struct TextComponentBuilder {
    component: TextComponent,
}

impl TextComponentBuilder {
    pub fn new(text: String) -> Self {
        let component = TextComponent {
            text,
            ..Default::default()
        };
        Self { component }
    }

    pub fn color_code(mut self, color: ColorCode) -> Self {
        self.component.color = Some(color);
        self
    }

    pub fn finish(self) -> TextComponent {
        self.component
    }
}

#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct TextComponent {
    pub text: String,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underlined: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub obfuscated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorCode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    /// Splits a `§`-coded string into styled components. Unknown codes are kept as text.
    pub fn from_legacy_text(message: &str) -> Vec<TextComponent> {
        let mut components = Vec::new();
        let mut cur_component: TextComponent = Default::default();

        let mut chars = message.chars();
        while let Some(c) = chars.next() {
            if c != FORMATTING_MARKER {
                cur_component.text.push(c);
                continue;
            }
            let Some(code) = chars.next() else {
                cur_component.text.push(c);
                break;
            };
            let Some(color) = ColorCode::parse(code) else {
                cur_component.text.push(c);
                cur_component.text.push(code);
                continue;
            };

            if color.is_formatting() && color != ColorCode::Reset {
                if !cur_component.text.is_empty() {
                    let mut next = cur_component.clone();
                    next.text.clear();
                    components.push(std::mem::replace(&mut cur_component, next));
                }
                match color {
                    ColorCode::Bold => cur_component.bold = true,
                    ColorCode::Italic => cur_component.italic = true,
                    ColorCode::Underline => cur_component.underlined = true,
                    ColorCode::Strikethrough => cur_component.strikethrough = true,
                    _ => cur_component.obfuscated = true,
                }
                continue;
            }

            // Colors and resets drop any formatting that came before them
            if !cur_component.text.is_empty() {
                components.push(std::mem::take(&mut cur_component));
            } else {
                cur_component = Default::default();
            }
            if color != ColorCode::Reset {
                cur_component.color = Some(color);
            }
        }
        if !cur_component.text.is_empty() || components.is_empty() {
            components.push(cur_component);
        }
        components
    }

    /// Wraps a sequence of components into one root component.
    pub fn join(parts: Vec<TextComponent>) -> TextComponent {
        TextComponent {
            extra: parts,
            ..Default::default()
        }
    }

    pub fn encode_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Plain text of this component and all of its children.
    pub fn to_plain_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.extra {
            out.push_str(&child.to_plain_text());
        }
        out
    }
}

impl<S> From<S> for TextComponent
where
    S: Into<String>,
{
    fn from(value: S) -> Self {
        TextComponent {
            text: value.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_code_display_is_legacy_form() {
        assert_eq!(ColorCode::Green.to_string(), "§a");
        assert_eq!(format!("{}Steve{}", ColorCode::Gold, ColorCode::Reset), "§6Steve§r");
        for c in "0123456789abcdefklmnor".chars() {
            assert_eq!(ColorCode::parse(c).map(ColorCode::code), Some(c));
        }
        assert_eq!(ColorCode::parse('z'), None);
    }

    #[test]
    fn detects_and_strips_formatting() {
        assert!(contains_formatting("hi §cthere"));
        assert!(!contains_formatting("hi &cthere"));
        assert_eq!(strip_formatting("§6Steve§r says §Lhi"), "Steve says hi");
        assert_eq!(strip_formatting("§z stays"), "§z stays");
    }

    #[test]
    fn legacy_text_splits_on_colors() {
        let parts = TextComponent::from_legacy_text("hello §aSteve§r!");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], TextComponent::from("hello "));
        assert_eq!(parts[1].text, "Steve");
        assert_eq!(parts[1].color, Some(ColorCode::Green));
        assert_eq!(parts[2], TextComponent::from("!"));
    }

    #[test]
    fn legacy_text_keeps_color_across_formatting() {
        let parts = TextComponent::from_legacy_text("§cred §lbold");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].color, Some(ColorCode::Red));
        assert!(!parts[0].bold);
        assert_eq!(parts[1].color, Some(ColorCode::Red));
        assert!(parts[1].bold);
        assert_eq!(parts[1].text, "bold");
    }

    #[test]
    fn legacy_text_keeps_unknown_codes() {
        let parts = TextComponent::from_legacy_text("50§ off §");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text, "50§ off §");
    }

    #[test]
    fn json_skips_default_fields() {
        let component = TextComponentBuilder::new("Player not found".to_string())
            .color_code(ColorCode::Red)
            .finish();
        assert_eq!(
            component.encode_json(),
            r#"{"text":"Player not found","color":"red"}"#
        );
        let joined = TextComponent::join(TextComponent::from_legacy_text("a§ab"));
        assert_eq!(joined.to_plain_text(), "ab");
    }
}

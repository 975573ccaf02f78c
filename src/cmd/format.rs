/*!
format.rs

Styling helpers for human-readable output.

  - StyleOptions::detect() -> StyleOptions   (NO_COLOR / NO_EMOJI aware)
  - color(role, text, &StyleOptions) -> String
  - emoji(tag, &StyleOptions) -> &'static str
  - lead(tag, &StyleOptions) -> String       (emoji plus a space, or nothing)

Returns formatted strings only; never prints. JSON output paths do not use
these helpers.
*/

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        Self {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
        }
    }

    pub fn plain() -> Self {
        Self {
            use_color: false,
            use_emoji: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",    // cyan-ish
        Role::Secondary => "38;5;250", // gray
        Role::Error => "38;5;196",     // red
        Role::Dim => "2",              // faint
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        _ => "",
    }
}

/// Emoji followed by a separating space, or an empty string when emoji are off.
pub fn lead(tag: &str, style: &StyleOptions) -> String {
    match emoji(tag, style) {
        "" => String::new(),
        mark => format!("{mark} "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_is_passthrough() {
        let style = StyleOptions::plain();
        assert_eq!(color(Role::Error, "boom", &style), "boom");
        assert_eq!(emoji("success", &style), "");
    }

    #[test]
    fn colored_output_wraps_in_ansi() {
        let style = StyleOptions {
            use_color: true,
            use_emoji: true,
        };
        let s = color(Role::Error, "boom", &style);
        assert!(s.starts_with("\x1b[38;5;196m"));
        assert!(s.ends_with("\x1b[0m"));
        assert_eq!(emoji("error", &style), "✖");
        assert_eq!(emoji("unknown", &style), "");
    }

    #[test]
    fn lead_only_adds_space_after_an_emoji() {
        let on = StyleOptions {
            use_color: false,
            use_emoji: true,
        };
        assert_eq!(lead("error", &on), "✖ ");
        assert_eq!(lead("unknown", &on), "");
        assert_eq!(lead("error", &StyleOptions::plain()), "");
    }
}

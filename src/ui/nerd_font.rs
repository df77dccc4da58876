/// Nerd font glyphs used as message prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NerdFont {
    Check,       //
    CrossCircle, //
    Warning,     //
    Info,        //
    Download,    //
    Archive,     //
    Terminal,    //
    Gear,        //
    Globe,       //
    Link,        //
    Package,     //
    Desktop,     //
}

impl NerdFont {
    pub const fn unicode(&self) -> char {
        match self {
            Self::Check => '\u{f00c}',       // fa-check
            Self::CrossCircle => '\u{f057}', // fa-times-circle
            Self::Warning => '\u{f071}',     // fa-exclamation-triangle
            Self::Info => '\u{f05a}',        // fa-info-circle
            Self::Download => '\u{f019}',    // fa-download
            Self::Archive => '\u{f187}',     // fa-archive
            Self::Terminal => '\u{f120}',    // fa-terminal
            Self::Gear => '\u{f013}',        // fa-gear
            Self::Globe => '\u{f0ac}',       // fa-globe
            Self::Link => '\u{f0c1}',        // fa-link
            Self::Package => '\u{f487}',     // oct-package
            Self::Desktop => '\u{f108}',     // fa-desktop
        }
    }
}

impl std::fmt::Display for NerdFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.unicode())
    }
}

impl From<NerdFont> for char {
    fn from(icon: NerdFont) -> Self {
        icon.unicode()
    }
}

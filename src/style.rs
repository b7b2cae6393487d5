use std::{
    fmt::Display,
    io::IsTerminal,
    sync::{Arc, LazyLock},
};

use anstyle::{AnsiColor, Style};

/// A theme that indicates how output should be styled.
///
/// Each theme comes with a style for each kind of output Cadence
/// emphasizes. When no theme is set (because the output isn't a terminal or
/// colors were disabled), every style is a no-op.
#[derive(Clone, Debug)]
pub struct Theme {
    inner: Option<Arc<ThemeInner>>,
}

impl Theme {
    /// Returns a theme for stdout.
    pub fn stdout() -> &'static Theme {
        static THEME: LazyLock<Theme> =
            LazyLock::new(|| Theme::detect(tty_stdout()));
        &*THEME
    }

    /// Returns a theme for stderr.
    pub fn stderr() -> &'static Theme {
        static THEME: LazyLock<Theme> =
            LazyLock::new(|| Theme::detect(tty_stderr()));
        &*THEME
    }

    fn detect(tty: bool) -> Theme {
        if !tty || !can_use_colors() {
            return Theme::none();
        }
        Theme { inner: Some(Arc::new(ThemeInner::default())) }
    }

    /// Returns a theme that never does any styling.
    const fn none() -> Theme {
        Theme { inner: None }
    }

    /// Used for log timestamps.
    pub fn highlight<T: Display>(&self, data: T) -> Styled<'_, T> {
        self.styled(data, |inner| &inner.highlight)
    }

    /// Used for headings, e.g., the month title of a calendar.
    pub fn heading<T: Display>(&self, data: T) -> Styled<'_, T> {
        self.styled(data, |inner| &inner.heading)
    }

    /// Used for the current day in a calendar.
    pub fn today<T: Display>(&self, data: T) -> Styled<'_, T> {
        self.styled(data, |inner| &inner.today)
    }

    /// Used for days outside of the month a calendar is showing.
    pub fn dim<T: Display>(&self, data: T) -> Styled<'_, T> {
        self.styled(data, |inner| &inner.dim)
    }

    fn styled<T: Display>(
        &self,
        data: T,
        get: impl FnOnce(&ThemeInner) -> &Style,
    ) -> Styled<'_, T> {
        Styled { data, style: self.inner.as_deref().map(get) }
    }
}

#[derive(Debug)]
struct ThemeInner {
    highlight: Style,
    heading: Style,
    today: Style,
    dim: Style,
}

impl Default for ThemeInner {
    fn default() -> ThemeInner {
        ThemeInner {
            highlight: Style::new()
                .bold()
                .fg_color(Some(AnsiColor::Magenta.into())),
            heading: Style::new().bold(),
            today: Style::new().bold().invert(),
            dim: Style::new().dimmed(),
        }
    }
}

/// A possibly unstyled piece of renderable data.
///
/// When this is unstyled, its `Display` impl does no styling and just
/// renders the underlying data.
#[derive(Clone, Debug)]
pub struct Styled<'s, T> {
    data: T,
    style: Option<&'s Style>,
}

impl<'s, T: Display> Display for Styled<'s, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Some(style) = self.style else {
            return self.data.fmt(f);
        };
        write!(f, "{style}")?;
        write!(f, "{}", self.data)?;
        write!(f, "{style:#}")
    }
}

/// Returns true if there's a tty attached to stdout.
fn tty_stdout() -> bool {
    static YES: LazyLock<bool> =
        LazyLock::new(|| std::io::stdout().is_terminal());
    *YES
}

/// Returns true if there's a tty attached to stderr.
fn tty_stderr() -> bool {
    static YES: LazyLock<bool> =
        LazyLock::new(|| std::io::stderr().is_terminal());
    *YES
}

/// Whether colors have been globally disabled or not.
fn can_use_colors() -> bool {
    static YES: LazyLock<bool> = LazyLock::new(|| {
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            return false;
        }
        if std::env::var_os("TERM").is_some_and(|v| v == "dumb") {
            return false;
        }
        true
    });
    *YES
}

use std::fmt;
use std::str::FromStr;

pub type SubscriptionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

type Listener = Box<dyn FnMut(Theme) + Send>;

/// Process-wide theme preference with explicit read/update and change
/// notification. The owner of the `&mut` is the single writer.
pub struct ThemeStore {
    current: Theme,
    next_id: SubscriptionId,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ThemeStore {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: initial,
            next_id: 1,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Stores `theme` and notifies listeners. Returns false (and notifies
    /// nobody) when the value is unchanged.
    pub fn set(&mut self, theme: Theme) -> bool {
        if theme == self.current {
            return false;
        }
        self.current = theme;
        mri_logging::mri_debug!("Theme changed to {}", theme);
        for (_, listener) in self.listeners.iter_mut() {
            listener(theme);
        }
        true
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set(next);
        next
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + Send + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

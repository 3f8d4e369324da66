use crate::Result;

use std::fmt;

/// A lazily loaded association value.
///
/// An unloaded value holds the loader that fetches it. The loader runs on
/// first access; a failed load leaves the value unloaded so it can be
/// retried.
pub enum Loadable<T> {
    Unloaded(Box<dyn Fn() -> Result<T> + Send + Sync>),
    Loaded(T),
}

impl<T> Loadable<T> {
    pub fn unloaded(loader: impl Fn() -> Result<T> + Send + Sync + 'static) -> Self {
        Self::Unloaded(Box::new(loader))
    }

    pub fn loaded(value: T) -> Self {
        Self::Loaded(value)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The value, if already loaded.
    pub fn try_get(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Unloaded(_) => None,
        }
    }

    /// The value, loading it first if needed.
    pub fn get(&mut self) -> Result<&T> {
        self.load()?;
        match self {
            Self::Loaded(value) => Ok(value),
            Self::Unloaded(_) => unreachable!("value loaded"),
        }
    }

    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.load()?;
        match self {
            Self::Loaded(value) => Ok(value),
            Self::Unloaded(_) => unreachable!("value loaded"),
        }
    }

    /// Replaces the value, discarding the loader.
    pub fn set(&mut self, value: T) {
        *self = Self::Loaded(value);
    }

    pub fn into_inner(mut self) -> Result<T> {
        self.load()?;
        match self {
            Self::Loaded(value) => Ok(value),
            Self::Unloaded(_) => unreachable!("value loaded"),
        }
    }

    fn load(&mut self) -> Result<()> {
        if let Self::Unloaded(loader) = self {
            let value = loader()?;
            *self = Self::Loaded(value);
        }
        Ok(())
    }
}

impl<T> From<T> for Loadable<T> {
    fn from(value: T) -> Self {
        Self::Loaded(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Loadable<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(value) => value.fmt(fmt),
            Self::Unloaded(_) => write!(fmt, "<not loaded>"),
        }
    }
}

//! Theme selection.

use super::session_store::SessionStore;
use crate::domain::{ColorTheme, DomainError, DomainResult, ThemeApplier, ThemeName};
use crate::repository::{KeyValueStore, THEME_KEY};

impl<S: KeyValueStore + ?Sized> SessionStore<S> {
    /// Stored theme, or the default when unset or unknown
    pub async fn theme(&self) -> DomainResult<ThemeName> {
        let stored = self.store.get(THEME_KEY).await?;
        Ok(stored
            .as_deref()
            .and_then(|name| name.parse::<ThemeName>().ok())
            .unwrap_or_default())
    }

    /// Themes that can be selected
    pub fn available_themes(&self) -> Vec<ColorTheme> {
        ColorTheme::catalog()
    }

    pub async fn set_theme(&self, name: ThemeName) -> DomainResult<ColorTheme> {
        let theme = ColorTheme::get(name)
            .ok_or_else(|| DomainError::InvalidInput(format!("Theme {} has no palette", name.as_str())))?;
        self.store.set(THEME_KEY, name.as_str()).await?;
        log::info!("Theme set to {}", name.as_str());
        Ok(theme)
    }

    /// Hand the stored theme's palette to `applier`
    pub async fn apply_theme(&self, applier: &mut dyn ThemeApplier) -> DomainResult<ColorTheme> {
        let theme = ColorTheme::get(self.theme().await?)
            .or_else(|| ColorTheme::get(ThemeName::default()))
            .ok_or_else(|| DomainError::Internal("No theme palette available".into()))?;
        applier.apply(&theme);
        Ok(theme)
    }
}

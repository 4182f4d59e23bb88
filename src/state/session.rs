//! Per-run session context
//!
//! Holds everything the timer page needs: the chosen method, which option
//! is selected, whether the completion sound is on, and the countdown.

use crate::{
    catalog::{Catalog, CookingMethod, CookingOption},
    error::EggTimerError,
};

use super::TimerState;

#[derive(Debug, Clone)]
pub struct Session {
    method: &'static CookingMethod,
    selected_index: usize,
    pub sound_enabled: bool,
    pub timer: TimerState,
}

impl Session {
    /// Create a session for `method` with the option at zero-based `index`
    pub fn new(method: &'static CookingMethod, index: usize) -> Result<Self, EggTimerError> {
        let option = Self::lookup(method, index)?;
        Ok(Self {
            method,
            selected_index: index,
            sound_enabled: true,
            timer: TimerState::new(*option),
        })
    }

    /// Create a session from a method key
    pub fn for_key(key: &str, index: usize) -> Result<Self, EggTimerError> {
        let method =
            Catalog::get(key).ok_or_else(|| EggTimerError::UnknownMethod(key.to_string()))?;
        Self::new(method, index)
    }

    /// Switch to another option of the same method, reseeding the timer
    pub fn select_option(&mut self, index: usize) -> Result<&'static CookingOption, EggTimerError> {
        let option = Self::lookup(self.method, index)?;
        self.selected_index = index;
        self.timer.select_option(*option);
        Ok(option)
    }

    pub fn method(&self) -> &'static CookingMethod {
        self.method
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_option(&self) -> &CookingOption {
        self.timer.option()
    }

    fn lookup(
        method: &'static CookingMethod,
        index: usize,
    ) -> Result<&'static CookingOption, EggTimerError> {
        method.option(index).ok_or(EggTimerError::OptionOutOfRange {
            method: method.key,
            index: index.saturating_add(1),
            count: method.options.len(),
        })
    }
}

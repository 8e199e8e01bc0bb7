use crate::domain::SelectOption;
use crate::html::select_markup;
use crate::token::CookieSource;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A `change` event as delivered to the listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub target_id: String,
    pub value: String,
}

pub trait SelectControl: Send + Sync {
    fn id(&self) -> &str;
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn options(&self) -> Vec<SelectOption>;
    /// Replaces the whole option list in one mutation.
    fn replace_options(&self, options: Vec<SelectOption>);
}

pub trait Document: Send + Sync {
    fn select_by_id(&self, id: &str) -> Option<Arc<dyn SelectControl>>;
}

#[derive(Debug, Default)]
struct SelectState {
    value: String,
    options: Vec<SelectOption>,
    revision: u64,
}

#[derive(Debug)]
pub struct SelectElement {
    id: String,
    state: Mutex<SelectState>,
}

impl SelectElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Mutex::new(SelectState::default()),
        }
    }

    pub fn with_options(self, options: Vec<SelectOption>) -> Self {
        self.lock().options = options;
        self
    }

    /// Number of times the option list has been replaced.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    pub fn render(&self) -> String {
        select_markup(&self.id, &self.lock().options)
    }

    fn lock(&self) -> MutexGuard<'_, SelectState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SelectControl for SelectElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> String {
        self.lock().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.lock().value = value.to_string();
    }

    fn options(&self) -> Vec<SelectOption> {
        self.lock().options.clone()
    }

    fn replace_options(&self, options: Vec<SelectOption>) {
        let mut state = self.lock();
        state.options = options;
        state.revision += 1;
    }
}

/// In-memory page: select elements by id plus the cookie jar.
#[derive(Default)]
pub struct Page {
    selects: HashMap<String, Arc<SelectElement>>,
    cookie: Mutex<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_select(mut self, element: SelectElement) -> Self {
        self.selects.insert(element.id.clone(), Arc::new(element));
        self
    }

    pub fn with_cookie(self, cookie: impl Into<String>) -> Self {
        self.set_cookie(cookie);
        self
    }

    pub fn set_cookie(&self, cookie: impl Into<String>) {
        *self.cookie.lock().unwrap_or_else(PoisonError::into_inner) = cookie.into();
    }

    pub fn element(&self, id: &str) -> Option<Arc<SelectElement>> {
        self.selects.get(id).cloned()
    }

    /// Sets the control's value the way a user would and returns the event
    /// the page would fire.
    pub fn change(&self, id: &str, value: &str) -> Option<ChangeEvent> {
        let element = self.selects.get(id)?;
        element.set_value(value);
        Some(ChangeEvent {
            target_id: id.to_string(),
            value: value.to_string(),
        })
    }
}

impl Document for Page {
    fn select_by_id(&self, id: &str) -> Option<Arc<dyn SelectControl>> {
        self.selects
            .get(id)
            .map(|element| element.clone() as Arc<dyn SelectControl>)
    }
}

impl CookieSource for Page {
    fn cookie_string(&self) -> String {
        self.cookie
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

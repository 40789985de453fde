use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rolodex_core::domain::{Contact, ContactId, StatusFilter};
use rolodex_core::filter::visible_contacts;
use rolodex_core::rules::{validate_draft, ContactDraft, ValidationErrors};
use rolodex_core::ConfirmOutcome;

use crate::actions::Action;

const LIST_EMPTY: &str = "No contacts. Press 'a' to add one.";

#[derive(Debug, Clone)]
pub enum Mode {
    List,
    SearchEditing,
    Form(ContactForm),
    Confirm(ConfirmState),
}

#[derive(Debug, Clone)]
pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub search_input: String,
    pub status_filter: StatusFilter,
    pub contacts: Vec<Contact>,
    pub selected: usize,
    pub loading: bool,
    pub status: Option<String>,
    pub error: Option<String>,
    pub empty_hint: &'static str,
    actions: VecDeque<Action>,
    pub(crate) pending_select: Option<ContactId>,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            mode: Mode::List,
            show_help: false,
            should_quit: false,
            search_input: String::new(),
            status_filter: StatusFilter::All,
            contacts: Vec::new(),
            selected: 0,
            loading: false,
            status: None,
            error: None,
            empty_hint: LIST_EMPTY,
            actions: VecDeque::new(),
            pending_select: None,
        };
        app.enqueue(Action::LoadList);
        app
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Rows currently visible under the active search text and status
    /// selector; recomputed from the cached list on every call.
    pub fn visible(&self) -> Vec<&Contact> {
        visible_contacts(&self.contacts, &self.search_input, self.status_filter)
    }

    pub fn selected_contact_id(&self) -> Option<ContactId> {
        self.visible().get(self.selected).map(|contact| contact.id)
    }

    /// Replaces the cached list wholesale (a completed full load).
    pub fn apply_list(&mut self, items: Vec<Contact>) {
        self.contacts = items;
        self.reselect();
    }

    /// Patches the cache after a successful create: new records go first.
    pub fn insert_created(&mut self, contact: Contact) {
        self.pending_select = Some(contact.id);
        self.contacts.insert(0, contact);
        self.reselect();
    }

    /// Patches the cache after a successful update, in place by id.
    pub fn replace_updated(&mut self, contact: Contact) {
        self.pending_select = Some(contact.id);
        if let Some(slot) = self.contacts.iter_mut().find(|c| c.id == contact.id) {
            *slot = contact;
        }
        self.reselect();
    }

    /// Patches the cache after a successful delete.
    pub fn remove_deleted(&mut self, id: ContactId) {
        self.contacts.retain(|contact| contact.id != id);
        self.reselect();
    }

    pub fn finish_submit(&mut self) {
        if let Mode::Form(form) = &mut self.mode {
            form.submitting = false;
        }
    }

    fn reselect(&mut self) {
        let visible_ids: Vec<ContactId> =
            self.visible().iter().map(|contact| contact.id).collect();
        if let Some(target) = self.pending_select.take() {
            if let Some(pos) = visible_ids.iter().position(|id| *id == target) {
                self.selected = pos;
            }
        }
        if self.selected >= visible_ids.len() {
            self.selected = visible_ids.len().saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) {
            self.should_quit = true;
            return;
        }

        let mut mode = std::mem::replace(&mut self.mode, Mode::List);
        match &mut mode {
            Mode::List => {
                if let Some(next) = self.handle_list_key(key) {
                    mode = next;
                }
            }
            Mode::SearchEditing => {
                if let Some(next) = self.handle_search_key(key) {
                    mode = next;
                }
            }
            Mode::Form(form) => {
                if let Some(next) = self.handle_form_key(form, key) {
                    mode = next;
                }
            }
            Mode::Confirm(state) => {
                if let Some(next) = self.handle_confirm_key(state, key) {
                    mode = next;
                }
            }
        }
        self.mode = mode;
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                let len = self.visible().len();
                if len > 0 {
                    self.selected = len - 1;
                }
            }
            KeyCode::Char('a') => {
                return Some(Mode::Form(ContactForm::new()));
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(id) = self.selected_contact_id() {
                    self.enqueue(Action::LoadForEdit(id));
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_contact_id() {
                    let name = self
                        .visible()
                        .get(self.selected)
                        .map(|contact| contact.name.clone())
                        .unwrap_or_default();
                    return Some(Mode::Confirm(ConfirmState::new(
                        format!("Delete {}? (y/n)", name),
                        ConfirmAction::DeleteContact(id),
                    )));
                }
            }
            KeyCode::Char('/') => return Some(Mode::SearchEditing),
            KeyCode::Char('c') => {
                self.search_input.clear();
                self.clamp_selection();
            }
            KeyCode::Char('s') => {
                self.status_filter = self.status_filter.cycled();
                self.clamp_selection();
            }
            KeyCode::Char('r') => self.enqueue(Action::LoadList),
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => return Some(Mode::List),
            _ => {
                apply_text_input(&mut self.search_input, key);
                self.clamp_selection();
            }
        }
        None
    }

    fn handle_form_key(&mut self, form: &mut ContactForm, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => return Some(Mode::List),
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Left | KeyCode::Right if form.is_status_focus() => form.toggle_status(),
            KeyCode::Char(' ') if form.is_status_focus() => form.toggle_status(),
            KeyCode::Enter => {
                if form.is_save_focus() {
                    self.submit_form(form);
                } else if form.is_cancel_focus() {
                    return Some(Mode::List);
                } else {
                    form.focus_next();
                }
            }
            _ => {
                if let Some(target) = form.active_field_mut() {
                    apply_text_input(target, key);
                    form.mark_changed();
                }
            }
        }
        None
    }

    /// Save is a no-op while the draft is invalid or a submit is in flight;
    /// the mode switches back to `List` only when the executor reports
    /// success.
    fn submit_form(&mut self, form: &mut ContactForm) {
        if form.submitting {
            return;
        }
        match validate_draft(&form.draft) {
            Ok(input) => {
                form.submitting = true;
                let action = match form.contact_id {
                    Some(id) => Action::UpdateContact(id, input),
                    None => Action::CreateContact(input),
                };
                self.enqueue(action);
            }
            Err(errors) => form.errors = errors,
        }
    }

    fn handle_confirm_key(&mut self, state: &mut ConfirmState, key: KeyEvent) -> Option<Mode> {
        let outcome = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => ConfirmOutcome::Confirmed,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ConfirmOutcome::Cancelled,
            _ => return None,
        };
        if let Some(action) = state.resolve(outcome) {
            self.enqueue(action);
        }
        Some(Mode::List)
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.visible().len() as i32;
        if len == 0 {
            self.selected = 0;
            return;
        }
        let mut next = self.selected as i32 + delta;
        if next < 0 {
            next = 0;
        }
        if next >= len {
            next = len - 1;
        }
        self.selected = next as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn empty_hint(&self) -> String {
        self.empty_hint.to_string()
    }
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

/// Editable draft of one record plus its continuously recomputed validation
/// state. `contact_id` is `None` in create mode.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub(crate) focus: usize,
    pub contact_id: Option<ContactId>,
    pub draft: ContactDraft,
    pub errors: ValidationErrors,
    pub dirty: bool,
    pub submitting: bool,
}

impl ContactForm {
    const FIELD_COUNT: usize = 6;
    const STATUS_FOCUS: usize = 4;

    pub fn new() -> Self {
        let draft = ContactDraft::default();
        let errors = validation_state(&draft);
        Self {
            focus: 0,
            contact_id: None,
            draft,
            errors,
            dirty: false,
            submitting: false,
        }
    }

    pub fn from_contact(contact: &Contact) -> Self {
        let draft = ContactDraft::from_contact(contact);
        let errors = validation_state(&draft);
        Self {
            focus: 0,
            contact_id: Some(contact.id),
            draft,
            errors,
            dirty: false,
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.contact_id.is_some() {
            "Edit Contact"
        } else {
            "Add Contact"
        }
    }

    pub fn focus_next(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        self.focus = (self.focus + 1) % total;
    }

    pub fn focus_prev(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        if self.focus == 0 {
            self.focus = total - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn is_save_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT
    }

    pub fn is_cancel_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT + 1
    }

    pub fn is_status_focus(&self) -> bool {
        self.focus == Self::STATUS_FOCUS
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.draft.name),
            1 => Some(&mut self.draft.email),
            2 => Some(&mut self.draft.phone),
            3 => Some(&mut self.draft.company),
            5 => Some(&mut self.draft.notes),
            _ => None,
        }
    }

    pub fn toggle_status(&mut self) {
        self.draft.status = self.draft.status.toggled();
        self.mark_changed();
    }

    pub fn mark_changed(&mut self) {
        self.dirty = true;
        self.errors = validation_state(&self.draft);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn validation_state(draft: &ContactDraft) -> ValidationErrors {
    match validate_draft(draft) {
        Ok(_) => ValidationErrors::default(),
        Err(errors) => errors,
    }
}

#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteContact(ContactId),
}

/// Pending confirmation for a destructive operation; reduced to a
/// [`ConfirmOutcome`] by the key handler.
#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

impl ConfirmState {
    pub fn new(message: String, action: ConfirmAction) -> Self {
        Self { message, action }
    }

    pub fn resolve(&self, outcome: ConfirmOutcome) -> Option<Action> {
        if !outcome.is_confirmed() {
            return None;
        }
        match self.action {
            ConfirmAction::DeleteContact(id) => Some(Action::DeleteContact(id)),
        }
    }
}

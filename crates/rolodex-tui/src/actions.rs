use rolodex_client::ContactCollection;
use rolodex_core::domain::{ContactId, ContactInput};

use crate::app::{App, ContactForm, Mode};

#[derive(Debug, Clone)]
pub enum Action {
    LoadList,
    LoadForEdit(ContactId),
    CreateContact(ContactInput),
    UpdateContact(ContactId, ContactInput),
    DeleteContact(ContactId),
}

/// Runs one action against the remote collection and folds the result into
/// the app state. This is the only place the cached list is mutated. Remote
/// failures never escape: each arm converts them to the single banner
/// message, leaving behind whatever the failed operation must not disturb
/// (loaded data for mutations, the open form for a failed save).
pub fn execute_action(app: &mut App, collection: &dyn ContactCollection, action: Action) {
    match action {
        Action::LoadList => {
            app.clear_error();
            app.loading = true;
            match collection.list_all() {
                Ok(contacts) => app.apply_list(contacts),
                Err(err) => app.set_error(format!("failed to load contacts: {}", err)),
            }
            app.loading = false;
        }
        Action::LoadForEdit(id) => {
            app.clear_error();
            app.loading = true;
            match collection.get_one(id) {
                Ok(contact) => app.mode = Mode::Form(ContactForm::from_contact(&contact)),
                Err(err) => app.set_error(format!("failed to load contact: {}", err)),
            }
            app.loading = false;
        }
        Action::CreateContact(input) => match collection.create(input) {
            Ok(created) => {
                app.set_status(format!("Created {}", created.name));
                app.insert_created(created);
                app.mode = Mode::List;
            }
            Err(err) => {
                app.set_error(format!("failed to save: {}", err));
                app.finish_submit();
            }
        },
        Action::UpdateContact(id, input) => match collection.update(id, input) {
            Ok(updated) => {
                app.set_status(format!("Updated {}", updated.name));
                app.replace_updated(updated);
                app.mode = Mode::List;
            }
            Err(err) => {
                app.set_error(format!("failed to save: {}", err));
                app.finish_submit();
            }
        },
        Action::DeleteContact(id) => match collection.delete(id) {
            Ok(()) => {
                app.remove_deleted(id);
                app.set_status("Deleted contact");
            }
            Err(err) => app.set_error(format!("failed to delete: {}", err)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{execute_action, Action};
    use crate::app::{App, ContactForm, Mode};
    use std::cell::{Cell, RefCell};

    use rolodex_client::{ApiError, ContactCollection};
    use rolodex_core::domain::{Contact, ContactId, ContactInput, ContactStatus};
    use rolodex_core::time::now_rfc3339;

    /// In-memory stand-in for the remote collection. With `fail` set, every
    /// operation reports a missing record.
    struct FakeCollection {
        records: RefCell<Vec<Contact>>,
        fail: Cell<bool>,
    }

    impl FakeCollection {
        fn seeded(records: Vec<Contact>) -> Self {
            Self {
                records: RefCell::new(records),
                fail: Cell::new(false),
            }
        }

        fn check(&self) -> rolodex_client::Result<()> {
            if self.fail.get() {
                return Err(ApiError::NotFound(ContactId::new()));
            }
            Ok(())
        }
    }

    impl ContactCollection for FakeCollection {
        fn list_all(&self) -> rolodex_client::Result<Vec<Contact>> {
            self.check()?;
            Ok(self.records.borrow().clone())
        }

        fn get_one(&self, id: ContactId) -> rolodex_client::Result<Contact> {
            self.check()?;
            self.records
                .borrow()
                .iter()
                .find(|contact| contact.id == id)
                .cloned()
                .ok_or(ApiError::NotFound(id))
        }

        fn create(&self, input: ContactInput) -> rolodex_client::Result<Contact> {
            self.check()?;
            let contact = Contact::from_input(ContactId::new(), input, now_rfc3339());
            self.records.borrow_mut().push(contact.clone());
            Ok(contact)
        }

        fn update(&self, id: ContactId, input: ContactInput) -> rolodex_client::Result<Contact> {
            let merged = self.get_one(id)?.merged_with(&input, now_rfc3339());
            let mut records = self.records.borrow_mut();
            let slot = records
                .iter_mut()
                .find(|contact| contact.id == id)
                .ok_or(ApiError::NotFound(id))?;
            *slot = merged.clone();
            Ok(merged)
        }

        fn delete(&self, id: ContactId) -> rolodex_client::Result<()> {
            self.check()?;
            let mut records = self.records.borrow_mut();
            let before = records.len();
            records.retain(|contact| contact.id != id);
            if records.len() == before {
                return Err(ApiError::NotFound(id));
            }
            Ok(())
        }
    }

    fn contact(name: &str, email: &str, status: ContactStatus) -> Contact {
        Contact::from_input(
            ContactId::new(),
            input(name, email, status),
            "2020-01-01T00:00:00.000Z".to_string(),
        )
    }

    fn input(name: &str, email: &str, status: ContactStatus) -> ContactInput {
        ContactInput {
            name: name.to_string(),
            email: email.to_string(),
            phone: "1234567890".to_string(),
            company: None,
            status,
            notes: None,
        }
    }

    fn loaded_app(collection: &FakeCollection) -> App {
        let mut app = App::new();
        let action = app.next_action().expect("initial load");
        execute_action(&mut app, collection, action);
        app
    }

    #[test]
    fn load_list_replaces_the_cache_wholesale() {
        let fake = FakeCollection::seeded(vec![
            contact("Alice", "alice@example.com", ContactStatus::Active),
            contact("Bob", "bob@example.com", ContactStatus::Inactive),
        ]);
        let app = loaded_app(&fake);
        assert_eq!(app.contacts.len(), 2);
        assert!(app.error.is_none());
        assert!(!app.loading);
    }

    #[test]
    fn failed_load_keeps_previously_loaded_data() {
        let fake = FakeCollection::seeded(vec![contact(
            "Alice",
            "alice@example.com",
            ContactStatus::Active,
        )]);
        let mut app = loaded_app(&fake);

        fake.fail.set(true);
        execute_action(&mut app, &fake, Action::LoadList);
        assert!(app.error.is_some());
        assert_eq!(app.contacts.len(), 1);
    }

    #[test]
    fn load_for_edit_enters_a_prefilled_form() {
        let existing = contact("Alice", "alice@example.com", ContactStatus::Active);
        let fake = FakeCollection::seeded(vec![existing.clone()]);
        let mut app = loaded_app(&fake);

        execute_action(&mut app, &fake, Action::LoadForEdit(existing.id));
        let Mode::Form(form) = &app.mode else {
            panic!("expected edit form");
        };
        assert_eq!(form.contact_id, Some(existing.id));
        assert_eq!(form.draft.name, "Alice");
        assert!(form.is_valid());
    }

    #[test]
    fn failed_edit_fetch_stays_in_list_with_the_error() {
        let fake = FakeCollection::seeded(vec![contact(
            "Alice",
            "alice@example.com",
            ContactStatus::Active,
        )]);
        let mut app = loaded_app(&fake);

        execute_action(&mut app, &fake, Action::LoadForEdit(ContactId::new()));
        assert!(matches!(app.mode, Mode::List));
        assert!(app.error.is_some());
    }

    #[test]
    fn create_prepends_and_returns_to_list() {
        let fake = FakeCollection::seeded(vec![contact(
            "Alice",
            "alice@example.com",
            ContactStatus::Active,
        )]);
        let mut app = loaded_app(&fake);
        app.mode = Mode::Form(ContactForm::new());

        execute_action(
            &mut app,
            &fake,
            Action::CreateContact(input("Bob", "bob@example.com", ContactStatus::Active)),
        );
        assert!(matches!(app.mode, Mode::List));
        assert_eq!(app.contacts.len(), 2);
        assert_eq!(app.contacts[0].name, "Bob");
        assert_eq!(app.status.as_deref(), Some("Created Bob"));
    }

    #[test]
    fn failed_create_keeps_the_form_open() {
        let fake = FakeCollection::seeded(Vec::new());
        let mut app = loaded_app(&fake);
        let mut form = ContactForm::new();
        form.submitting = true;
        app.mode = Mode::Form(form);

        fake.fail.set(true);
        execute_action(
            &mut app,
            &fake,
            Action::CreateContact(input("Bob", "bob@example.com", ContactStatus::Active)),
        );
        let Mode::Form(form) = &app.mode else {
            panic!("form was closed on failure");
        };
        assert!(!form.submitting);
        assert!(app.error.is_some());
        assert!(app.contacts.is_empty());
    }

    #[test]
    fn update_replaces_in_place_without_changing_the_count() {
        let first = contact("Alice", "alice@example.com", ContactStatus::Active);
        let second = contact("Bob", "bob@example.com", ContactStatus::Active);
        let fake = FakeCollection::seeded(vec![first.clone(), second.clone()]);
        let mut app = loaded_app(&fake);

        execute_action(
            &mut app,
            &fake,
            Action::UpdateContact(
                second.id,
                input("Bob", "bob@example.com", ContactStatus::Inactive),
            ),
        );
        assert_eq!(app.contacts.len(), 2);
        assert_eq!(app.contacts[1].id, second.id);
        assert_eq!(app.contacts[1].status, ContactStatus::Inactive);
        assert_eq!(app.contacts[1].created_at, second.created_at);
        assert!(app.contacts[1].updated_at > second.updated_at);
    }

    #[test]
    fn delete_removes_by_id_and_failure_leaves_the_list_untouched() {
        let first = contact("Alice", "alice@example.com", ContactStatus::Active);
        let second = contact("Bob", "bob@example.com", ContactStatus::Active);
        let fake = FakeCollection::seeded(vec![first.clone(), second.clone()]);
        let mut app = loaded_app(&fake);

        execute_action(&mut app, &fake, Action::DeleteContact(first.id));
        assert_eq!(app.contacts.len(), 1);
        assert!(app.contacts.iter().all(|c| c.id != first.id));

        // The record is already gone remotely; the failure is surfaced and
        // the local list stays as it was.
        execute_action(&mut app, &fake, Action::DeleteContact(first.id));
        assert_eq!(app.contacts.len(), 1);
        assert!(app.error.is_some());
    }

    #[test]
    fn load_search_edit_save_flow_keeps_the_count() {
        let fake = FakeCollection::seeded(vec![
            contact("Alice Example", "alice@example.com", ContactStatus::Active),
            contact("Bob Builder", "bob@example.com", ContactStatus::Active),
            contact("Cara Voss", "cara@example.com", ContactStatus::Active),
        ]);
        let mut app = loaded_app(&fake);
        assert_eq!(app.contacts.len(), 3);

        app.search_input = "builder".to_string();
        let visible = app.visible();
        assert_eq!(visible.len(), 1);
        let target = visible[0].id;

        execute_action(&mut app, &fake, Action::LoadForEdit(target));
        let Mode::Form(mut form) = std::mem::replace(&mut app.mode, Mode::List) else {
            panic!("expected edit form");
        };
        form.toggle_status();
        assert_eq!(form.draft.status, ContactStatus::Inactive);
        let validated = rolodex_core::rules::validate_draft(&form.draft).expect("valid draft");
        app.mode = Mode::Form(form);

        execute_action(&mut app, &fake, Action::UpdateContact(target, validated));
        assert!(matches!(app.mode, Mode::List));
        assert_eq!(app.contacts.len(), 3);
        let edited = app
            .contacts
            .iter()
            .find(|c| c.id == target)
            .expect("edited record present");
        assert_eq!(edited.status, ContactStatus::Inactive);
    }
}

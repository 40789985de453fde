use crate::domain::{Contact, StatusFilter};

/// Reduces the full list to the visible subset. Pure: no memory between
/// calls, relative order preserved. A record passes when its status matches
/// the selector and, if the search text is non-empty, its name or email
/// contains the text case-insensitively.
pub fn visible_contacts<'a>(
    contacts: &'a [Contact],
    search: &str,
    status: StatusFilter,
) -> Vec<&'a Contact> {
    let needle = search.trim().to_lowercase();
    contacts
        .iter()
        .filter(|contact| status.matches(contact.status))
        .filter(|contact| {
            needle.is_empty()
                || contact.name.to_lowercase().contains(&needle)
                || contact.email.to_lowercase().contains(&needle)
        })
        .collect()
}

use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::Result;
use clap::{ArgAction, Args};
use std::io::{self, BufRead, Write};

use rolodex_client::{ApiError, ContactCollection};
use rolodex_core::domain::{Contact, ContactId, ContactStatus, StatusFilter};
use rolodex_core::filter::visible_contacts;
use rolodex_core::rules::{validate_draft, ContactDraft};
use rolodex_core::time::format_date;
use rolodex_core::ConfirmOutcome;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long, default_value = "active")]
    pub status: ContactStatus,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// New company; pass an empty string to clear it.
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub status: Option<ContactStatus>,
    /// New notes; pass an empty string to clear them.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
    /// Skip the confirmation prompt.
    #[arg(long, action = ArgAction::SetTrue)]
    pub yes: bool,
}

pub fn add_contact(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let draft = ContactDraft {
        name: args.name,
        email: args.email,
        phone: args.phone,
        company: args.company.unwrap_or_default(),
        status: args.status,
        notes: args.notes.unwrap_or_default(),
    };
    let input = validate_draft(&draft)?;
    let contact = ctx.collection.create(input)?;

    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("created {} {}", contact.id, contact.name);
    }
    Ok(())
}

pub fn edit_contact(ctx: &Context<'_>, args: EditArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;

    if args.name.is_none()
        && args.email.is_none()
        && args.phone.is_none()
        && args.company.is_none()
        && args.status.is_none()
        && args.notes.is_none()
    {
        return Err(invalid_input("no updates provided"));
    }

    // The update payload is a full record, so start from the current remote
    // copy and overlay the provided flags.
    let existing = fetch_contact(ctx, id)?;
    let mut draft = ContactDraft::from_contact(&existing);
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(email) = args.email {
        draft.email = email;
    }
    if let Some(phone) = args.phone {
        draft.phone = phone;
    }
    if let Some(company) = args.company {
        draft.company = company;
    }
    if let Some(status) = args.status {
        draft.status = status;
    }
    if let Some(notes) = args.notes {
        draft.notes = notes;
    }

    let input = validate_draft(&draft)?;
    let contact = ctx.collection.update(id, input)?;

    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("updated {} {}", contact.id, contact.name);
    }
    Ok(())
}

pub fn show_contact(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let contact = fetch_contact(ctx, id)?;

    if ctx.json {
        print_json(&contact)?;
        return Ok(());
    }

    println!("{} {}", contact.id, contact.name);
    println!("email:   {}", contact.email);
    println!("phone:   {}", contact.phone);
    println!("company: {}", contact.company.as_deref().unwrap_or("-"));
    println!("status:  {}", contact.status);
    println!("notes:   {}", contact.notes.as_deref().unwrap_or("-"));
    println!(
        "created: {}  updated: {}",
        format_date(&contact.created_at),
        format_date(&contact.updated_at)
    );
    Ok(())
}

pub fn list_contacts(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let contacts = ctx.collection.list_all()?;
    let search = args.search.unwrap_or_default();
    let visible = visible_contacts(&contacts, &search, args.status);

    if ctx.json {
        print_json(&visible)?;
        return Ok(());
    }

    if visible.is_empty() {
        println!("no contacts");
        return Ok(());
    }
    for contact in visible {
        println!(
            "{}  {}  {}  {}",
            contact.id, contact.name, contact.email, contact.status
        );
    }
    Ok(())
}

pub fn delete_contact(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;

    let outcome = if args.yes {
        ConfirmOutcome::Confirmed
    } else {
        confirm(&format!("Delete contact {}? [y/N] ", id))?
    };
    if !outcome.is_confirmed() {
        println!("aborted");
        return Ok(());
    }

    ctx.collection.delete(id)?;
    println!("deleted {}", id);
    Ok(())
}

fn fetch_contact(ctx: &Context<'_>, id: ContactId) -> Result<Contact> {
    match ctx.collection.get_one(id) {
        Ok(contact) => Ok(contact),
        Err(ApiError::NotFound(id)) => Err(not_found(format!("contact {}", id))),
        Err(err) => Err(err.into()),
    }
}

fn parse_contact_id(raw: &str) -> Result<ContactId> {
    raw.parse()
        .map_err(|_| invalid_input(format!("invalid contact id: {}", raw)))
}

fn confirm(prompt: &str) -> Result<ConfirmOutcome> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(if answer == "y" || answer == "yes" {
        ConfirmOutcome::Confirmed
    } else {
        ConfirmOutcome::Cancelled
    })
}

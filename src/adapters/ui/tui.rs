//! Implements InputPort. Inquire-based interactive prompts.
//!
//! The auth gate runs first, then the dashboard loop. Every panel of the
//! product (grocery form, receipt scanner, reminder settings) is a prompt
//! sequence here; status toasts become colored status lines.

use crate::domain::expiry::EvaluatedItem;
use crate::domain::{
    Category, Credentials, DomainError, ExpiryStatus, GroceryDraft, GroceryItem,
    ReminderPreferences, SignUpDetails, User,
};
use crate::ports::InputPort;
use crate::usecases::{AuthService, PantryService, ReminderService, ScannerService};
use async_trait::async_trait;
use chrono::Utc;
use crossterm::style::Stylize;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::validator::ValueRequiredValidator;
use inquire::{Confirm, CustomType, DateSelect, Password, PasswordDisplayMode, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::progress;

/// Applies the leaf-green theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let mut cfg = RenderConfig::default_colored();
    cfg.prompt_prefix = Styled::new("»").with_fg(Color::LightGreen);
    cfg.answered_prompt_prefix = Styled::new("✔").with_fg(Color::LightGreen);
    cfg.highlighted_option_prefix = Styled::new("›").with_fg(Color::LightGreen);
    cfg.selected_checkbox = Styled::new("[x]").with_fg(Color::LightGreen);
    cfg.answer = StyleSheet::new().with_fg(Color::LightGreen);
    cfg.help_message = StyleSheet::new().with_fg(Color::DarkGreen);
    inquire::set_global_render_config(cfg);
}

const DASHBOARD_MENU: &[&str] = &[
    "View groceries",
    "Add grocery",
    "Edit grocery",
    "Delete grocery",
    "Scan receipt",
    "Set item reminder",
    "Reminder settings",
    "Sign out",
    "Quit",
];

/// Where the dashboard loop ended up.
enum Flow {
    SignedOut,
    Quit,
}

/// An item in a selection list.
struct ItemChoice {
    id: Uuid,
    label: String,
}

impl fmt::Display for ItemChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Lead-time option in the reminder settings form.
#[derive(Clone, Copy)]
struct LeadChoice(u8);

impl fmt::Display for LeadChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            7 => f.write_str("1 week before"),
            14 => f.write_str("2 weeks before"),
            n => write!(f, "{} day{} before", n, plural(i64::from(n))),
        }
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    auth: Arc<AuthService>,
    pantry: Arc<PantryService>,
    scanner: Arc<ScannerService>,
    reminders: Arc<ReminderService>,
}

impl TuiInputPort {
    pub fn new(
        auth: Arc<AuthService>,
        pantry: Arc<PantryService>,
        scanner: Arc<ScannerService>,
        reminders: Arc<ReminderService>,
    ) -> Self {
        Self {
            auth,
            pantry,
            scanner,
            reminders,
        }
    }

    /// Sign in / create account menu. None means the user quit.
    async fn auth_gate(&self) -> Result<Option<User>, DomainError> {
        loop {
            let choice = Select::new(
                "Welcome to Zero Waste Grocery",
                vec!["Sign in", "Create account", "Quit"],
            )
            .prompt();
            match choice {
                Ok("Sign in") => {
                    if let Some(user) = self.sign_in_form().await? {
                        return Ok(Some(user));
                    }
                }
                Ok("Create account") => {
                    if let Some(user) = self.sign_up_form().await? {
                        return Ok(Some(user));
                    }
                }
                Ok(_) | Err(InquireError::OperationCanceled) => return Ok(None),
                Err(InquireError::OperationInterrupted) => return Ok(None),
                Err(e) => return Err(input_err(e)),
            }
        }
    }

    async fn sign_in_form(&self) -> Result<Option<User>, DomainError> {
        let Some(email) = optional(
            Text::new("Email address:")
                .with_validator(ValueRequiredValidator::default())
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(password) = optional(
            Password::new("Password:")
                .with_display_mode(PasswordDisplayMode::Masked)
                .without_confirmation()
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        println!("  Processing...");
        match self.auth.login(Credentials { email, password }).await {
            Ok(user) => {
                toast_ok("Login successful. Welcome back to Zero Waste Grocery!");
                Ok(Some(user))
            }
            Err(DomainError::Auth(reason)) => {
                toast_err(&reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn sign_up_form(&self) -> Result<Option<User>, DomainError> {
        let Some(name) = optional(
            Text::new("Name:")
                .with_validator(ValueRequiredValidator::default())
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(email) = optional(
            Text::new("Email address:")
                .with_validator(ValueRequiredValidator::default())
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(password) = optional(
            Password::new("Password:")
                .with_display_mode(PasswordDisplayMode::Masked)
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let phone_number = optional(
            Text::new("Phone number (for reminders):")
                .with_help_message("optional, press Enter to skip")
                .prompt(),
        )?
        .filter(|p| !p.trim().is_empty());

        println!("  Processing...");
        match self
            .auth
            .sign_up(SignUpDetails {
                name,
                email,
                password,
                phone_number,
            })
            .await
        {
            Ok(user) => {
                toast_ok("Account created. Welcome to Zero Waste Grocery!");
                Ok(Some(user))
            }
            Err(DomainError::Auth(reason)) => {
                toast_err(&reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn dashboard(&self, user: &User) -> Result<Flow, DomainError> {
        loop {
            println!();
            let choice = Select::new(
                &format!("What next, {}?", user.name),
                DASHBOARD_MENU.to_vec(),
            )
            .prompt();
            match choice {
                Ok("View groceries") => self.view_groceries().await,
                Ok("Add grocery") => self.add_grocery().await?,
                Ok("Edit grocery") => self.edit_grocery().await?,
                Ok("Delete grocery") => self.delete_grocery().await?,
                Ok("Scan receipt") => self.scan_receipt().await?,
                Ok("Set item reminder") => self.set_item_reminder().await?,
                Ok("Reminder settings") => self.reminder_settings().await?,
                Ok("Sign out") => {
                    self.auth.logout().await?;
                    toast_ok("Signed out.");
                    return Ok(Flow::SignedOut);
                }
                Ok(_) => return Ok(Flow::Quit),
                Err(InquireError::OperationCanceled)
                | Err(InquireError::OperationInterrupted) => return Ok(Flow::Quit),
                Err(e) => return Err(input_err(e)),
            }
        }
    }

    async fn view_groceries(&self) {
        let rows = self.pantry.evaluated(Utc::now()).await;
        render_list(&rows);
    }

    async fn add_grocery(&self) -> Result<(), DomainError> {
        let Some(draft) = self.grocery_form(None).await? else {
            return Ok(());
        };
        match self.pantry.add(draft).await {
            Ok(item) => toast_ok(&format!("{} has been added to your list.", item.name)),
            Err(DomainError::Validation(reason)) => toast_err(&reason),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn edit_grocery(&self) -> Result<(), DomainError> {
        let Some(choice) = self.pick_item("Which grocery do you want to edit?", |_| true).await?
        else {
            return Ok(());
        };
        let items = self.pantry.items().await;
        let Some(existing) = items.iter().find(|i| i.id == choice.id) else {
            return Ok(());
        };
        let Some(draft) = self.grocery_form(Some(existing)).await? else {
            return Ok(());
        };
        match self.pantry.update(choice.id, draft).await {
            Ok(item) => toast_ok(&format!("{} has been updated successfully.", item.name)),
            Err(DomainError::Validation(reason)) => toast_err(&reason),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn delete_grocery(&self) -> Result<(), DomainError> {
        let Some(choice) = self
            .pick_item("Which grocery do you want to delete?", |_| true)
            .await?
        else {
            return Ok(());
        };
        let confirmed = match Confirm::new(&format!("Delete '{}'?", choice.label))
            .with_default(false)
            .prompt()
        {
            Ok(v) => v,
            Err(InquireError::OperationCanceled) => false,
            Err(e) => return Err(input_err(e)),
        };
        if !confirmed {
            return Ok(());
        }
        let removed = self.pantry.remove(choice.id).await?;
        toast_ok(&format!("{} has been removed from your list.", removed.name));
        Ok(())
    }

    /// The add/edit form. None means the user backed out.
    async fn grocery_form(
        &self,
        existing: Option<&GroceryItem>,
    ) -> Result<Option<GroceryDraft>, DomainError> {
        let mut name_prompt = Text::new("Grocery name:")
            .with_placeholder("e.g., Milk, Apples, Bread")
            .with_validator(ValueRequiredValidator::default());
        if let Some(item) = existing {
            name_prompt = name_prompt.with_initial_value(&item.name);
        }
        let Some(name) = optional(name_prompt.prompt())? else {
            return Ok(None);
        };

        let mut date_prompt = DateSelect::new("Expiry date:");
        if let Some(item) = existing {
            date_prompt = date_prompt.with_starting_date(item.expiry_date);
        }
        let expiry_date = optional(date_prompt.prompt())?;

        let quantity = match optional(
            CustomType::<u32>::new("Quantity:")
                .with_default(existing.map_or(1, |i| i.quantity))
                .with_error_message("please type a valid quantity")
                .prompt(),
        )? {
            Some(q) => q,
            None => return Ok(None),
        };

        let mut category_prompt = Select::new("Category:", Category::ALL.to_vec())
            .with_help_message("press Esc to skip");
        if let Some(current) = existing.and_then(|i| i.category) {
            if let Some(idx) = Category::ALL.iter().position(|c| *c == current) {
                category_prompt = category_prompt.with_starting_cursor(idx);
            }
        }
        let category = optional(category_prompt.prompt())?;

        let mut notes_prompt =
            Text::new("Notes:").with_help_message("optional, press Enter to skip");
        if let Some(current) = existing.and_then(|i| i.notes.as_deref()) {
            notes_prompt = notes_prompt.with_initial_value(current);
        }
        let notes = optional(notes_prompt.prompt())?.filter(|n| !n.trim().is_empty());

        Ok(Some(GroceryDraft {
            name,
            expiry_date,
            quantity,
            category,
            notes,
            reminder_set: existing.is_some_and(|i| i.reminder_set),
        }))
    }

    async fn scan_receipt(&self) -> Result<(), DomainError> {
        println!("  Quickly add groceries by scanning your receipt.");
        println!("  Supported: JPG, PNG, HEIF images up to 10MB.");
        let Some(path) = optional(
            Text::new("Receipt image path:")
                .with_placeholder("receipt.jpg")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let source = PathBuf::from(path.trim());

        let (tx, rx) = mpsc::channel(16);
        let pb = progress::scan_bar();
        let (summary, ()) = tokio::join!(
            self.scanner.scan_and_import(&source, tx),
            progress::drive(&pb, rx)
        );
        match summary {
            Ok(s) => {
                toast_ok(&format!(
                    "Receipt scanned successfully. {} item{} found and added to your grocery list.",
                    s.items_added,
                    plural(s.items_added as i64)
                ));
                if s.items_rejected > 0 {
                    toast_err(&format!(
                        "{} scanned item{} could not be added",
                        s.items_rejected,
                        plural(s.items_rejected as i64)
                    ));
                }
            }
            Err(DomainError::Scanner(reason)) => toast_err(&reason),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn set_item_reminder(&self) -> Result<(), DomainError> {
        let Some(choice) = self
            .pick_item("Set a reminder on which grocery?", |row| {
                !row.item.reminder_set
            })
            .await?
        else {
            return Ok(());
        };
        let item = self.pantry.set_reminder(choice.id).await?;
        toast_ok(&format!(
            "You'll receive a reminder before {} expires.",
            item.name
        ));
        Ok(())
    }

    async fn reminder_settings(&self) -> Result<(), DomainError> {
        let current = self.reminders.preferences().await;

        let choices: Vec<LeadChoice> = ReminderPreferences::ALLOWED_LEAD_TIMES
            .into_iter()
            .map(LeadChoice)
            .collect();
        let start = ReminderPreferences::ALLOWED_LEAD_TIMES
            .iter()
            .position(|d| *d == current.days_before_expiry)
            .unwrap_or(0);
        let Some(lead) = optional(
            Select::new("Remind me before expiry:", choices)
                .with_starting_cursor(start)
                .prompt(),
        )?
        else {
            return Ok(());
        };

        let email_enabled = match optional(
            Confirm::new("Email notifications?")
                .with_default(current.email_enabled)
                .prompt(),
        )? {
            Some(v) => v,
            None => return Ok(()),
        };
        let sms_enabled = match optional(
            Confirm::new("SMS notifications?")
                .with_default(current.sms_enabled)
                .prompt(),
        )? {
            Some(v) => v,
            None => return Ok(()),
        };

        let saved = self
            .reminders
            .save(ReminderPreferences {
                days_before_expiry: lead.0,
                email_enabled,
                sms_enabled,
            })
            .await?;
        toast_ok(&format!(
            "Reminder preferences saved. You'll receive reminders {} day{} before your groceries expire.",
            saved.days_before_expiry,
            plural(i64::from(saved.days_before_expiry))
        ));
        if saved.method().is_none() {
            toast_err("Every notification method is off; reminders will not be delivered");
        }

        let due = self.reminders.due_items(Utc::now()).await;
        if !due.is_empty() {
            println!();
            println!("  Due for a reminder now:");
            for row in &due {
                render_row(row);
            }
        }
        Ok(())
    }

    /// Select one grocery among those passing `filter`. None when the list
    /// is empty or the user backs out.
    async fn pick_item(
        &self,
        message: &str,
        filter: impl Fn(&EvaluatedItem) -> bool,
    ) -> Result<Option<ItemChoice>, DomainError> {
        let rows = self.pantry.evaluated(Utc::now()).await;
        let choices: Vec<ItemChoice> = rows
            .iter()
            .filter(|row| filter(row))
            .map(|row| ItemChoice {
                id: row.item.id,
                label: format!("{} (expires {})", row.item.name, row.item.expiry_date),
            })
            .collect();
        if choices.is_empty() {
            println!("  Nothing to pick here yet.");
            return Ok(None);
        }
        optional(Select::new(message, choices).prompt())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let user = match self.auth.current_user().await? {
                Some(user) => {
                    toast_ok(&format!("Welcome back, {}!", user.name));
                    user
                }
                None => match self.auth_gate().await? {
                    Some(user) => user,
                    None => return Ok(()),
                },
            };
            match self.dashboard(&user).await? {
                Flow::SignedOut => continue,
                Flow::Quit => return Ok(()),
            }
        }
    }
}

/// Esc backs out of a prompt instead of erroring.
fn optional<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(input_err(e)),
    }
}

fn input_err(e: InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

fn toast_ok(msg: &str) {
    println!("{}", format!("  {}", msg).green());
}

fn toast_err(msg: &str) {
    println!("{}", format!("  {}", msg).red());
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn render_list(rows: &[EvaluatedItem]) {
    println!();
    if rows.is_empty() {
        println!("  No groceries yet.");
        println!("  Add groceries to start tracking their expiry dates.");
        return;
    }
    println!(
        "  Your Groceries ({} item{})",
        rows.len(),
        plural(rows.len() as i64)
    );
    println!();
    for row in rows {
        render_row(row);
    }
}

fn render_row(row: &EvaluatedItem) {
    let item = &row.item;
    let days = row.days_left();
    let status = match row.status() {
        ExpiryStatus::Expired => format!(
            "[!] Expired {} day{} ago",
            days.abs(),
            plural(days.abs())
        )
        .red(),
        ExpiryStatus::ExpiresToday => "[o] Expires today".to_string().dark_yellow(),
        ExpiryStatus::Critical => {
            format!("[!] Expires in {} day{}", days, plural(days)).dark_yellow()
        }
        ExpiryStatus::Warning => format!("{} days left", days).yellow(),
        ExpiryStatus::Fresh => format!("[ok] {} days left", days).green(),
    };

    let mut header = format!("{} x{}", item.name, item.quantity);
    if let Some(category) = item.category {
        header.push_str(&format!("  [{}]", category));
    }
    if item.reminder_set {
        header.push_str("  (reminder)");
    }
    println!("  {}", header.bold());
    println!("      Expires: {}   {}", item.expiry_date, status);
    if let Some(notes) = &item.notes {
        println!("      {}", notes.as_str().dim());
    }
    println!();
}

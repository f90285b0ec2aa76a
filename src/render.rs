//! Plain-text rendering of pages for the terminal front end.

use crate::forms::FieldErrors;
use crate::models::{Property, User};
use crate::pages::{Banner, ListState};
use crate::session::Session;
use std::fmt::Write;

pub const CARD_PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=RealNest";
pub const DETAIL_PLACEHOLDER_IMAGE: &str = "https://placehold.co/1200x600?text=RealNest";

/// `$1,250,000`, `$1,850.5`, or `N/A` when there is no price
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price.filter(|p| p.is_finite() && *p != 0.0) else {
        return "N/A".to_string();
    };

    let cents = (price.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    match frac {
        0 => format!("{sign}${grouped}"),
        f if f % 10 == 0 => format!("{sign}${grouped}.{}", f / 10),
        f => format!("{sign}${grouped}.{f:02}"),
    }
}

pub fn nav_bar(session: &Session) -> String {
    let mut links = vec!["Home"];
    if session.is_authenticated() {
        links.push("My Listings");
    }
    if session.is_admin() {
        links.push("Admin");
    }

    let account = match (&session.user, session.is_authenticated()) {
        (Some(user), true) => format!("Hi, {} | Logout", user.name),
        (None, true) => "Logout".to_string(),
        _ => "Login | Register".to_string(),
    };
    format!("RealNest  {}  ||  {}", links.join(" | "), account)
}

pub fn property_card(property: &Property) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", property.id, property.title);
    let _ = writeln!(out, "   {}", property.location);
    let _ = writeln!(out, "   {}  [{}]", format_price(property.price), property.property_type);
    let _ = writeln!(out, "   Status: {}", property.status);
    let _ = writeln!(
        out,
        "   Image: {}",
        property.image_url.as_deref().unwrap_or(CARD_PLACEHOLDER_IMAGE)
    );
    out
}

pub fn property_details(property: &Property) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", property.title);
    let _ = writeln!(out, "{}", property.location);
    let _ = writeln!(out, "{}", format_price(property.price));
    let _ = writeln!(out, "{}  Status: {}", property.property_type, property.status);
    if let Some(listed) = property.date_listed {
        let _ = writeln!(out, "Listed: {}", listed.format("%Y-%m-%d"));
    }
    let _ = writeln!(
        out,
        "Image: {}",
        property.image_url.as_deref().unwrap_or(DETAIL_PLACEHOLDER_IMAGE)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "About this property");
    let _ = writeln!(out, "{}", property.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Contact details");
    if let Some(owner) = &property.owner {
        let _ = writeln!(out, "Listed by: {}", owner.name);
    }
    if let Some(email) = property.contact_email_or_owner() {
        let _ = writeln!(out, "Email: {email}");
    }
    if let Some(phone) = property.contact_phone.as_deref().filter(|p| !p.is_empty()) {
        let _ = writeln!(out, "Phone: {phone}");
    }
    let _ = writeln!(
        out,
        "Listings remain hidden from the public until approved by an administrator."
    );
    out
}

pub fn user_row(user: &User) -> String {
    format!("#{:<5} {:<24} {:<32} {}", user.id, user.name, user.email, user.role.label())
}

/// `[Previous]  Page 2 of 5  [Next]`, disabled controls shown as `(Previous)`; `None` for a single page
pub fn pager_line<T>(list: &ListState<T>) -> Option<String> {
    if !list.pager.controls_visible() {
        return None;
    }
    let previous = if list.previous_disabled() { "(Previous)" } else { "[Previous]" };
    let next = if list.next_disabled() { "(Next)" } else { "[Next]" };
    Some(format!("{previous}  {}  {next}", list.pager.label()))
}

/// Cards for a property list, or the list's error/empty notice
pub fn property_list(list: &ListState<Property>, empty_notice: &str) -> String {
    if list.loading {
        return "Loading...\n".to_string();
    }
    if let Some(error) = &list.error {
        return format!("Error: {error}\n");
    }
    if list.is_empty_result() {
        return format!("{empty_notice}\n");
    }

    let mut out = String::new();
    for property in list.visible() {
        out.push_str(&property_card(property));
        out.push('\n');
    }
    if let Some(line) = pager_line(list) {
        let _ = writeln!(out, "{line}");
    }
    out
}

pub fn user_table(list: &ListState<User>) -> String {
    if list.loading {
        return "Loading...\n".to_string();
    }
    if let Some(error) = &list.error {
        return format!("Error: {error}\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:<24} {:<32} Role", "ID", "Name", "Email");
    for user in list.visible() {
        let _ = writeln!(out, "{}", user_row(user));
    }
    if let Some(line) = pager_line(list) {
        let _ = writeln!(out, "{line}");
    }
    out
}

pub fn banner(banner: &Banner) -> String {
    let mut out = String::new();
    if let Some(success) = &banner.success {
        let _ = writeln!(out, "OK: {success}");
    }
    if let Some(error) = &banner.error {
        let _ = writeln!(out, "Error: {error}");
    }
    out
}

pub fn field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}
